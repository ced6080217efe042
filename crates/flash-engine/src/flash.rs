//! The dip-and-restore sequence.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info};
use x11_winops::{OpacityStore, WindowId};

use crate::{Opacity, Result};

/// Default flash opacity as a decimal.
pub const DEFAULT_OPACITY: f64 = 0.9;

/// Default flash duration.
pub const DEFAULT_DURATION: Duration = Duration::from_millis(150);

/// One flash: which window, how transparent, for how long.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FlashRequest {
    /// Target window.
    pub window: WindowId,
    /// Opacity during the flash.
    pub opacity: Opacity,
    /// How long the dip lasts.
    pub duration: Duration,
}

impl FlashRequest {
    /// Build a request.
    pub fn new(window: WindowId, opacity: Opacity, duration: Duration) -> Self {
        Self {
            window,
            opacity,
            duration,
        }
    }
}

/// Briefly lower a window's opacity, then put it back the way it was.
///
/// 1. read the current opacity
/// 2. write the flash opacity
/// 3. sleep for the duration
/// 4. write back the old value, or clear the property if there was none
///
/// Any property error abandons the remaining steps and is returned; in
/// particular nothing is restored when step 2 fails.
pub async fn flash<S>(store: &S, req: &FlashRequest) -> Result<()>
where
    S: OpacityStore + ?Sized,
{
    let FlashRequest {
        window,
        opacity,
        duration,
    } = *req;
    info!(%window, "Flashing window");
    let default = store.read(window).await?;

    store.write(window, opacity.native()).await?;

    debug!(?duration, "Waiting");
    sleep(duration).await;

    match default {
        Some(v) => store.write(window, v).await?,
        None => store.clear(window).await?,
    }
    debug!(%window, restored = ?default, "flash complete");
    Ok(())
}

/// A store plus the flash parameters, shared by one-shot and monitor modes.
#[derive(Clone, Debug)]
pub struct Flasher<S> {
    /// Property back end.
    store: S,
    /// Opacity during a flash.
    opacity: Opacity,
    /// Flash duration.
    duration: Duration,
}

impl<S: OpacityStore> Flasher<S> {
    /// Create a flasher.
    pub fn new(store: S, opacity: Opacity, duration: Duration) -> Self {
        Self {
            store,
            opacity,
            duration,
        }
    }

    /// The request this flasher would issue for `window`.
    pub fn request(&self, window: WindowId) -> FlashRequest {
        FlashRequest::new(window, self.opacity, self.duration)
    }

    /// Flash `window` and wait for the restore to finish.
    pub async fn flash(&self, window: WindowId) -> Result<()> {
        flash(&self.store, &self.request(window)).await
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}
