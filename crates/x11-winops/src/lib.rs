//! X11 window property operations.
//!
//! This crate owns the single window property i3flash touches,
//! `_NET_WM_WINDOW_OPACITY`, and exposes three operations over it:
//! - [`OpacityStore::read`]: the current value, or `None` when the property is absent
//! - [`OpacityStore::write`]: remove any existing value, then set a new 32-bit value
//! - [`OpacityStore::clear`]: remove the property so the compositor falls back
//!   to default (opaque) rendering
//!
//! Back ends implement the primitive `remove`/`set` calls; the remove-before-set
//! sequence of `write` is provided by the trait and is not overridable in
//! practice. [`Xprop`] shells out to the `xprop` binary.
#![warn(missing_docs)]

use std::fmt::{Display, Formatter, Result as FmtResult};

use async_trait::async_trait;

mod error;
#[cfg(any(test, feature = "test-utils"))]
mod mock;
mod xprop;

pub use error::{Error, Result};
#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockCall, MockOpacityStore};
pub use xprop::{Xprop, parse_opacity};

/// Name of the EWMH opacity property.
pub const OPACITY_ATOM: &str = "_NET_WM_WINDOW_OPACITY";

/// X11 window identifier, as reported by the window manager.
///
/// Opaque to us: we never create or destroy windows, only address them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u32);

impl WindowId {
    /// Wrap a raw X11 window id.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw X11 window id.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for WindowId {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl Display for WindowId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// Access to a window's opacity property.
#[async_trait]
pub trait OpacityStore: Send + Sync {
    /// Current opacity of `window`, or `None` if the property is not set.
    async fn read(&self, window: WindowId) -> Result<Option<u32>>;

    /// Remove the opacity property. Removing an absent property succeeds.
    async fn remove(&self, window: WindowId) -> Result<()>;

    /// Set the opacity property as a 32-bit cardinal.
    async fn set(&self, window: WindowId, value: u32) -> Result<()>;

    /// Remove, then set. Some back ends ignore or reject a set on a property
    /// that is already present, so the remove always comes first.
    async fn write(&self, window: WindowId, value: u32) -> Result<()> {
        self.remove(window).await?;
        self.set(window, value).await
    }

    /// Revert the window to default rendering.
    ///
    /// Writing the maximum opacity is not equivalent: windows with
    /// `_NET_WM_OPAQUE_REGION` ignore it.
    async fn clear(&self, window: WindowId) -> Result<()> {
        self.remove(window).await
    }
}
