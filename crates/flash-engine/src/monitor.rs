//! Flash every window that receives focus.

use async_trait::async_trait;
use i3_ipc::EventStream;
use tracing::{debug, info, warn};
use x11_winops::{OpacityStore, WindowId};

use crate::{Error, Flasher, Result};

/// A stream of newly focused windows.
#[async_trait]
pub trait FocusSource: Send {
    /// Block until the next focus change and return the focused window.
    async fn next_focus(&mut self) -> Result<WindowId>;
}

#[async_trait]
impl FocusSource for EventStream {
    async fn next_focus(&mut self) -> Result<WindowId> {
        // Inherent method, not this trait method.
        let window = EventStream::next_focus(self).await?;
        Ok(WindowId::new(window))
    }
}

/// Lifecycle of a [`Monitor`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MonitorState {
    /// Constructed, not yet waiting for events.
    Idle,
    /// Waiting for or handling events. Terminal.
    Listening,
}

/// Sequential focus monitor.
///
/// Each event is handled to completion (including the flash's sleep and
/// restore) before the next one is read, so at most one flash is ever in
/// flight. Events that arrive meanwhile queue up in the source.
pub struct Monitor<S, F> {
    /// Flash parameters and property back end.
    flasher: Flasher<S>,
    /// Where focus changes come from.
    source: F,
    /// Current lifecycle state.
    state: MonitorState,
}

impl<S, F> Monitor<S, F>
where
    S: OpacityStore,
    F: FocusSource,
{
    /// Create an idle monitor.
    pub fn new(flasher: Flasher<S>, source: F) -> Self {
        Self {
            flasher,
            source,
            state: MonitorState::Idle,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Handle focus events forever.
    ///
    /// A failed flash is logged and skipped. Only a source error ends the
    /// loop, and it is returned.
    pub async fn run(&mut self) -> Result<()> {
        self.state = MonitorState::Listening;
        loop {
            info!("Waiting for focus event...");
            let window = self.source.next_focus().await?;
            debug!(%window, "focus changed");
            self.handle(window).await?;
        }
    }

    /// Flash one window, absorbing per-window property errors.
    async fn handle(&self, window: WindowId) -> Result<()> {
        match self.flasher.flash(window).await {
            Ok(()) => Ok(()),
            Err(Error::Property(err)) => {
                warn!(%window, error = %err, "flash abandoned");
                Ok(())
            }
            Err(err) => Err(err),
        }
    }
}
