//! Flash engine
//!
//! Dips a window's opacity for a moment and restores it. Two entry points:
//! - [`Flasher::flash`]: one flash of one window
//! - [`Monitor::run`]: flash every window that gains focus, forever
//!
//! Everything runs sequentially on the caller's task; there is no
//! concurrency between flashes.
#![warn(missing_docs)]

mod error;
mod flash;
mod monitor;
mod opacity;

pub use error::{Error, Result};
pub use flash::{DEFAULT_DURATION, DEFAULT_OPACITY, FlashRequest, Flasher, flash};
pub use monitor::{FocusSource, Monitor, MonitorState};
pub use opacity::{MAX_OPACITY, Opacity, format_opacity};
