use std::{io, process::ExitStatus, result::Result as StdResult};

use thiserror::Error;

use crate::WindowId;

/// Convenient result type for window property operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors raised while reading or changing a window property.
///
/// Every variant is scoped to a single operation on a single window; callers
/// decide whether that is fatal.
#[derive(Debug, Error)]
pub enum Error {
    /// The property tool could not be started (missing binary, permissions).
    #[error("failed to start {program}: {source}")]
    CommandStart {
        /// The program being executed.
        program: String,
        /// The underlying error.
        source: io::Error,
    },

    /// The property tool ran but reported failure.
    #[error("{program} failed on window {window} (status {status}): {stderr}")]
    CommandFailed {
        /// The program being executed.
        program: String,
        /// Target window.
        window: WindowId,
        /// The exit status.
        status: ExitStatus,
        /// Trimmed stderr output.
        stderr: String,
    },

    /// The target window no longer exists.
    #[error("window {0} no longer exists")]
    WindowGone(WindowId),

    /// The property is present but its value is not a 32-bit cardinal.
    #[error("window {window} has unparseable opacity value {value:?}")]
    InvalidValue {
        /// Target window.
        window: WindowId,
        /// The raw value token.
        value: String,
    },
}

impl Error {
    /// The window this error concerns, if any.
    pub fn window(&self) -> Option<WindowId> {
        match self {
            Self::CommandStart { .. } => None,
            Self::CommandFailed { window, .. } | Self::InvalidValue { window, .. } => {
                Some(*window)
            }
            Self::WindowGone(window) => Some(*window),
        }
    }
}
