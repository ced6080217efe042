use std::result::Result as StdResult;

use thiserror::Error;

/// Convenient result type for the flash engine.
pub type Result<T> = StdResult<T, Error>;

/// Errors surfaced by the flash engine.
#[derive(Debug, Error)]
pub enum Error {
    /// Opacity outside `[0, 1]`, or not a number.
    #[error("Invalid opacity argument {0:?}, expected a decimal between 0 and 1")]
    InvalidOpacity(String),

    /// Reading or writing a window's opacity failed. Scoped to one flash.
    #[error("Property access error: {0}")]
    Property(#[from] x11_winops::Error),

    /// The window manager connection failed or closed.
    #[error("Transport error: {0}")]
    Transport(#[from] i3_ipc::Error),
}

impl Error {
    /// True if the error ends the process rather than a single flash.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Property(_))
    }
}
