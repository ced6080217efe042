//! Error handling for the i3flash binary.

use std::{io, result};

use thiserror::Error;

/// Convenient result type for i3flash.
pub type Result<T> = result::Result<T, Error>;

/// Fatal errors that end the process with a non-zero status.
#[derive(Debug, Error)]
pub enum Error {
    /// The async runtime could not be started.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Connecting to or talking with i3 failed.
    #[error("i3 error: {0}")]
    Ipc(#[from] i3_ipc::Error),
    /// The flash engine stopped.
    #[error("{0}")]
    Flash(#[from] flash_engine::Error),
}
