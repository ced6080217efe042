use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

/// Convenient result type for i3 IPC operations.
pub type Result<T> = StdResult<T, Error>;

/// Errors talking to the i3 IPC socket.
#[derive(Debug, Error)]
pub enum Error {
    /// Neither `I3SOCK` nor `i3 --get-socketpath` produced a socket path.
    #[error("could not locate the i3 IPC socket: {0}")]
    SocketPath(String),

    /// Connecting to the socket failed.
    #[error("failed to connect to i3 at {path}: {source}")]
    Connect {
        /// Socket path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },

    /// I/O failure on an established connection.
    #[error("i3 IPC I/O error: {0}")]
    Io(#[from] io::Error),

    /// A frame did not start with the `i3-ipc` magic string.
    #[error("invalid i3 IPC frame: bad magic {0:?}")]
    BadMagic([u8; 6]),

    /// A frame announced an implausibly large payload.
    #[error("i3 IPC payload of {0} bytes exceeds limit")]
    PayloadTooLarge(u32),

    /// The peer closed the connection in the middle of a frame.
    #[error("i3 IPC frame truncated")]
    Truncated,

    /// A frame of the wrong kind arrived (a reply where an event was expected).
    #[error("unexpected i3 IPC message type {0:#x}")]
    UnexpectedMessage(u32),

    /// The peer closed the connection.
    #[error("connection closed by i3")]
    Closed,

    /// A payload could not be decoded.
    #[error("invalid i3 IPC payload: {0}")]
    Json(#[from] serde_json::Error),

    /// i3 refused an event subscription.
    #[error("i3 rejected subscription to {0}")]
    SubscribeRejected(String),

    /// The focused container does not hold an X11 window.
    #[error("no window is currently focused")]
    NoFocusedWindow,
}
