//! Minimal i3 IPC client.
//!
//! Covers the two things i3flash needs from the window manager:
//! - query the layout tree for the focused window ([`Connection::get_focused_window`])
//! - subscribe to window events and wait for focus changes ([`EventStream::next_focus`])
//!
//! The client is deliberately sequential: one request in flight, events read
//! one at a time in arrival order.
#![warn(missing_docs)]

pub mod codec;
mod connection;
mod error;
mod event;
mod tree;

pub use connection::{Connection, EventStream, SOCKET_ENV, socket_path};
pub use error::{Error, Result};
pub use event::{Event, EventKind, WindowEvent};
pub use tree::Node;
