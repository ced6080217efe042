//! Event subscriptions and payloads.

use serde::Deserialize;

use crate::{Error, Result, codec::Message, tree::Node};

/// Event families that can be subscribed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    /// Window focus, title, move, close, ...
    Window,
    /// i3 is restarting or exiting.
    Shutdown,
}

impl EventKind {
    /// Name used in the `SUBSCRIBE` payload.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Shutdown => "shutdown",
        }
    }

    /// Event code carried (with the event bit) in event frames.
    pub const fn code(self) -> u32 {
        match self {
            Self::Window => 3,
            Self::Shutdown => 6,
        }
    }
}

/// Payload of a `window` event.
#[derive(Clone, Debug, Deserialize)]
pub struct WindowEvent {
    /// What happened: `new`, `close`, `focus`, `title`, ...
    pub change: String,
    /// The container the event is about.
    pub container: Node,
}

impl WindowEvent {
    /// The X11 window that just received focus, if this is a focus event for
    /// a container holding one.
    pub fn focused_window(&self) -> Option<u32> {
        if self.change == "focus" {
            self.container.window
        } else {
            None
        }
    }
}

/// A decoded event.
#[derive(Clone, Debug)]
pub enum Event {
    /// A window event.
    Window(Box<WindowEvent>),
    /// i3 is restarting or exiting.
    Shutdown,
    /// Any other event family, by code.
    Other(u32),
}

impl Event {
    /// Decode an event frame.
    pub fn from_message(msg: &Message) -> Result<Self> {
        let code = msg
            .event_code()
            .ok_or(Error::UnexpectedMessage(msg.msg_type))?;
        if code == EventKind::Window.code() {
            let ev: WindowEvent = serde_json::from_slice(&msg.payload)?;
            Ok(Self::Window(Box::new(ev)))
        } else if code == EventKind::Shutdown.code() {
            Ok(Self::Shutdown)
        } else {
            Ok(Self::Other(code))
        }
    }
}
