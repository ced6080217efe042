//! Socket connection, request/reply, and event streams.

use std::{
    env,
    path::{Path, PathBuf},
    process::Stdio,
};

use serde::Deserialize;
use tokio::{net::UnixStream, process::Command};
use tracing::{debug, info, trace};

use crate::{
    Error, Result,
    codec::{self, MessageType},
    event::{Event, EventKind},
    tree::Node,
};

/// Environment variable i3 exports with its socket path.
pub const SOCKET_ENV: &str = "I3SOCK";

/// Locate the i3 IPC socket: `I3SOCK`, else `i3 --get-socketpath`.
pub async fn socket_path() -> Result<PathBuf> {
    if let Some(path) = env::var_os(SOCKET_ENV).filter(|p| !p.is_empty()) {
        debug!(path = ?path, "using {}", SOCKET_ENV);
        return Ok(PathBuf::from(path));
    }
    let output = Command::new("i3")
        .arg("--get-socketpath")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| Error::SocketPath(format!("running i3 --get-socketpath: {e}")))?;
    if !output.status.success() {
        return Err(Error::SocketPath(format!(
            "i3 --get-socketpath exited with {}",
            output.status
        )));
    }
    let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if path.is_empty() {
        return Err(Error::SocketPath(
            "i3 --get-socketpath printed nothing".to_string(),
        ));
    }
    Ok(PathBuf::from(path))
}

/// Reply to `SUBSCRIBE`.
#[derive(Deserialize)]
struct SubscribeReply {
    /// Whether i3 accepted the subscription.
    success: bool,
}

/// A request/reply connection to i3.
///
/// Created once at startup and either used for queries or turned into an
/// [`EventStream`] with [`Connection::subscribe`]. Dropping it closes the socket.
#[derive(Debug)]
pub struct Connection {
    /// The IPC socket.
    stream: UnixStream,
}

impl Connection {
    /// Connect to the running i3 instance.
    pub async fn connect() -> Result<Self> {
        let path = socket_path().await?;
        Self::connect_to(&path).await
    }

    /// Connect to an explicit socket path.
    pub async fn connect_to(path: &Path) -> Result<Self> {
        let stream = UnixStream::connect(path)
            .await
            .map_err(|source| Error::Connect {
                path: path.to_path_buf(),
                source,
            })?;
        info!(path = %path.display(), "connected to i3");
        Ok(Self::from_stream(stream))
    }

    /// Wrap an already-connected socket.
    pub fn from_stream(stream: UnixStream) -> Self {
        Self { stream }
    }

    /// Send a request and wait for its reply, skipping any interleaved events.
    async fn request(&mut self, ty: MessageType, payload: &[u8]) -> Result<Vec<u8>> {
        trace!(?ty, len = payload.len(), "i3 request");
        codec::write_message(&mut self.stream, ty.code(), payload).await?;
        loop {
            let msg = codec::read_message(&mut self.stream)
                .await?
                .ok_or(Error::Closed)?;
            if msg.msg_type == ty.code() {
                return Ok(msg.payload);
            }
            trace!(msg_type = msg.msg_type, "skipping unrelated i3 message");
        }
    }

    /// Fetch the layout tree.
    pub async fn get_tree(&mut self) -> Result<Node> {
        let payload = self.request(MessageType::GetTree, b"").await?;
        Ok(serde_json::from_slice(&payload)?)
    }

    /// X11 window id of the focused container.
    ///
    /// Fails with [`Error::NoFocusedWindow`] when the focus is on something
    /// that is not a client window, e.g. an empty workspace.
    pub async fn get_focused_window(&mut self) -> Result<u32> {
        self.get_tree()
            .await?
            .focused_window()
            .ok_or(Error::NoFocusedWindow)
    }

    /// Subscribe to `kinds` and turn this connection into an event stream.
    pub async fn subscribe(mut self, kinds: &[EventKind]) -> Result<EventStream> {
        let names: Vec<&str> = kinds.iter().map(|k| k.as_str()).collect();
        let payload = serde_json::to_vec(&names)?;
        let reply = self.request(MessageType::Subscribe, &payload).await?;
        let reply: SubscribeReply = serde_json::from_slice(&reply)?;
        if !reply.success {
            return Err(Error::SubscribeRejected(names.join(",")));
        }
        debug!(events = ?names, "subscribed");
        Ok(EventStream {
            stream: self.stream,
        })
    }
}

/// A subscribed connection that yields events in arrival order.
#[derive(Debug)]
pub struct EventStream {
    /// The IPC socket.
    stream: UnixStream,
}

impl EventStream {
    /// Wait for the next event. The connection closing is [`Error::Closed`].
    pub async fn next_event(&mut self) -> Result<Event> {
        loop {
            let msg = codec::read_message(&mut self.stream)
                .await?
                .ok_or(Error::Closed)?;
            if msg.is_event() {
                return Event::from_message(&msg);
            }
            trace!(msg_type = msg.msg_type, "skipping reply on event stream");
        }
    }

    /// Wait for the next window focus event that names an X11 window.
    pub async fn next_focus(&mut self) -> Result<u32> {
        loop {
            match self.next_event().await? {
                Event::Window(ev) => {
                    if let Some(window) = ev.focused_window() {
                        return Ok(window);
                    }
                    trace!(change = %ev.change, "ignoring window event");
                }
                Event::Shutdown => return Err(Error::Closed),
                Event::Other(code) => trace!(code, "ignoring event"),
            }
        }
    }
}
