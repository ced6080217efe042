//! i3 IPC framing.
//!
//! Every message is `"i3-ipc"`, a u32 payload length, a u32 message type (both
//! in native byte order), then the JSON payload. Events reuse the framing with
//! the high bit of the type set.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::{Error, Result};

/// Frame magic.
pub const MAGIC: [u8; 6] = *b"i3-ipc";

/// Magic plus length plus type.
pub const HEADER_LEN: usize = 14;

/// Bit set on the type of every event frame.
pub const EVENT_BIT: u32 = 0x8000_0000;

/// Upper bound on a single payload. Layout trees on large setups run to a few
/// hundred KiB.
pub const MAX_PAYLOAD: u32 = 64 * 1024 * 1024;

/// Request types this client sends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u32)]
pub enum MessageType {
    /// Subscribe to events.
    Subscribe = 2,
    /// Fetch the layout tree.
    GetTree = 4,
}

impl MessageType {
    /// Wire code.
    pub const fn code(self) -> u32 {
        self as u32
    }
}

/// A decoded frame.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    /// Raw type code, event bit included.
    pub msg_type: u32,
    /// JSON payload bytes.
    pub payload: Vec<u8>,
}

impl Message {
    /// True for event frames.
    pub fn is_event(&self) -> bool {
        self.msg_type & EVENT_BIT != 0
    }

    /// Event code with the event bit stripped, for event frames.
    pub fn event_code(&self) -> Option<u32> {
        self.is_event().then_some(self.msg_type & !EVENT_BIT)
    }
}

/// Encode a frame.
pub fn encode(msg_type: u32, payload: &[u8]) -> Result<Vec<u8>> {
    let len = u32::try_from(payload.len()).unwrap_or(u32::MAX);
    if len > MAX_PAYLOAD {
        return Err(Error::PayloadTooLarge(len));
    }
    let mut buf = Vec::with_capacity(HEADER_LEN + payload.len());
    buf.extend_from_slice(&MAGIC);
    buf.extend_from_slice(&len.to_ne_bytes());
    buf.extend_from_slice(&msg_type.to_ne_bytes());
    buf.extend_from_slice(payload);
    Ok(buf)
}

/// Split a header into `(payload_len, msg_type)`.
pub fn decode_header(header: &[u8; HEADER_LEN]) -> Result<(u32, u32)> {
    let mut magic = [0u8; 6];
    magic.copy_from_slice(&header[..6]);
    if magic != MAGIC {
        return Err(Error::BadMagic(magic));
    }
    let mut len = [0u8; 4];
    len.copy_from_slice(&header[6..10]);
    let mut ty = [0u8; 4];
    ty.copy_from_slice(&header[10..14]);
    let len = u32::from_ne_bytes(len);
    if len > MAX_PAYLOAD {
        return Err(Error::PayloadTooLarge(len));
    }
    Ok((len, u32::from_ne_bytes(ty)))
}

/// Write one frame and flush.
pub async fn write_message<W>(writer: &mut W, msg_type: u32, payload: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let frame = encode(msg_type, payload)?;
    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one frame.
///
/// Returns `Ok(None)` when the peer closes the connection cleanly between
/// frames; a close part-way through a frame is [`Error::Truncated`].
pub async fn read_message<R>(reader: &mut R) -> Result<Option<Message>>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; HEADER_LEN];
    let mut filled = 0;
    while filled < HEADER_LEN {
        let n = reader.read(&mut header[filled..]).await?;
        if n == 0 {
            return if filled == 0 {
                Ok(None)
            } else {
                Err(Error::Truncated)
            };
        }
        filled += n;
    }
    let (len, msg_type) = decode_header(&header)?;
    let mut payload = vec![0u8; len as usize];
    reader
        .read_exact(&mut payload)
        .await
        .map_err(|_| Error::Truncated)?;
    Ok(Some(Message { msg_type, payload }))
}
