use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single frame body. Inline audio dominates frame size;
/// anything past this is a corrupt or hostile length prefix.
pub const MAX_FRAME_SIZE: usize = 64 * 1024 * 1024;

/// Failure modes of the framed transport.
#[derive(Debug, Error)]
pub enum FrameError {
    /// The peer closed the stream partway through a frame.
    #[error("connection closed mid-frame")]
    Truncated,

    /// The declared or produced body length exceeds [`MAX_FRAME_SIZE`].
    #[error("frame of {0} bytes exceeds the frame size limit")]
    TooLarge(usize),

    /// A whole frame arrived but its body is not valid JSON.
    #[error("invalid frame payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl FrameError {
    /// Whether the stream is unusable after this error.
    ///
    /// A decode failure consumed exactly one frame, so the stream is still
    /// positioned at the next frame boundary and the error can be reported
    /// to the peer in-band. Everything else poisons the connection.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FrameError::Decode(_))
    }
}

/// Serialize `payload` to JSON and write it as one length-prefixed frame.
///
/// The prefix is the exact byte length of the serialized body, as a
/// big-endian u32. Prefix and body go out in a single write; if that write
/// fails partway the stream must be treated as dead.
pub async fn send_message<W, T>(writer: &mut W, payload: &T) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let body = serde_json::to_vec(payload)?;
    if body.len() > MAX_FRAME_SIZE {
        return Err(FrameError::TooLarge(body.len()));
    }

    let mut frame = Vec::with_capacity(4 + body.len());
    frame.extend_from_slice(&(body.len() as u32).to_be_bytes());
    frame.extend_from_slice(&body);

    writer.write_all(&frame).await?;
    writer.flush().await?;
    Ok(())
}

/// Read one frame and decode its body as JSON.
///
/// Returns `Ok(None)` when the peer shut down cleanly before starting
/// another frame (zero bytes at the prefix position). A close anywhere
/// after that is [`FrameError::Truncated`]: either the whole frame arrives
/// or the connection is treated as broken.
pub async fn receive_message<R>(reader: &mut R) -> Result<Option<Value>, FrameError>
where
    R: AsyncRead + Unpin,
{
    let mut prefix = [0u8; 4];
    let mut filled = 0;
    while filled < prefix.len() {
        let n = reader.read(&mut prefix[filled..]).await?;
        if n == 0 {
            if filled == 0 {
                return Ok(None);
            }
            return Err(FrameError::Truncated);
        }
        filled += n;
    }

    let len = u32::from_be_bytes(prefix) as usize;
    if len > MAX_FRAME_SIZE {
        return Err(FrameError::TooLarge(len));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            FrameError::Truncated
        } else {
            FrameError::Io(e)
        }
    })?;

    Ok(Some(serde_json::from_slice(&body)?))
}
