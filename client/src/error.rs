//! Error types for the client.

use std::fmt;
use std::io;

use codec::CodecError;
use wire::FrameError;

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Errors surfaced by the connection and client layers.
#[derive(Debug)]
pub enum ClientError {
    /// Socket-level failure.
    Io(io::Error),

    /// Frame codec failure on received bytes.
    Frame(FrameError),

    /// Packet codec failure while encoding an outgoing packet.
    Codec(CodecError),

    /// The connection has stopped; no further packets can be sent.
    ConnectionClosed,

    /// A synchronous exchange received a packet it did not expect.
    UnexpectedPacket {
        id: i32,
    },
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "socket error: {err}"),
            Self::Frame(err) => write!(f, "frame error: {err}"),
            Self::Codec(err) => write!(f, "codec error: {err}"),
            Self::ConnectionClosed => write!(f, "connection closed"),
            Self::UnexpectedPacket { id } => {
                write!(f, "unexpected packet {id:#04x}")
            }
        }
    }
}

impl std::error::Error for ClientError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Frame(err) => Some(err),
            Self::Codec(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ClientError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<FrameError> for ClientError {
    fn from(err: FrameError) -> Self {
        Self::Frame(err)
    }
}

impl From<CodecError> for ClientError {
    fn from(err: CodecError) -> Self {
        Self::Codec(err)
    }
}
