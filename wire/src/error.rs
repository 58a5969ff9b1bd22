//! Error types for frame codec operations.

use std::fmt;

use mctype::TypeError;

/// Result type for frame codec operations.
pub type FrameResult<T> = Result<T, FrameError>;

/// Errors that can occur while framing or unframing packets.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameError {
    /// A varint in the frame header is malformed.
    Type(TypeError),

    /// A declared length is negative.
    InvalidLength {
        length: i32,
    },

    /// A frame exceeds the configured size limit.
    FrameTooLarge {
        length: usize,
        max: usize,
    },

    /// zlib inflation failed.
    Decompression {
        detail: String,
    },

    /// The inflated payload does not match the declared uncompressed size.
    LengthMismatch {
        declared: usize,
        actual: usize,
    },
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(err) => write!(f, "malformed frame header: {err}"),
            Self::InvalidLength { length } => {
                write!(f, "negative length {length} in frame header")
            }
            Self::FrameTooLarge { length, max } => {
                write!(f, "frame of {length} bytes exceeds limit of {max}")
            }
            Self::Decompression { detail } => write!(f, "zlib inflation failed: {detail}"),
            Self::LengthMismatch { declared, actual } => {
                write!(
                    f,
                    "inflated payload is {actual} bytes, header declared {declared}"
                )
            }
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Type(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TypeError> for FrameError {
    fn from(err: TypeError) -> Self {
        Self::Type(err)
    }
}
