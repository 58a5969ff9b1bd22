//! Error types for primitive codec operations.

use std::fmt;

/// Result type for primitive codec operations.
pub type TypeResult<T> = Result<T, TypeError>;

/// Errors that can occur while encoding or decoding wire primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    /// A variable-length integer used more bytes than its width allows.
    VarNumTooLong {
        /// Width of the target integer in bits (32 or 64).
        max_bits: u32,
    },

    /// The decoder ran off the end of the input.
    Underrun {
        /// Number of bytes requested.
        requested: usize,
        /// Number of bytes available.
        available: usize,
    },
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VarNumTooLong { max_bits } => {
                write!(f, "variable-length integer exceeds {max_bits} bits")
            }
            Self::Underrun {
                requested,
                available,
            } => {
                write!(
                    f,
                    "input underrun: requested {requested} bytes, {available} available"
                )
            }
        }
    }
}

impl std::error::Error for TypeError {}
