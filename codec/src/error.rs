//! Error types for packet codec operations.

use std::fmt;

use mctype::TypeError;

/// Result type for packet codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding packets.
#[derive(Debug, Clone, PartialEq)]
pub enum CodecError {
    /// A primitive codec failed.
    Type(TypeError),

    /// The decoded packet id does not match the schema.
    IdMismatch {
        expected: i32,
        found: i32,
    },

    /// The value list handed to the encoder has the wrong length.
    FieldCount {
        packet: &'static str,
        expected: usize,
        found: usize,
    },

    /// A value's variant does not match the field's declared kind.
    KindMismatch {
        field: &'static str,
    },

    /// A dependency field decoded to a value unusable as count or presence.
    DependencyValue {
        field: &'static str,
        target: &'static str,
    },

    /// Unknown packets carry no schema and cannot be encoded.
    UnencodableUnknown {
        id: i32,
    },
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(err) => write!(f, "primitive codec error: {err}"),
            Self::IdMismatch { expected, found } => {
                write!(f, "packet id mismatch: expected {expected:#04x}, found {found:#04x}")
            }
            Self::FieldCount {
                packet,
                expected,
                found,
            } => {
                write!(
                    f,
                    "packet {packet}: expected {expected} field values, got {found}"
                )
            }
            Self::KindMismatch { field } => {
                write!(f, "field {field}: value does not match declared kind")
            }
            Self::DependencyValue { field, target } => {
                write!(
                    f,
                    "field {field}: dependency {target} is not a usable count or flag"
                )
            }
            Self::UnencodableUnknown { id } => {
                write!(f, "unknown packet {id:#04x} cannot be encoded")
            }
        }
    }
}

impl std::error::Error for CodecError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Type(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TypeError> for CodecError {
    fn from(err: TypeError) -> Self {
        Self::Type(err)
    }
}
