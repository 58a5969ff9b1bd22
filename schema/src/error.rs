//! Error types for schema validation.

use std::fmt;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors detected while validating a packet schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// Two fields in the same packet share a name.
    DuplicateField {
        packet: &'static str,
        field: &'static str,
    },

    /// A dependency names a field that does not precede the referrer.
    UnresolvedDependency {
        packet: &'static str,
        field: &'static str,
        target: &'static str,
    },

    /// A dependency was attached to a field kind that cannot use one.
    InvalidDependency {
        packet: &'static str,
        field: &'static str,
    },

    /// Two schemas in a registry share `(direction, phase, id)`.
    DuplicatePacket {
        packet: &'static str,
        id: i32,
    },
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateField { packet, field } => {
                write!(f, "packet {packet}: duplicate field {field}")
            }
            Self::UnresolvedDependency {
                packet,
                field,
                target,
            } => {
                write!(
                    f,
                    "packet {packet}: field {field} depends on {target}, which does not precede it"
                )
            }
            Self::InvalidDependency { packet, field } => {
                write!(
                    f,
                    "packet {packet}: field {field} carries a dependency its kind cannot use"
                )
            }
            Self::DuplicatePacket { packet, id } => {
                write!(f, "duplicate packet id {id:#04x} registered by {packet}")
            }
        }
    }
}

impl std::error::Error for SchemaError {}
