//! String and identifier codecs.

use std::fmt;
use std::str::FromStr;

use crate::error::TypeResult;
use crate::reader::ByteReader;
use crate::varnum::{read_varint, varint_len, write_varint};

/// Appends a VarInt-length-prefixed UTF-8 string to `out`.
pub fn write_string(out: &mut Vec<u8>, value: &str) {
    write_varint(out, value.len() as i32);
    out.extend_from_slice(value.as_bytes());
}

/// Decodes a VarInt-length-prefixed string from the reader.
///
/// The wire carries whatever the server sent; bytes that are not valid
/// UTF-8 are replaced rather than rejected.
///
/// # Errors
///
/// Returns [`crate::TypeError::Underrun`] if the declared length runs past
/// the input, or [`crate::TypeError::VarNumTooLong`] on a malformed prefix.
pub fn read_string(reader: &mut ByteReader<'_>) -> TypeResult<String> {
    let len = read_varint(reader)?;
    let bytes = reader.take(len.max(0) as usize)?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}

/// Returns the encoded length of `value`: prefix plus payload.
#[must_use]
pub fn string_len(value: &str) -> usize {
    varint_len(value.len() as i32) + value.len()
}

/// A namespaced resource location, `namespace:path`.
///
/// A bare path is equivalent to `minecraft:path`. The codec does not
/// enforce the character set on decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier {
    namespace: String,
    path: String,
}

impl Identifier {
    /// The default namespace applied to bare paths.
    pub const DEFAULT_NAMESPACE: &'static str = "minecraft";

    /// Creates an identifier from explicit namespace and path.
    #[must_use]
    pub fn new(namespace: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            path: path.into(),
        }
    }

    /// Creates a `minecraft:`-namespaced identifier from a bare path.
    #[must_use]
    pub fn minecraft(path: impl Into<String>) -> Self {
        Self::new(Self::DEFAULT_NAMESPACE, path)
    }

    /// Returns the namespace component.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Returns the path component.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.path)
    }
}

impl FromStr for Identifier {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.split_once(':') {
            Some((namespace, path)) => Self::new(namespace, path),
            None => Self::minecraft(s),
        })
    }
}

/// Appends an identifier to `out`, encoded as a string.
pub fn write_identifier(out: &mut Vec<u8>, value: &Identifier) {
    write_string(out, &value.to_string());
}

/// Decodes an identifier from the reader.
///
/// # Errors
///
/// Propagates the underlying string decode errors.
pub fn read_identifier(reader: &mut ByteReader<'_>) -> TypeResult<Identifier> {
    let text = read_string(reader)?;
    Ok(text.parse().unwrap())
}
