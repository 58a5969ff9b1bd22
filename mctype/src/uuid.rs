//! UUID wire codec and offline-mode name derivation.

use ::uuid::Uuid;

use crate::error::TypeResult;
use crate::reader::ByteReader;

/// Appends a UUID as 16 raw big-endian bytes.
pub fn write_uuid(out: &mut Vec<u8>, value: Uuid) {
    out.extend_from_slice(value.as_bytes());
}

/// Decodes a UUID from 16 raw bytes.
///
/// # Errors
///
/// Returns [`crate::TypeError::Underrun`] if fewer than 16 bytes remain.
pub fn read_uuid(reader: &mut ByteReader<'_>) -> TypeResult<Uuid> {
    let bytes = reader.take(16)?;
    Ok(Uuid::from_bytes(bytes.try_into().unwrap()))
}

/// Derives the deterministic offline-mode UUID for a player name.
///
/// The name is hashed with MD5 and the version/variant bits are set per
/// RFC 4122 version 3, matching the Notchian offline scheme.
#[must_use]
pub fn offline_uuid(name: &str) -> Uuid {
    let mut hash = md5::compute(name.as_bytes()).0;
    hash[6] = (hash[6] & 0x0F) | 0x30;
    hash[8] = (hash[8] & 0x3F) | 0x80;
    Uuid::from_bytes(hash)
}
