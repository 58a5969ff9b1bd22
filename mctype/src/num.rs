//! Fixed-width integer, float, and boolean codecs.
//!
//! All multi-byte values are big-endian on the wire.

use crate::error::TypeResult;
use crate::reader::ByteReader;

macro_rules! fixed_codec {
    ($write:ident, $read:ident, $ty:ty, $len:expr) => {
        /// Appends the big-endian encoding of `value` to `out`.
        pub fn $write(out: &mut Vec<u8>, value: $ty) {
            out.extend_from_slice(&value.to_be_bytes());
        }

        /// Decodes a big-endian value from the reader.
        ///
        /// # Errors
        ///
        /// Returns [`crate::TypeError::Underrun`] if the input is too short.
        pub fn $read(reader: &mut ByteReader<'_>) -> TypeResult<$ty> {
            let bytes = reader.take($len)?;
            Ok(<$ty>::from_be_bytes(bytes.try_into().unwrap()))
        }
    };
}

fixed_codec!(write_i8, read_i8, i8, 1);
fixed_codec!(write_u8, read_u8, u8, 1);
fixed_codec!(write_i16, read_i16, i16, 2);
fixed_codec!(write_u16, read_u16, u16, 2);
fixed_codec!(write_i32, read_i32, i32, 4);
fixed_codec!(write_u32, read_u32, u32, 4);
fixed_codec!(write_i64, read_i64, i64, 8);
fixed_codec!(write_u64, read_u64, u64, 8);
fixed_codec!(write_f32, read_f32, f32, 4);
fixed_codec!(write_f64, read_f64, f64, 8);

/// Appends a boolean as a single byte (`0x01` or `0x00`).
pub fn write_bool(out: &mut Vec<u8>, value: bool) {
    out.push(u8::from(value));
}

/// Decodes a boolean. Any non-zero byte is treated as `true`.
///
/// # Errors
///
/// Returns [`crate::TypeError::Underrun`] if no bytes remain.
pub fn read_bool(reader: &mut ByteReader<'_>) -> TypeResult<bool> {
    Ok(reader.read_u8()? != 0)
}
