//! Wire primitive codecs for the Minecraft Java Edition protocol.
//!
//! This crate provides the closed set of field primitives the protocol is
//! built from: variable-length integers, fixed-width big-endian integers
//! and floats, length-prefixed strings, identifiers, UUIDs, angles, and
//! packed block positions, together with the bounded [`ByteReader`] cursor
//! used to decode them.
//!
//! # Design Principles
//!
//! - **Bounded operations** - All reads are bounds-checked and never panic
//!   on malformed input.
//! - **No domain knowledge** - This crate knows nothing about packets,
//!   phases, or connections.
//! - **Explicit errors** - All failures return structured errors.
//!
//! # Example
//!
//! ```
//! use mctype::{read_varint, write_varint, ByteReader};
//!
//! let mut buf = Vec::new();
//! write_varint(&mut buf, 765);
//! assert_eq!(buf, [0xFD, 0x05]);
//!
//! let mut reader = ByteReader::new(&buf);
//! assert_eq!(read_varint(&mut reader).unwrap(), 765);
//! ```

mod error;
mod num;
mod reader;
mod spatial;
mod text;
mod uuid;
mod varnum;

pub use crate::uuid::{offline_uuid, read_uuid, write_uuid};
pub use error::{TypeError, TypeResult};
pub use num::{
    read_bool, read_f32, read_f64, read_i16, read_i32, read_i64, read_i8, read_u16, read_u32,
    read_u64, read_u8, write_bool, write_f32, write_f64, write_i16, write_i32, write_i64,
    write_i8, write_u16, write_u32, write_u64, write_u8,
};
pub use reader::ByteReader;
pub use spatial::{read_angle, read_position, write_angle, write_position, Angle, Position};
pub use text::{
    read_identifier, read_string, string_len, write_identifier, write_string, Identifier,
};
pub use varnum::{
    read_varint, read_varlong, varint_len, varlong_len, write_varint, write_varlong,
};

// Re-exported so downstream crates agree on the UUID type.
pub use ::uuid::Uuid;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = varint_len(0);
        let _ = Angle::from_steps(0);
        let _ = Position::new(0, 0, 0);
        let _ = Identifier::minecraft("stone");
        let _ = offline_uuid("test");
        let _: TypeResult<()> = Ok(());
    }

    #[test]
    fn mixed_sequence_roundtrip() {
        let mut out = Vec::new();
        write_varint(&mut out, -300);
        write_string(&mut out, "hello");
        write_bool(&mut out, true);
        write_position(&mut out, Position::new(1, -2, 3));
        write_angle(&mut out, Angle::from_steps(200));

        let mut reader = ByteReader::new(&out);
        assert_eq!(read_varint(&mut reader).unwrap(), -300);
        assert_eq!(read_string(&mut reader).unwrap(), "hello");
        assert!(read_bool(&mut reader).unwrap());
        assert_eq!(read_position(&mut reader).unwrap(), Position::new(1, -2, 3));
        assert_eq!(read_angle(&mut reader).unwrap().steps(), 200);
        assert!(reader.is_empty());
    }
}
