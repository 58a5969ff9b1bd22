//! Schema-driven packet encoding and decoding.
//!
//! Given a [`schema::PacketSchema`], this crate walks fields in declaration
//! order: encoding concatenates each field's wire form after the VarInt
//! packet id, decoding maintains a cursor and a partial value list that
//! dependency references (array counts, option presence, trailing data)
//! resolve into.
//!
//! Packets with no matching schema decode to [`UnknownPacket`], which
//! carries the raw id and payload and cannot be encoded.
//!
//! # Design Principles
//!
//! - **Schema is truth** - Field order, kinds, and dependencies come from
//!   the schema; the codec never reorders or looks ahead.
//! - **Tolerant decode** - Trailing payload bytes are reported, not
//!   rejected; schemas are incomplete for some packets.
//! - **Bounded decode** - All reads go through the bounds-checked cursor;
//!   malformed input returns errors, never panics.

mod error;
mod field;
mod packet;
mod value;

pub use error::{CodecError, CodecResult};
pub use field::{decode_field, encode_field, DepHint};
pub use packet::{
    decode_packet, decode_unknown, encode_packet, Decoded, KnownPacket, Packet, UnknownPacket,
};
pub use value::FieldValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn public_api_exports() {
        let _ = FieldValue::VarInt(0);
        let _ = DepHint::None;
        let _ = Packet::Unknown(UnknownPacket {
            id: 0,
            data: Vec::new(),
        });
        let _: CodecResult<()> = Ok(());
    }
}
