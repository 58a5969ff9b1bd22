//! Single-field encoding and decoding driven by a schema kind.

use mctype::{
    read_angle, read_bool, read_f32, read_f64, read_i16, read_i32, read_i64, read_i8,
    read_identifier, read_position, read_string, read_u16, read_u32, read_u64, read_u8, read_uuid,
    read_varint, read_varlong, write_angle, write_bool, write_f32, write_f64, write_i16,
    write_i32, write_i64, write_i8, write_identifier, write_position, write_string, write_u16,
    write_u32, write_u64, write_u8, write_uuid, write_varint, write_varlong, ByteReader,
};
use schema::FieldKind;

use crate::error::{CodecError, CodecResult};
use crate::value::FieldValue;

/// Externally-resolved count or presence for a dependent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepHint {
    /// The field is self-delimiting.
    None,
    /// Element count for an `Array`.
    Count(usize),
    /// Presence flag for an `Option`.
    Present(bool),
    /// The field consumes every remaining payload byte.
    Rest,
}

/// Decodes one field of the given kind from the reader.
///
/// `hint` carries the count or presence for dependency-driven kinds; it is
/// ignored by self-delimiting kinds.
///
/// # Errors
///
/// Propagates primitive codec errors; a dependent kind decoded without its
/// hint is a caller bug surfaced as [`CodecError::KindMismatch`] upstream,
/// so this function treats a missing hint as zero/absent.
pub fn decode_field(
    kind: &FieldKind,
    hint: DepHint,
    reader: &mut ByteReader<'_>,
) -> CodecResult<FieldValue> {
    Ok(match kind {
        FieldKind::VarInt => FieldValue::VarInt(read_varint(reader)?),
        FieldKind::VarLong => FieldValue::VarLong(read_varlong(reader)?),
        FieldKind::Byte => FieldValue::Byte(read_i8(reader)?),
        FieldKind::UByte => FieldValue::UByte(read_u8(reader)?),
        FieldKind::Short => FieldValue::Short(read_i16(reader)?),
        FieldKind::UShort => FieldValue::UShort(read_u16(reader)?),
        FieldKind::Int => FieldValue::Int(read_i32(reader)?),
        FieldKind::UInt => FieldValue::UInt(read_u32(reader)?),
        FieldKind::Long => FieldValue::Long(read_i64(reader)?),
        FieldKind::ULong => FieldValue::ULong(read_u64(reader)?),
        FieldKind::Float => FieldValue::Float(read_f32(reader)?),
        FieldKind::Double => FieldValue::Double(read_f64(reader)?),
        FieldKind::Boolean => FieldValue::Boolean(read_bool(reader)?),
        FieldKind::String => FieldValue::String(read_string(reader)?),
        FieldKind::Identifier => FieldValue::Identifier(read_identifier(reader)?),
        FieldKind::Uuid => FieldValue::Uuid(read_uuid(reader)?),
        FieldKind::Angle => FieldValue::Angle(read_angle(reader)?),
        FieldKind::Position => FieldValue::Position(read_position(reader)?),
        FieldKind::Array(element) => match hint {
            DepHint::Count(count) => {
                let mut items = Vec::with_capacity(count.min(4096));
                for _ in 0..count {
                    items.push(decode_field(element, DepHint::None, reader)?);
                }
                FieldValue::Array(items)
            }
            DepHint::Rest => {
                let mut items = Vec::new();
                while !reader.is_empty() {
                    items.push(decode_field(element, DepHint::None, reader)?);
                }
                FieldValue::Array(items)
            }
            _ => FieldValue::Array(Vec::new()),
        },
        FieldKind::PrefixedArray(element) => {
            let count = read_varint(reader)?.max(0) as usize;
            let mut items = Vec::with_capacity(count.min(4096));
            for _ in 0..count {
                items.push(decode_field(element, DepHint::None, reader)?);
            }
            FieldValue::Array(items)
        }
        FieldKind::Option(element) => match hint {
            DepHint::Present(true) => {
                FieldValue::Option(Some(Box::new(decode_field(element, DepHint::None, reader)?)))
            }
            _ => FieldValue::Option(None),
        },
        FieldKind::PrefixedOption(element) => {
            if read_bool(reader)? {
                FieldValue::Option(Some(Box::new(decode_field(element, DepHint::None, reader)?)))
            } else {
                FieldValue::Option(None)
            }
        }
        FieldKind::Compound(elements) => {
            let mut items = Vec::with_capacity(elements.len());
            for element in elements {
                items.push(decode_field(element, DepHint::None, reader)?);
            }
            FieldValue::Compound(items)
        }
    })
}

/// Encodes one field of the given kind into `out`.
///
/// # Errors
///
/// Returns [`CodecError::KindMismatch`] when the value variant does not
/// match the declared kind.
pub fn encode_field(
    name: &'static str,
    kind: &FieldKind,
    value: &FieldValue,
    out: &mut Vec<u8>,
) -> CodecResult<()> {
    let mismatch = || CodecError::KindMismatch { field: name };
    match (kind, value) {
        (FieldKind::VarInt, FieldValue::VarInt(v)) => write_varint(out, *v),
        (FieldKind::VarLong, FieldValue::VarLong(v)) => write_varlong(out, *v),
        (FieldKind::Byte, FieldValue::Byte(v)) => write_i8(out, *v),
        (FieldKind::UByte, FieldValue::UByte(v)) => write_u8(out, *v),
        (FieldKind::Short, FieldValue::Short(v)) => write_i16(out, *v),
        (FieldKind::UShort, FieldValue::UShort(v)) => write_u16(out, *v),
        (FieldKind::Int, FieldValue::Int(v)) => write_i32(out, *v),
        (FieldKind::UInt, FieldValue::UInt(v)) => write_u32(out, *v),
        (FieldKind::Long, FieldValue::Long(v)) => write_i64(out, *v),
        (FieldKind::ULong, FieldValue::ULong(v)) => write_u64(out, *v),
        (FieldKind::Float, FieldValue::Float(v)) => write_f32(out, *v),
        (FieldKind::Double, FieldValue::Double(v)) => write_f64(out, *v),
        (FieldKind::Boolean, FieldValue::Boolean(v)) => write_bool(out, *v),
        (FieldKind::String, FieldValue::String(v)) => write_string(out, v),
        (FieldKind::Identifier, FieldValue::Identifier(v)) => write_identifier(out, v),
        (FieldKind::Uuid, FieldValue::Uuid(v)) => write_uuid(out, *v),
        (FieldKind::Angle, FieldValue::Angle(v)) => write_angle(out, *v),
        (FieldKind::Position, FieldValue::Position(v)) => write_position(out, *v),
        (FieldKind::Array(element), FieldValue::Array(items)) => {
            for item in items {
                encode_field(name, element, item, out)?;
            }
        }
        (FieldKind::PrefixedArray(element), FieldValue::Array(items)) => {
            write_varint(out, items.len() as i32);
            for item in items {
                encode_field(name, element, item, out)?;
            }
        }
        (FieldKind::Option(element), FieldValue::Option(inner)) => {
            if let Some(inner) = inner {
                encode_field(name, element, inner, out)?;
            }
        }
        (FieldKind::PrefixedOption(element), FieldValue::Option(inner)) => {
            write_bool(out, inner.is_some());
            if let Some(inner) = inner {
                encode_field(name, element, inner, out)?;
            }
        }
        (FieldKind::Compound(elements), FieldValue::Compound(items)) => {
            if elements.len() != items.len() {
                return Err(mismatch());
            }
            for (element, item) in elements.iter().zip(items) {
                encode_field(name, element, item, out)?;
            }
        }
        _ => return Err(mismatch()),
    }
    Ok(())
}
