//! Whole-packet encoding and decoding against a schema.

use mctype::{read_varint, write_varint, ByteReader};
use schema::{Dependency, PacketSchema, Registry};

use crate::error::{CodecError, CodecResult};
use crate::field::{decode_field, encode_field, DepHint};
use crate::value::FieldValue;

/// A decoded packet with a matching schema.
#[derive(Debug, Clone, PartialEq)]
pub struct KnownPacket {
    pub direction: schema::Direction,
    pub phase: schema::Phase,
    pub id: i32,
    pub name: &'static str,
    pub fields: Vec<(&'static str, FieldValue)>,
}

impl KnownPacket {
    /// Returns a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(field_name, _)| *field_name == name)
            .map(|(_, value)| value)
    }
}

/// A packet with no matching schema: the raw id and payload bytes.
///
/// Unknown packets cannot be encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPacket {
    pub id: i32,
    pub data: Vec<u8>,
}

/// A decoded packet, known or unknown.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
    Known(KnownPacket),
    Unknown(UnknownPacket),
}

impl Packet {
    /// Returns the packet id regardless of shape.
    #[must_use]
    pub fn id(&self) -> i32 {
        match self {
            Self::Known(packet) => packet.id,
            Self::Unknown(packet) => packet.id,
        }
    }

    /// Encodes a known packet against its registry schema.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::UnencodableUnknown`] for unknown packets.
    pub fn encode(&self, registry: &Registry) -> CodecResult<Vec<u8>> {
        match self {
            Self::Known(packet) => {
                let schema = registry
                    .get(packet.direction, packet.phase, packet.id)
                    .ok_or(CodecError::UnencodableUnknown { id: packet.id })?;
                let values: Vec<FieldValue> =
                    packet.fields.iter().map(|(_, value)| value.clone()).collect();
                encode_packet(schema, &values)
            }
            Self::Unknown(packet) => Err(CodecError::UnencodableUnknown { id: packet.id }),
        }
    }
}

/// The result of decoding a packet payload: the packet plus any trailing
/// byte count the schema did not cover.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub packet: KnownPacket,
    /// Payload bytes left over after the last field. Schemas are
    /// incomplete for some packets, so trailing bytes are tolerated.
    pub trailing: usize,
}

/// Encodes a packet payload: `VarInt(id)` followed by each field in
/// declaration order.
///
/// Dependent count and presence fields must already be consistent with the
/// arrays and options they describe; the encoder does not rewrite them.
///
/// # Errors
///
/// Returns [`CodecError::FieldCount`] when `values` does not match the
/// schema arity and [`CodecError::KindMismatch`] on variant mismatches.
pub fn encode_packet(schema: &PacketSchema, values: &[FieldValue]) -> CodecResult<Vec<u8>> {
    if values.len() != schema.fields.len() {
        return Err(CodecError::FieldCount {
            packet: schema.name,
            expected: schema.fields.len(),
            found: values.len(),
        });
    }

    let mut out = Vec::new();
    write_varint(&mut out, schema.id);
    for (spec, value) in schema.fields.iter().zip(values) {
        encode_field(spec.name, &spec.kind, value, &mut out)?;
    }
    Ok(out)
}

/// Decodes a packet payload against a schema.
///
/// Walks the fields in declaration order, maintaining the partial value
/// list that dependency lookups resolve into.
///
/// # Errors
///
/// Returns [`CodecError::IdMismatch`] when the leading id differs from the
/// schema's, [`CodecError::DependencyValue`] when a dependency decoded to
/// something unusable, and primitive errors for malformed bytes.
pub fn decode_packet(schema: &PacketSchema, payload: &[u8]) -> CodecResult<Decoded> {
    let mut reader = ByteReader::new(payload);

    let id = read_varint(&mut reader)?;
    if id != schema.id {
        return Err(CodecError::IdMismatch {
            expected: schema.id,
            found: id,
        });
    }

    let mut fields: Vec<(&'static str, FieldValue)> = Vec::with_capacity(schema.fields.len());
    for spec in &schema.fields {
        let hint = match spec.dep {
            Dependency::None => DepHint::None,
            Dependency::Rest => DepHint::Rest,
            Dependency::OnField(target) => {
                let (_, value) = fields
                    .iter()
                    .find(|(name, _)| *name == target)
                    .ok_or(CodecError::DependencyValue {
                        field: spec.name,
                        target,
                    })?;
                if let Some(count) = value.as_count() {
                    DepHint::Count(count)
                } else if let Some(present) = value.as_bool() {
                    DepHint::Present(present)
                } else {
                    return Err(CodecError::DependencyValue {
                        field: spec.name,
                        target,
                    });
                }
            }
        };
        let value = decode_field(&spec.kind, hint, &mut reader)?;
        fields.push((spec.name, value));
    }

    Ok(Decoded {
        packet: KnownPacket {
            direction: schema.direction,
            phase: schema.phase,
            id: schema.id,
            name: schema.name,
            fields,
        },
        trailing: reader.remaining(),
    })
}

/// Decodes an unknown packet payload: the leading id plus the raw rest.
///
/// # Errors
///
/// Returns a primitive error if the id itself is malformed.
pub fn decode_unknown(payload: &[u8]) -> CodecResult<UnknownPacket> {
    let mut reader = ByteReader::new(payload);
    let id = read_varint(&mut reader)?;
    Ok(UnknownPacket {
        id,
        data: reader.take_rest().to_vec(),
    })
}
