//! Routing of unframed packet payloads to decoded packets.

use codec::{decode_packet, decode_unknown, Packet, UnknownPacket};
use mctype::{read_varint, ByteReader};
use schema::{Direction, Phase, Registry};
use tracing::{debug, warn};

/// Decodes a packet payload received in `phase`.
///
/// Peeks the leading VarInt id, looks up the clientbound schema for
/// `(phase, id)`, and decodes against it. Unknown ids and malformed known
/// packets both degrade to [`Packet::Unknown`]; decoding never fails the
/// connection.
#[must_use]
pub fn decode_payload(registry: &Registry, phase: Phase, payload: &[u8]) -> Packet {
    let mut reader = ByteReader::new(payload);
    let id = match read_varint(&mut reader) {
        Ok(id) => id,
        Err(err) => {
            warn!(%err, "unreadable packet id, treating as unknown");
            return Packet::Unknown(UnknownPacket {
                id: -1,
                data: payload.to_vec(),
            });
        }
    };

    let Some(packet_schema) = registry.get(Direction::Clientbound, phase, id) else {
        debug!(id = format_args!("{id:#04x}"), ?phase, "no schema for packet");
        return unknown_fallback(payload, id);
    };

    match decode_packet(packet_schema, payload) {
        Ok(decoded) => {
            if decoded.trailing > 0 {
                warn!(
                    packet = decoded.packet.name,
                    trailing = decoded.trailing,
                    "schema did not cover the whole payload"
                );
            }
            Packet::Known(decoded.packet)
        }
        Err(err) => {
            warn!(packet = packet_schema.name, %err, "decode failed, treating as unknown");
            unknown_fallback(payload, id)
        }
    }
}

fn unknown_fallback(payload: &[u8], id: i32) -> Packet {
    match decode_unknown(payload) {
        Ok(unknown) => Packet::Unknown(unknown),
        Err(_) => Packet::Unknown(UnknownPacket {
            id,
            data: payload.to_vec(),
        }),
    }
}
