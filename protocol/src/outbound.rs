//! Constructors for the serverbound packets the client emits.

use codec::{FieldValue, KnownPacket};
use mctype::Uuid;
use schema::{Direction, Phase};

use crate::id;

/// The state a handshake asks the server to switch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextState {
    Status = 1,
    Login = 2,
}

fn outbound(
    phase: Phase,
    packet_id: i32,
    name: &'static str,
    fields: Vec<(&'static str, FieldValue)>,
) -> KnownPacket {
    KnownPacket {
        direction: Direction::Serverbound,
        phase,
        id: packet_id,
        name,
        fields,
    }
}

/// Handshake opening the connection and selecting the next phase.
#[must_use]
pub fn handshake(address: &str, port: u16, next: NextState) -> KnownPacket {
    outbound(
        Phase::Handshake,
        id::serverbound::handshake::HANDSHAKE,
        "Handshake",
        vec![
            ("ProtocolVersion", FieldValue::VarInt(crate::PROTOCOL_VERSION)),
            ("ServerAddress", FieldValue::String(address.to_owned())),
            ("ServerPort", FieldValue::UShort(port)),
            ("NextState", FieldValue::VarInt(next as i32)),
        ],
    )
}

/// Status request (empty body).
#[must_use]
pub fn status_request() -> KnownPacket {
    outbound(
        Phase::Status,
        id::serverbound::status::REQUEST,
        "Request",
        Vec::new(),
    )
}

/// Status ping carrying an arbitrary payload the server echoes back.
#[must_use]
pub fn status_ping(payload: i64) -> KnownPacket {
    outbound(
        Phase::Status,
        id::serverbound::status::PING,
        "Ping",
        vec![("Payload", FieldValue::Long(payload))],
    )
}

/// Login start with the player name and its offline-mode UUID.
#[must_use]
pub fn login_start(name: &str, uuid: Uuid) -> KnownPacket {
    outbound(
        Phase::Login,
        id::serverbound::login::LOGIN_START,
        "LoginStart",
        vec![
            ("Name", FieldValue::String(name.to_owned())),
            ("UUID", FieldValue::Uuid(uuid)),
        ],
    )
}

/// Answers a LoginPluginRequest. A client that does not understand the
/// channel responds with `successful = false` and no data.
#[must_use]
pub fn login_plugin_response(message_id: i32, successful: bool, data: &[u8]) -> KnownPacket {
    outbound(
        Phase::Login,
        id::serverbound::login::LOGIN_PLUGIN_RESPONSE,
        "LoginPluginResponse",
        vec![
            ("MessageID", FieldValue::VarInt(message_id)),
            ("Successful", FieldValue::Boolean(successful)),
            ("Data", FieldValue::bytes(data)),
        ],
    )
}

/// Acknowledges LoginSuccess and enters the Configuration phase.
#[must_use]
pub fn login_acknowledged() -> KnownPacket {
    outbound(
        Phase::Login,
        id::serverbound::login::LOGIN_ACKNOWLEDGED,
        "LoginAcknowledged",
        Vec::new(),
    )
}

/// Acknowledges the server's FinishConfiguration and enters Play.
#[must_use]
pub fn finish_configuration() -> KnownPacket {
    outbound(
        Phase::Configuration,
        id::serverbound::configuration::FINISH_CONFIGURATION,
        "FinishConfiguration",
        Vec::new(),
    )
}

/// Configuration-phase keep-alive echo.
#[must_use]
pub fn configuration_keep_alive(keep_alive_id: i64) -> KnownPacket {
    outbound(
        Phase::Configuration,
        id::serverbound::configuration::KEEP_ALIVE,
        "KeepAlive",
        vec![("KeepAliveID", FieldValue::Long(keep_alive_id))],
    )
}

/// Configuration-phase pong echo.
#[must_use]
pub fn configuration_pong(ping_id: i32) -> KnownPacket {
    outbound(
        Phase::Configuration,
        id::serverbound::configuration::PONG,
        "Pong",
        vec![("ID", FieldValue::Int(ping_id))],
    )
}

/// Confirms a teleport from SynchronizePlayerPosition.
#[must_use]
pub fn teleport_confirm(teleport_id: i32) -> KnownPacket {
    outbound(
        Phase::Play,
        id::serverbound::play::TELEPORT_CONFIRM,
        "TeleportConfirm",
        vec![("TeleportID", FieldValue::VarInt(teleport_id))],
    )
}

/// Play-phase keep-alive echo.
#[must_use]
pub fn keep_alive(keep_alive_id: i64) -> KnownPacket {
    outbound(
        Phase::Play,
        id::serverbound::play::KEEP_ALIVE,
        "KeepAlive",
        vec![("KeepAliveID", FieldValue::Long(keep_alive_id))],
    )
}
