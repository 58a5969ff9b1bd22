//! Packet tables and constructors for Minecraft protocol 765 (1.20.x).
//!
//! This crate binds the abstract schema model to the concrete protocol:
//! the clientbound and serverbound packet tables for every phase, packet id
//! constants, and typed constructors for the packets a client emits.
//!
//! The tables cover the full state machine plus the Play packets the
//! reference traffic exercises; ids not present here decode as unknown
//! packets and flow through the unknown-packet handler.

mod outbound;
mod tables;

use std::sync::OnceLock;

use schema::Registry;

pub use outbound::{
    configuration_keep_alive, configuration_pong, finish_configuration, handshake, keep_alive,
    login_acknowledged, login_plugin_response, login_start, status_ping, status_request,
    teleport_confirm, NextState,
};
pub use tables::{clientbound, serverbound};

/// The protocol version this crate implements.
pub const PROTOCOL_VERSION: i32 = 765;

/// The default server port.
pub const DEFAULT_PORT: u16 = 25565;

/// Packet id constants, namespaced by direction and phase.
pub mod id {
    /// Serverbound (client → server) packet ids.
    pub mod serverbound {
        pub mod handshake {
            pub const HANDSHAKE: i32 = 0x00;
        }
        pub mod status {
            pub const REQUEST: i32 = 0x00;
            pub const PING: i32 = 0x01;
        }
        pub mod login {
            pub const LOGIN_START: i32 = 0x00;
            pub const ENCRYPTION_RESPONSE: i32 = 0x01;
            pub const LOGIN_PLUGIN_RESPONSE: i32 = 0x02;
            pub const LOGIN_ACKNOWLEDGED: i32 = 0x03;
        }
        pub mod configuration {
            pub const FINISH_CONFIGURATION: i32 = 0x02;
            pub const KEEP_ALIVE: i32 = 0x03;
            pub const PONG: i32 = 0x04;
        }
        pub mod play {
            pub const TELEPORT_CONFIRM: i32 = 0x00;
            pub const KEEP_ALIVE: i32 = 0x10;
        }
    }

    /// Clientbound (server → client) packet ids.
    pub mod clientbound {
        pub mod status {
            pub const RESPONSE: i32 = 0x00;
            pub const PONG: i32 = 0x01;
        }
        pub mod login {
            pub const DISCONNECT: i32 = 0x00;
            pub const ENCRYPTION_REQUEST: i32 = 0x01;
            pub const LOGIN_SUCCESS: i32 = 0x02;
            pub const SET_COMPRESSION: i32 = 0x03;
            pub const LOGIN_PLUGIN_REQUEST: i32 = 0x04;
        }
        pub mod configuration {
            pub const DISCONNECT: i32 = 0x01;
            pub const FINISH_CONFIGURATION: i32 = 0x02;
            pub const KEEP_ALIVE: i32 = 0x03;
            pub const PING: i32 = 0x04;
        }
        pub mod play {
            pub const SPAWN_ENTITY: i32 = 0x00;
            pub const SPAWN_EXPERIENCE_ORB: i32 = 0x01;
            pub const CHANGE_DIFFICULTY: i32 = 0x0B;
            pub const DISCONNECT: i32 = 0x1B;
            pub const KEEP_ALIVE: i32 = 0x24;
            pub const SET_ENTITY_VELOCITY: i32 = 0x26;
            pub const LOGIN: i32 = 0x29;
            pub const SET_EXPERIENCE: i32 = 0x2C;
            pub const SPAWN_PLAYER: i32 = 0x3C;
            pub const SYNCHRONIZE_PLAYER_POSITION: i32 = 0x3E;
            pub const SET_ENTITY_METADATA: i32 = 0x56;
            pub const UPDATE_SECTION_BLOCKS: i32 = 0x58;
            pub const UPDATE_RECIPES: i32 = 0x66;
        }
    }
}

/// Returns the process-wide protocol-765 registry.
pub fn registry() -> &'static Registry {
    static REGISTRY: OnceLock<Registry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut schemas = serverbound();
        schemas.extend(clientbound());
        Registry::from_schemas(schemas).expect("protocol tables must be valid")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schema::{Direction, Phase};

    #[test]
    fn registry_builds_and_covers_both_directions() {
        let registry = registry();
        assert!(registry.len() >= 30);
        assert!(registry
            .get(
                Direction::Serverbound,
                Phase::Handshake,
                id::serverbound::handshake::HANDSHAKE
            )
            .is_some());
        assert!(registry
            .get(Direction::Clientbound, Phase::Play, id::clientbound::play::LOGIN)
            .is_some());
    }

    #[test]
    fn keep_alive_ids_differ_per_direction() {
        let registry = registry();
        let inbound = registry
            .get(
                Direction::Clientbound,
                Phase::Play,
                id::clientbound::play::KEEP_ALIVE,
            )
            .unwrap();
        let outbound = registry
            .get(Direction::Serverbound, Phase::Play, id::serverbound::play::KEEP_ALIVE)
            .unwrap();
        assert_eq!(inbound.name, "KeepAlive");
        assert_eq!(outbound.name, "KeepAlive");
        assert_ne!(inbound.id, outbound.id);
    }

    #[test]
    fn unknown_play_id_is_absent() {
        assert!(registry()
            .get(Direction::Clientbound, Phase::Play, 0xFE)
            .is_none());
    }
}
