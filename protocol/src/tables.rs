//! The protocol-765 packet tables.

use schema::{Direction, FieldKind, FieldSpec, PacketSchema, Phase};

use crate::id;

fn varlong_array() -> FieldKind {
    FieldKind::Array(Box::new(FieldKind::VarLong))
}

/// Serverbound (client → server) schemas.
pub fn serverbound() -> Vec<PacketSchema> {
    use Direction::Serverbound as Out;
    vec![
        PacketSchema::new(Out, Phase::Handshake, id::serverbound::handshake::HANDSHAKE, "Handshake")
            .field(FieldSpec::new("ProtocolVersion", FieldKind::VarInt))
            .field(FieldSpec::new("ServerAddress", FieldKind::String))
            .field(FieldSpec::new("ServerPort", FieldKind::UShort))
            .field(FieldSpec::new("NextState", FieldKind::VarInt)),
        PacketSchema::new(Out, Phase::Status, id::serverbound::status::REQUEST, "Request"),
        PacketSchema::new(Out, Phase::Status, id::serverbound::status::PING, "Ping")
            .field(FieldSpec::new("Payload", FieldKind::Long)),
        PacketSchema::new(Out, Phase::Login, id::serverbound::login::LOGIN_START, "LoginStart")
            .field(FieldSpec::new("Name", FieldKind::String))
            .field(FieldSpec::new("UUID", FieldKind::Uuid)),
        PacketSchema::new(
            Out,
            Phase::Login,
            id::serverbound::login::ENCRYPTION_RESPONSE,
            "EncryptionResponse",
        )
        .field(FieldSpec::new("SharedSecretLength", FieldKind::VarInt))
        .field(FieldSpec::on_field(
            "SharedSecret",
            FieldKind::byte_array(),
            "SharedSecretLength",
        ))
        .field(FieldSpec::new("VerifyTokenLength", FieldKind::VarInt))
        .field(FieldSpec::on_field(
            "VerifyToken",
            FieldKind::byte_array(),
            "VerifyTokenLength",
        )),
        PacketSchema::new(
            Out,
            Phase::Login,
            id::serverbound::login::LOGIN_PLUGIN_RESPONSE,
            "LoginPluginResponse",
        )
        .field(FieldSpec::new("MessageID", FieldKind::VarInt))
        .field(FieldSpec::new("Successful", FieldKind::Boolean))
        .field(FieldSpec::rest("Data", FieldKind::byte_array())),
        PacketSchema::new(
            Out,
            Phase::Login,
            id::serverbound::login::LOGIN_ACKNOWLEDGED,
            "LoginAcknowledged",
        ),
        PacketSchema::new(
            Out,
            Phase::Configuration,
            id::serverbound::configuration::FINISH_CONFIGURATION,
            "FinishConfiguration",
        ),
        PacketSchema::new(
            Out,
            Phase::Configuration,
            id::serverbound::configuration::KEEP_ALIVE,
            "KeepAlive",
        )
        .field(FieldSpec::new("KeepAliveID", FieldKind::Long)),
        PacketSchema::new(Out, Phase::Configuration, id::serverbound::configuration::PONG, "Pong")
            .field(FieldSpec::new("ID", FieldKind::Int)),
        PacketSchema::new(
            Out,
            Phase::Play,
            id::serverbound::play::TELEPORT_CONFIRM,
            "TeleportConfirm",
        )
        .field(FieldSpec::new("TeleportID", FieldKind::VarInt)),
        PacketSchema::new(Out, Phase::Play, id::serverbound::play::KEEP_ALIVE, "KeepAlive")
            .field(FieldSpec::new("KeepAliveID", FieldKind::Long)),
    ]
}

/// Clientbound (server → client) schemas.
pub fn clientbound() -> Vec<PacketSchema> {
    use Direction::Clientbound as In;
    vec![
        PacketSchema::new(In, Phase::Status, id::clientbound::status::RESPONSE, "Response")
            .field(FieldSpec::new("JSON", FieldKind::String)),
        PacketSchema::new(In, Phase::Status, id::clientbound::status::PONG, "Pong")
            .field(FieldSpec::new("Payload", FieldKind::Long)),
        PacketSchema::new(In, Phase::Login, id::clientbound::login::DISCONNECT, "Disconnect")
            .field(FieldSpec::new("Reason", FieldKind::String)),
        PacketSchema::new(
            In,
            Phase::Login,
            id::clientbound::login::ENCRYPTION_REQUEST,
            "EncryptionRequest",
        )
        .field(FieldSpec::new("ServerID", FieldKind::String))
        .field(FieldSpec::new("PublicKeyLength", FieldKind::VarInt))
        .field(FieldSpec::on_field(
            "PublicKey",
            FieldKind::byte_array(),
            "PublicKeyLength",
        ))
        .field(FieldSpec::new("VerifyTokenLength", FieldKind::VarInt))
        .field(FieldSpec::on_field(
            "VerifyToken",
            FieldKind::byte_array(),
            "VerifyTokenLength",
        )),
        PacketSchema::new(In, Phase::Login, id::clientbound::login::LOGIN_SUCCESS, "LoginSuccess")
            .field(FieldSpec::new("UUID", FieldKind::Uuid))
            .field(FieldSpec::new("Username", FieldKind::String)),
        PacketSchema::new(
            In,
            Phase::Login,
            id::clientbound::login::SET_COMPRESSION,
            "SetCompression",
        )
        .field(FieldSpec::new("Threshold", FieldKind::VarInt)),
        PacketSchema::new(
            In,
            Phase::Login,
            id::clientbound::login::LOGIN_PLUGIN_REQUEST,
            "LoginPluginRequest",
        )
        .field(FieldSpec::new("MessageID", FieldKind::VarInt))
        .field(FieldSpec::new("Channel", FieldKind::String))
        .field(FieldSpec::rest("Data", FieldKind::byte_array())),
        PacketSchema::new(
            In,
            Phase::Configuration,
            id::clientbound::configuration::DISCONNECT,
            "Disconnect",
        )
        .field(FieldSpec::new("Reason", FieldKind::String)),
        PacketSchema::new(
            In,
            Phase::Configuration,
            id::clientbound::configuration::FINISH_CONFIGURATION,
            "FinishConfiguration",
        ),
        PacketSchema::new(
            In,
            Phase::Configuration,
            id::clientbound::configuration::KEEP_ALIVE,
            "KeepAlive",
        )
        .field(FieldSpec::new("KeepAliveID", FieldKind::Long)),
        PacketSchema::new(In, Phase::Configuration, id::clientbound::configuration::PING, "Ping")
            .field(FieldSpec::new("ID", FieldKind::Int)),
        PacketSchema::new(In, Phase::Play, id::clientbound::play::SPAWN_ENTITY, "SpawnEntity")
            .field(FieldSpec::new("EntityID", FieldKind::VarInt))
            .field(FieldSpec::new("UUID", FieldKind::Uuid))
            .field(FieldSpec::new("Type", FieldKind::VarInt))
            .field(FieldSpec::new("X", FieldKind::Double))
            .field(FieldSpec::new("Y", FieldKind::Double))
            .field(FieldSpec::new("Z", FieldKind::Double))
            .field(FieldSpec::new("Pitch", FieldKind::Angle))
            .field(FieldSpec::new("Yaw", FieldKind::Angle))
            .field(FieldSpec::new("Data", FieldKind::Int))
            .field(FieldSpec::new("VelocityX", FieldKind::Short))
            .field(FieldSpec::new("VelocityY", FieldKind::Short))
            .field(FieldSpec::new("VelocityZ", FieldKind::Short)),
        PacketSchema::new(
            In,
            Phase::Play,
            id::clientbound::play::SPAWN_EXPERIENCE_ORB,
            "SpawnExperienceOrb",
        )
        .field(FieldSpec::new("EntityID", FieldKind::VarInt))
        .field(FieldSpec::new("X", FieldKind::Double))
        .field(FieldSpec::new("Y", FieldKind::Double))
        .field(FieldSpec::new("Z", FieldKind::Double))
        .field(FieldSpec::new("Count", FieldKind::Short)),
        PacketSchema::new(
            In,
            Phase::Play,
            id::clientbound::play::CHANGE_DIFFICULTY,
            "ChangeDifficulty",
        )
        .field(FieldSpec::new("Difficulty", FieldKind::UByte))
        .field(FieldSpec::new("DifficultyLocked", FieldKind::Boolean)),
        PacketSchema::new(In, Phase::Play, id::clientbound::play::DISCONNECT, "Disconnect")
            .field(FieldSpec::new("Reason", FieldKind::String)),
        PacketSchema::new(In, Phase::Play, id::clientbound::play::KEEP_ALIVE, "KeepAlive")
            .field(FieldSpec::new("KeepAliveID", FieldKind::Long)),
        PacketSchema::new(
            In,
            Phase::Play,
            id::clientbound::play::SET_ENTITY_VELOCITY,
            "SetEntityVelocity",
        )
        .field(FieldSpec::new("EntityID", FieldKind::VarInt))
        .field(FieldSpec::new("VelocityX", FieldKind::Short))
        .field(FieldSpec::new("VelocityY", FieldKind::Short))
        .field(FieldSpec::new("VelocityZ", FieldKind::Short)),
        PacketSchema::new(In, Phase::Play, id::clientbound::play::LOGIN, "Login")
            .field(FieldSpec::new("EntityID", FieldKind::Int))
            .field(FieldSpec::new("IsHardcore", FieldKind::Boolean))
            .field(FieldSpec::new(
                "DimensionNames",
                FieldKind::PrefixedArray(Box::new(FieldKind::Identifier)),
            ))
            .field(FieldSpec::new("MaxPlayers", FieldKind::VarInt))
            .field(FieldSpec::new("ViewDistance", FieldKind::VarInt))
            .field(FieldSpec::new("SimulationDistance", FieldKind::VarInt))
            .field(FieldSpec::new("ReducedDebugInfo", FieldKind::Boolean))
            .field(FieldSpec::new("EnableRespawnScreen", FieldKind::Boolean))
            .field(FieldSpec::new("DoLimitedCrafting", FieldKind::Boolean))
            .field(FieldSpec::new("DimensionType", FieldKind::VarInt))
            .field(FieldSpec::new("DimensionName", FieldKind::Identifier))
            .field(FieldSpec::new("HashedSeed", FieldKind::Long))
            .field(FieldSpec::new("GameMode", FieldKind::UByte))
            .field(FieldSpec::new("PreviousGameMode", FieldKind::Byte))
            .field(FieldSpec::new("IsDebug", FieldKind::Boolean))
            .field(FieldSpec::new("IsFlat", FieldKind::Boolean))
            .field(FieldSpec::new("HasDeathLocation", FieldKind::Boolean))
            .field(FieldSpec::on_field(
                "DeathDimensionName",
                FieldKind::Option(Box::new(FieldKind::Identifier)),
                "HasDeathLocation",
            ))
            .field(FieldSpec::on_field(
                "DeathLocation",
                FieldKind::Option(Box::new(FieldKind::Position)),
                "HasDeathLocation",
            ))
            .field(FieldSpec::new("PortalCooldown", FieldKind::VarInt))
            .field(FieldSpec::new("SeaLevel", FieldKind::VarInt))
            .field(FieldSpec::new("EnforcesSecureChat", FieldKind::Boolean)),
        PacketSchema::new(In, Phase::Play, id::clientbound::play::SET_EXPERIENCE, "SetExperience")
            .field(FieldSpec::new("ExperienceBar", FieldKind::Float))
            .field(FieldSpec::new("Level", FieldKind::VarInt))
            .field(FieldSpec::new("TotalExperience", FieldKind::VarInt)),
        PacketSchema::new(In, Phase::Play, id::clientbound::play::SPAWN_PLAYER, "SpawnPlayer")
            .field(FieldSpec::new("EntityID", FieldKind::VarInt))
            .field(FieldSpec::new("UUID", FieldKind::Uuid))
            .field(FieldSpec::new("X", FieldKind::Double))
            .field(FieldSpec::new("Y", FieldKind::Double))
            .field(FieldSpec::new("Z", FieldKind::Double))
            .field(FieldSpec::new("Yaw", FieldKind::Angle))
            .field(FieldSpec::new("Pitch", FieldKind::Angle)),
        PacketSchema::new(
            In,
            Phase::Play,
            id::clientbound::play::SYNCHRONIZE_PLAYER_POSITION,
            "SynchronizePlayerPosition",
        )
        .field(FieldSpec::new("X", FieldKind::Double))
        .field(FieldSpec::new("Y", FieldKind::Double))
        .field(FieldSpec::new("Z", FieldKind::Double))
        .field(FieldSpec::new("Yaw", FieldKind::Float))
        .field(FieldSpec::new("Pitch", FieldKind::Float))
        .field(FieldSpec::new("Flags", FieldKind::Byte))
        .field(FieldSpec::new("TeleportID", FieldKind::VarInt)),
        PacketSchema::new(
            In,
            Phase::Play,
            id::clientbound::play::SET_ENTITY_METADATA,
            "SetEntityMetadata",
        )
        .field(FieldSpec::new("EntityID", FieldKind::VarInt))
        .field(FieldSpec::new(
            "Metadata",
            FieldKind::Compound(vec![FieldKind::UByte, FieldKind::VarInt]),
        )),
        PacketSchema::new(
            In,
            Phase::Play,
            id::clientbound::play::UPDATE_SECTION_BLOCKS,
            "UpdateSectionBlocks",
        )
        .field(FieldSpec::new("ChunkSectionPosition", FieldKind::Long))
        .field(FieldSpec::new("BlocksArraySize", FieldKind::VarInt))
        .field(FieldSpec::on_field("Blocks", varlong_array(), "BlocksArraySize")),
        PacketSchema::new(
            In,
            Phase::Play,
            id::clientbound::play::UPDATE_RECIPES,
            "UpdateRecipes",
        )
        .field(FieldSpec::new("NumRecipes", FieldKind::VarInt))
        .field(FieldSpec::on_field(
            "Recipes",
            FieldKind::Array(Box::new(FieldKind::Identifier)),
            "NumRecipes",
        )),
    ]
}
