//! Packet schema model for the Minecraft Java Edition protocol.
//!
//! This crate defines how packets are described for encoding and decoding:
//! - Connection [`Phase`]s and packet [`Direction`]s, which together with
//!   the packet id form a packet's identity
//! - [`FieldKind`] wire encodings and [`Dependency`] references to earlier
//!   fields (array counts, option presence, trailing data)
//! - [`PacketSchema`] ordered field lists with validation
//! - A [`Registry`] lookup table keyed by `(direction, phase, id)`
//!
//! # Design Principles
//!
//! - **Runtime tables** - Schemas are plain data built at startup, not
//!   type-level programs.
//! - **Validated dependencies** - Every dependency must name a field that
//!   precedes the referrer, checked before a schema enters a registry.
//! - **No wire knowledge** - Byte-level encoding lives in `mctype` and
//!   `codec`; this crate only describes shapes.

mod error;
mod field;
mod packet;
mod registry;

pub use error::{SchemaError, SchemaResult};
pub use field::{Dependency, FieldKind, FieldSpec};
pub use packet::PacketSchema;
pub use registry::Registry;

/// Direction a packet travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Client to server.
    Serverbound,
    /// Server to client.
    Clientbound,
}

/// Connection phase selecting a packet-id namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Handshake,
    Status,
    Login,
    Configuration,
    Play,
}
