//! Registry of packet schemas keyed by direction, phase, and id.

use std::collections::HashMap;

use crate::error::{SchemaError, SchemaResult};
use crate::packet::PacketSchema;
use crate::{Direction, Phase};

/// A validated lookup table over packet schemas.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    packets: HashMap<(Direction, Phase, i32), PacketSchema>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry from schemas after validating each one.
    pub fn from_schemas(schemas: Vec<PacketSchema>) -> SchemaResult<Self> {
        let mut registry = Self::new();
        for schema in schemas {
            registry.insert(schema)?;
        }
        Ok(registry)
    }

    /// Validates and inserts a schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicatePacket`] if the identity is already
    /// registered, or the schema's own validation error.
    pub fn insert(&mut self, schema: PacketSchema) -> SchemaResult<()> {
        schema.validate()?;
        let key = (schema.direction, schema.phase, schema.id);
        if self.packets.contains_key(&key) {
            return Err(SchemaError::DuplicatePacket {
                packet: schema.name,
                id: schema.id,
            });
        }
        self.packets.insert(key, schema);
        Ok(())
    }

    /// Looks up the schema for a packet identity.
    #[must_use]
    pub fn get(&self, direction: Direction, phase: Phase, id: i32) -> Option<&PacketSchema> {
        self.packets.get(&(direction, phase, id))
    }

    /// Returns the number of registered schemas.
    #[must_use]
    pub fn len(&self) -> usize {
        self.packets.len()
    }

    /// Returns `true` if no schemas are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.packets.is_empty()
    }

    /// Iterates over all registered schemas.
    pub fn iter(&self) -> impl Iterator<Item = &PacketSchema> {
        self.packets.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldKind, FieldSpec};

    fn keep_alive(phase: Phase, id: i32) -> PacketSchema {
        PacketSchema::new(Direction::Clientbound, phase, id, "KeepAlive")
            .field(FieldSpec::new("KeepAliveID", FieldKind::Long))
    }

    #[test]
    fn insert_and_lookup() {
        let registry = Registry::from_schemas(vec![keep_alive(Phase::Play, 0x24)]).unwrap();
        assert_eq!(registry.len(), 1);

        let schema = registry
            .get(Direction::Clientbound, Phase::Play, 0x24)
            .unwrap();
        assert_eq!(schema.name, "KeepAlive");
        assert!(registry.get(Direction::Serverbound, Phase::Play, 0x24).is_none());
        assert!(registry.get(Direction::Clientbound, Phase::Login, 0x24).is_none());
    }

    #[test]
    fn phases_namespace_ids() {
        let registry = Registry::from_schemas(vec![
            keep_alive(Phase::Play, 0x24),
            keep_alive(Phase::Configuration, 0x03),
        ])
        .unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn duplicate_identity_rejected() {
        let err = Registry::from_schemas(vec![
            keep_alive(Phase::Play, 0x24),
            keep_alive(Phase::Play, 0x24),
        ])
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicatePacket { .. }));
    }

    #[test]
    fn insert_validates_schema() {
        let bad = PacketSchema::new(Direction::Clientbound, Phase::Play, 0x00, "Bad")
            .field(FieldSpec::new("Data", FieldKind::byte_array()));
        let mut registry = Registry::new();
        assert!(registry.insert(bad).is_err());
        assert!(registry.is_empty());
    }
}
