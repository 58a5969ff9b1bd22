//! Packet schema definitions and validation.

use crate::error::{SchemaError, SchemaResult};
use crate::field::{Dependency, FieldKind, FieldSpec};
use crate::{Direction, Phase};

/// An ordered field list bound to `(direction, phase, id)`.
///
/// Field order exactly matches wire order; the decoder walks fields in
/// declaration order and never reorders or looks ahead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketSchema {
    pub direction: Direction,
    pub phase: Phase,
    pub id: i32,
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

impl PacketSchema {
    /// Creates an empty schema for the given identity.
    #[must_use]
    pub const fn new(direction: Direction, phase: Phase, id: i32, name: &'static str) -> Self {
        Self {
            direction,
            phase,
            id,
            name,
            fields: Vec::new(),
        }
    }

    /// Appends a field to the schema.
    #[must_use]
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Returns the index of a field by name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.name == name)
    }

    /// Validates schema invariants.
    ///
    /// Every `OnField` dependency must resolve to a distinct field that
    /// precedes the referrer, names must be unique, and dependencies may
    /// only be attached to kinds that consume them.
    pub fn validate(&self) -> SchemaResult<()> {
        for (index, field) in self.fields.iter().enumerate() {
            if self.fields[..index].iter().any(|f| f.name == field.name) {
                return Err(SchemaError::DuplicateField {
                    packet: self.name,
                    field: field.name,
                });
            }

            match field.dep {
                Dependency::None => {
                    if field.kind.wants_dependency() {
                        return Err(SchemaError::InvalidDependency {
                            packet: self.name,
                            field: field.name,
                        });
                    }
                }
                Dependency::OnField(target) => {
                    if !field.kind.wants_dependency() {
                        return Err(SchemaError::InvalidDependency {
                            packet: self.name,
                            field: field.name,
                        });
                    }
                    let resolves_earlier = self.fields[..index]
                        .iter()
                        .any(|earlier| earlier.name == target);
                    if !resolves_earlier {
                        return Err(SchemaError::UnresolvedDependency {
                            packet: self.name,
                            field: field.name,
                            target,
                        });
                    }
                }
                Dependency::Rest => {
                    if !matches!(field.kind, FieldKind::Array(_)) {
                        return Err(SchemaError::InvalidDependency {
                            packet: self.name,
                            field: field.name,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> PacketSchema {
        PacketSchema::new(Direction::Clientbound, Phase::Login, 0x01, "EncryptionRequest")
    }

    #[test]
    fn valid_dependency_chain() {
        let schema = schema()
            .field(FieldSpec::new("ServerID", FieldKind::String))
            .field(FieldSpec::new("PublicKeyLength", FieldKind::VarInt))
            .field(FieldSpec::on_field(
                "PublicKey",
                FieldKind::byte_array(),
                "PublicKeyLength",
            ));
        schema.validate().unwrap();
        assert_eq!(schema.index_of("PublicKey"), Some(2));
        assert_eq!(schema.index_of("Missing"), None);
    }

    #[test]
    fn rejects_forward_dependency() {
        let schema = schema()
            .field(FieldSpec::on_field(
                "PublicKey",
                FieldKind::byte_array(),
                "PublicKeyLength",
            ))
            .field(FieldSpec::new("PublicKeyLength", FieldKind::VarInt));
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedDependency { .. }));
    }

    #[test]
    fn rejects_self_dependency() {
        let schema = schema().field(FieldSpec::on_field(
            "Data",
            FieldKind::byte_array(),
            "Data",
        ));
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::UnresolvedDependency { .. }));
    }

    #[test]
    fn rejects_duplicate_field_names() {
        let schema = schema()
            .field(FieldSpec::new("Payload", FieldKind::Long))
            .field(FieldSpec::new("Payload", FieldKind::Long));
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { .. }));
    }

    #[test]
    fn rejects_array_without_dependency() {
        let schema = schema().field(FieldSpec::new("Data", FieldKind::byte_array()));
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDependency { .. }));
    }

    #[test]
    fn rejects_dependency_on_plain_field() {
        let schema = schema()
            .field(FieldSpec::new("A", FieldKind::VarInt))
            .field(FieldSpec::on_field("B", FieldKind::VarInt, "A"));
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDependency { .. }));
    }

    #[test]
    fn rejects_rest_on_non_array() {
        let schema = schema().field(FieldSpec::rest("Data", FieldKind::String));
        let err = schema.validate().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDependency { .. }));
    }

    #[test]
    fn empty_schema_is_valid() {
        schema().validate().unwrap();
    }
}
