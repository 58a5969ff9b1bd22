//! Field kind and dependency definitions.

/// The wire encoding of a single packet field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Variable-length 32-bit integer (1-5 bytes).
    VarInt,
    /// Variable-length 64-bit integer (1-10 bytes).
    VarLong,
    /// Signed 8-bit integer.
    Byte,
    /// Unsigned 8-bit integer.
    UByte,
    /// Signed 16-bit big-endian integer.
    Short,
    /// Unsigned 16-bit big-endian integer.
    UShort,
    /// Signed 32-bit big-endian integer.
    Int,
    /// Unsigned 32-bit big-endian integer.
    UInt,
    /// Signed 64-bit big-endian integer.
    Long,
    /// Unsigned 64-bit big-endian integer.
    ULong,
    /// IEEE 754 binary32, big-endian.
    Float,
    /// IEEE 754 binary64, big-endian.
    Double,
    /// Single byte, `0x00` or `0x01`.
    Boolean,
    /// VarInt-length-prefixed UTF-8 text.
    String,
    /// `namespace:path` resource location, encoded as a string.
    Identifier,
    /// 16 raw bytes.
    Uuid,
    /// Rotation in 1/256-turn steps, one byte.
    Angle,
    /// Packed 26/12/26-bit block position, eight bytes.
    Position,
    /// Repeated element whose count comes from a dependency.
    Array(Box<FieldKind>),
    /// VarInt count followed by that many elements.
    PrefixedArray(Box<FieldKind>),
    /// Element whose presence comes from a dependency Boolean; zero bytes
    /// when absent.
    Option(Box<FieldKind>),
    /// Boolean presence flag followed by the element when true.
    PrefixedOption(Box<FieldKind>),
    /// Fixed-arity heterogeneous tuple, elements concatenated.
    Compound(Vec<FieldKind>),
}

impl FieldKind {
    /// Returns `true` if this kind consumes its count or presence from a
    /// dependency instead of the wire.
    #[must_use]
    pub fn wants_dependency(&self) -> bool {
        matches!(self, Self::Array(_) | Self::Option(_))
    }

    /// Shorthand for an `Array` of raw bytes.
    #[must_use]
    pub fn byte_array() -> Self {
        Self::Array(Box::new(Self::UByte))
    }
}

/// How a field obtains its externally-supplied count or presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dependency {
    /// The field is self-delimiting.
    None,
    /// Count or presence is the decoded value of the named earlier field.
    OnField(&'static str),
    /// The field consumes every byte remaining in the packet payload.
    Rest,
}

/// A named, typed field within a packet schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub dep: Dependency,
}

impl FieldSpec {
    /// Creates a self-delimiting field.
    #[must_use]
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            dep: Dependency::None,
        }
    }

    /// Creates a field whose count or presence comes from `target`.
    #[must_use]
    pub const fn on_field(name: &'static str, kind: FieldKind, target: &'static str) -> Self {
        Self {
            name,
            kind,
            dep: Dependency::OnField(target),
        }
    }

    /// Creates a field consuming the rest of the payload.
    #[must_use]
    pub const fn rest(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            dep: Dependency::Rest,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dependency_wanting_kinds() {
        assert!(FieldKind::Array(Box::new(FieldKind::VarInt)).wants_dependency());
        assert!(FieldKind::Option(Box::new(FieldKind::Position)).wants_dependency());
        assert!(!FieldKind::PrefixedArray(Box::new(FieldKind::VarInt)).wants_dependency());
        assert!(!FieldKind::PrefixedOption(Box::new(FieldKind::String)).wants_dependency());
        assert!(!FieldKind::VarInt.wants_dependency());
    }

    #[test]
    fn byte_array_shorthand() {
        let kind = FieldKind::byte_array();
        assert!(matches!(kind, FieldKind::Array(inner) if *inner == FieldKind::UByte));
    }

    #[test]
    fn field_spec_constructors() {
        let plain = FieldSpec::new("Threshold", FieldKind::VarInt);
        assert_eq!(plain.dep, Dependency::None);

        let dependent = FieldSpec::on_field("SharedSecret", FieldKind::byte_array(), "SecretLen");
        assert_eq!(dependent.dep, Dependency::OnField("SecretLen"));

        let trailing = FieldSpec::rest("Data", FieldKind::byte_array());
        assert_eq!(trailing.dep, Dependency::Rest);
    }
}
