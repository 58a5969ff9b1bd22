//! The decoded field value union.

use std::fmt;

use mctype::{Angle, Identifier, Position, Uuid};

/// A decoded packet field.
///
/// Mirrors [`schema::FieldKind`] variant for variant. Array-shaped kinds
/// (`Array`, `PrefixedArray`) both decode to [`FieldValue::Array`]; the
/// schema decides whether a count prefix appears on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    VarInt(i32),
    VarLong(i64),
    Byte(i8),
    UByte(u8),
    Short(i16),
    UShort(u16),
    Int(i32),
    UInt(u32),
    Long(i64),
    ULong(u64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
    Identifier(Identifier),
    Uuid(Uuid),
    Angle(Angle),
    Position(Position),
    Array(Vec<FieldValue>),
    Option(Option<Box<FieldValue>>),
    Compound(Vec<FieldValue>),
}

impl FieldValue {
    /// Builds an [`FieldValue::Array`] of unsigned bytes from a slice.
    #[must_use]
    pub fn bytes(data: &[u8]) -> Self {
        Self::Array(data.iter().copied().map(Self::UByte).collect())
    }

    /// Interprets an integer-shaped value as an element count.
    ///
    /// Returns `None` for non-integer variants or negative values.
    #[must_use]
    pub fn as_count(&self) -> Option<usize> {
        let raw = match *self {
            Self::VarInt(v) => i64::from(v),
            Self::VarLong(v) => v,
            Self::Byte(v) => i64::from(v),
            Self::UByte(v) => i64::from(v),
            Self::Short(v) => i64::from(v),
            Self::UShort(v) => i64::from(v),
            Self::Int(v) => i64::from(v),
            Self::UInt(v) => i64::from(v),
            Self::Long(v) => v,
            Self::ULong(v) => i64::try_from(v).ok()?,
            _ => return None,
        };
        usize::try_from(raw).ok()
    }

    /// Returns the boolean payload, if this is a `Boolean`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    /// Returns the value as an `i32` for the VarInt/Int family.
    #[must_use]
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            Self::VarInt(v) | Self::Int(v) => Some(v),
            Self::Byte(v) => Some(i32::from(v)),
            Self::UByte(v) => Some(i32::from(v)),
            Self::Short(v) => Some(i32::from(v)),
            Self::UShort(v) => Some(i32::from(v)),
            _ => None,
        }
    }

    /// Returns the value as an `i64` for any integer variant.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match *self {
            Self::VarLong(v) | Self::Long(v) => Some(v),
            Self::UInt(v) => Some(i64::from(v)),
            Self::ULong(v) => i64::try_from(v).ok(),
            _ => self.as_i32().map(i64::from),
        }
    }

    /// Returns the string payload, if this is a `String`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the UUID payload, if this is a `Uuid`.
    #[must_use]
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Self::Uuid(v) => Some(*v),
            _ => None,
        }
    }

    /// Collects an `Array` of `UByte` values back into raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> Option<Vec<u8>> {
        match self {
            Self::Array(items) => items
                .iter()
                .map(|item| match item {
                    Self::UByte(b) => Some(*b),
                    _ => None,
                })
                .collect(),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VarInt(v) => write!(f, "{v}"),
            Self::VarLong(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::UByte(v) => write!(f, "{v}"),
            Self::Short(v) => write!(f, "{v}"),
            Self::UShort(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::ULong(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v:?}"),
            Self::Identifier(v) => write!(f, "{v}"),
            Self::Uuid(v) => write!(f, "{v}"),
            Self::Angle(v) => write!(f, "{v}"),
            Self::Position(v) => write!(f, "{v}"),
            Self::Array(items) => {
                write!(f, "[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Option(Some(inner)) => write!(f, "Some({inner})"),
            Self::Option(None) => write!(f, "None"),
            Self::Compound(items) => {
                write!(f, "(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, ")")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_from_integer_variants() {
        assert_eq!(FieldValue::VarInt(5).as_count(), Some(5));
        assert_eq!(FieldValue::UByte(255).as_count(), Some(255));
        assert_eq!(FieldValue::Long(0).as_count(), Some(0));
        assert_eq!(FieldValue::VarInt(-1).as_count(), None);
        assert_eq!(FieldValue::Boolean(true).as_count(), None);
    }

    #[test]
    fn bytes_roundtrip() {
        let value = FieldValue::bytes(&[1, 2, 3]);
        assert_eq!(value.as_bytes(), Some(vec![1, 2, 3]));
        assert_eq!(FieldValue::VarInt(1).as_bytes(), None);
    }

    #[test]
    fn typed_accessors() {
        assert_eq!(FieldValue::VarInt(42).as_i32(), Some(42));
        assert_eq!(FieldValue::Long(-7).as_i64(), Some(-7));
        assert_eq!(FieldValue::Short(-2).as_i64(), Some(-2));
        assert_eq!(FieldValue::String("hi".into()).as_str(), Some("hi"));
        assert_eq!(FieldValue::Boolean(false).as_bool(), Some(false));
        assert_eq!(FieldValue::Float(1.0).as_i32(), None);
    }

    #[test]
    fn display_compound_shapes() {
        let value = FieldValue::Array(vec![FieldValue::VarInt(1), FieldValue::VarInt(2)]);
        assert_eq!(value.to_string(), "[1, 2]");

        let value = FieldValue::Option(Some(Box::new(FieldValue::Boolean(true))));
        assert_eq!(value.to_string(), "Some(true)");

        let value = FieldValue::Option(None);
        assert_eq!(value.to_string(), "None");
    }
}
