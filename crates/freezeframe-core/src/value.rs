//! Typed attribute values.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// The value held by a node attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Vec3(Vec3),
    String(String),
    /// A data-less plug used to express relationships between nodes.
    Message,
}

impl AttrValue {
    /// Returns a short name for the value's type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Vec3(_) => "vec3",
            Self::String(_) => "string",
            Self::Message => "message",
        }
    }

    /// Returns the value as a float. Integers and booleans are widened.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Int(v) => Some(*v as f64),
            Self::Bool(v) => Some(if *v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Returns the value as a boolean. Numbers are truthy when non-zero.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            Self::Int(v) => Some(*v != 0),
            Self::Float(v) => Some(*v != 0.0),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_vec3(&self) -> Option<Vec3> {
        match self {
            Self::Vec3(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Converts `value` into the type of `self` when the conversion is lossless
    /// enough for attribute assignment.
    ///
    /// Integers and booleans may be written into float attributes, and booleans
    /// into integer attributes. Everything else must match exactly.
    #[must_use]
    pub fn coerce(&self, value: AttrValue) -> Option<AttrValue> {
        match (self, value) {
            (Self::Float(_), v) => v.as_float().map(Self::Float),
            (Self::Int(_), Self::Bool(b)) => Some(Self::Int(i64::from(b))),
            (Self::Bool(_), Self::Int(i)) => Some(Self::Bool(i != 0)),
            (current, v) if std::mem::discriminant(current) == std::mem::discriminant(&v) => {
                Some(v)
            }
            _ => None,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Vec3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::Message => f.write_str("<message>"),
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Vec3> for AttrValue {
    fn from(v: Vec3) -> Self {
        Self::Vec3(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_widens_numbers() {
        let current = AttrValue::Float(0.0);
        assert_eq!(current.coerce(AttrValue::Int(3)), Some(AttrValue::Float(3.0)));
        assert_eq!(
            current.coerce(AttrValue::Bool(true)),
            Some(AttrValue::Float(1.0))
        );
        assert_eq!(current.coerce(AttrValue::from("x")), None);
    }

    #[test]
    fn test_coerce_exact_types() {
        let current = AttrValue::from("a.png");
        assert_eq!(
            current.coerce(AttrValue::from("b.png")),
            Some(AttrValue::from("b.png"))
        );
        assert_eq!(current.coerce(AttrValue::Float(1.0)), None);
        assert_eq!(
            AttrValue::Vec3(Vec3::ZERO).coerce(AttrValue::Vec3(Vec3::ONE)),
            Some(AttrValue::Vec3(Vec3::ONE))
        );
        assert_eq!(AttrValue::Int(0).coerce(AttrValue::Float(1.5)), None);
    }

    #[test]
    fn test_accessors() {
        assert_eq!(AttrValue::Int(2).as_float(), Some(2.0));
        assert_eq!(AttrValue::Float(0.0).as_bool(), Some(false));
        assert_eq!(AttrValue::from("p").as_str(), Some("p"));
        assert!(AttrValue::Message.as_vec3().is_none());
    }
}
