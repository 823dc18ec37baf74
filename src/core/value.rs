use crate::core::{EnumId, MapEntry, ObjectId};

/// Static type of an attribute feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Bool,
    Int,
    Double,
    Str,
    Enum(EnumId),
}

/// Literal of a schema enumeration, by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Literal {
    enumeration: EnumId,
    index: u16,
}

impl Literal {
    pub fn new(enumeration: EnumId, index: u16) -> Self {
        Self { enumeration, index }
    }

    pub fn enumeration(&self) -> EnumId {
        self.enumeration
    }

    pub fn index(&self) -> u16 {
        self.index
    }
}

/// Runtime representation of feature content.
///
/// `Null` stands for an absent scalar. `Seq` carries homogeneous list
/// content, `Entries` carries feature-map content. Object values are ids
/// into the owning [`Model`](crate::core::Model), never the objects
/// themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    Str(String),
    Literal(Literal),
    Object(ObjectId),
    Seq(Vec<Value>),
    Entries(Vec<MapEntry>),
}

impl Value {
    /// Shape name for error reporting.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Int(_) => "an integer",
            Value::Double(_) => "a double",
            Value::Str(_) => "a string",
            Value::Literal(_) => "an enumeration literal",
            Value::Object(_) => "an object",
            Value::Seq(_) => "a sequence",
            Value::Entries(_) => "feature-map entries",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<Literal> {
        match self {
            Value::Literal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Value::Object(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Literal> for Value {
    fn from(v: Literal) -> Self {
        Value::Literal(v)
    }
}

impl From<ObjectId> for Value {
    fn from(v: ObjectId) -> Self {
        Value::Object(v)
    }
}

/// A Rust enum mirroring a schema enumeration, literal for literal and in
/// the same order.
///
/// Implementations are expected to keep [`SchemaEnum::literals`] aligned
/// with the enumeration registered under [`SchemaEnum::ENUM_NAME`]; the
/// model's typed accessors convert through the literal index.
pub trait SchemaEnum: Sized + Copy + PartialEq + 'static {
    /// Name the enumeration was registered under in the schema.
    const ENUM_NAME: &'static str;

    /// All values, in schema literal order.
    fn literals() -> &'static [Self];

    /// The XML literal string.
    fn as_str(self) -> &'static str;

    fn from_index(index: u16) -> Option<Self> {
        Self::literals().get(index as usize).copied()
    }

    fn index(self) -> u16 {
        Self::literals()
            .iter()
            .position(|l| *l == self)
            .map(|p| p as u16)
            .unwrap_or(0)
    }

    fn from_str(s: &str) -> Option<Self> {
        Self::literals().iter().copied().find(|l| l.as_str() == s)
    }
}
