//! Dynamic NBT values.

use std::collections::HashMap;
use std::fmt;

use crate::wire::TagType;

/// Type alias for compound maps (string keys, heterogeneous values).
pub type Compound = HashMap<String, Value>;

/// A natively sized NBT payload of any tag type.
///
/// This is the "any" target: decoding into a `Value` stores whatever the
/// stream holds, and encoding a `Value` writes its variant's tag.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(u8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<u8>),
    String(String),
    List(Vec<Value>),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Default for Value {
    fn default() -> Self {
        Self::Compound(Compound::new())
    }
}

impl Value {
    /// Returns the tag type this value is written as.
    pub fn tag(&self) -> TagType {
        match self {
            Self::Byte(_) => TagType::Byte,
            Self::Short(_) => TagType::Short,
            Self::Int(_) => TagType::Int,
            Self::Long(_) => TagType::Long,
            Self::Float(_) => TagType::Float,
            Self::Double(_) => TagType::Double,
            Self::ByteArray(_) => TagType::ByteArray,
            Self::String(_) => TagType::String,
            Self::List(_) => TagType::List,
            Self::Compound(_) => TagType::Compound,
            Self::IntArray(_) => TagType::IntArray,
            Self::LongArray(_) => TagType::LongArray,
        }
    }

    /// Returns the value as a string reference, if it is a `String` variant.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns any integer variant widened to i64.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Byte(b) => Some(i64::from(*b)),
            Self::Short(s) => Some(i64::from(*s)),
            Self::Int(i) => Some(i64::from(*i)),
            Self::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Returns the compound map, if this is a `Compound` variant.
    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Self::Compound(c) => Some(c),
            _ => None,
        }
    }

    /// Looks up a named entry when this value is a compound.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.as_compound().and_then(|c| c.get(name))
    }
}

// -- Convenience conversions --

impl From<u8> for Value {
    fn from(b: u8) -> Self {
        Self::Byte(b)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Byte(u8::from(b))
    }
}

impl From<i16> for Value {
    fn from(s: i16) -> Self {
        Self::Short(s)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Self::Int(i)
    }
}

impl From<i64> for Value {
    fn from(l: i64) -> Self {
        Self::Long(l)
    }
}

impl From<f32> for Value {
    fn from(f: f32) -> Self {
        Self::Float(f)
    }
}

impl From<f64> for Value {
    fn from(d: f64) -> Self {
        Self::Double(d)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Self::ByteArray(b)
    }
}

impl From<Vec<i32>> for Value {
    fn from(v: Vec<i32>) -> Self {
        Self::IntArray(v)
    }
}

impl From<Vec<i64>> for Value {
    fn from(v: Vec<i64>) -> Self {
        Self::LongArray(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<Compound> for Value {
    fn from(c: Compound) -> Self {
        Self::Compound(c)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Byte(b) => write!(f, "{b}b"),
            Self::Short(s) => write!(f, "{s}s"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Long(l) => write!(f, "{l}L"),
            Self::Float(v) => write!(f, "{v}f"),
            Self::Double(v) => write!(f, "{v}d"),
            Self::ByteArray(b) => write!(f, "<{} bytes>", b.len()),
            Self::String(s) => write!(f, "\"{s}\""),
            Self::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Self::Compound(map) => {
                write!(f, "{{")?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Self::IntArray(v) => write!(f, "<{} ints>", v.len()),
            Self::LongArray(v) => write!(f, "<{} longs>", v.len()),
        }
    }
}
