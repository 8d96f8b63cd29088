//! Runtime values flowing between the parser and the handlers

use core::fmt;
use std::sync::Arc;

use super::spec::{EnumType, Enumeration};

/// A typed argument value, as defaults are declared and as handlers receive them
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Value {
    /// Explicit absence (the `None` sentinel default, or a handler returning nothing)
    None,
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Enum(EnumValue),
    List(Vec<Value>),
}

/// One member of an enumeration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    ty: Arc<EnumType>,
    member: String,
}

impl EnumValue {
    /// Build a member of `ty`; `None` when `member` is not one of its names
    #[must_use]
    pub fn new(ty: &Arc<EnumType>, member: &str) -> Option<Self> {
        ty.contains(member).then(|| Self {
            ty: Arc::clone(ty),
            member: member.to_owned(),
        })
    }

    /// Build the member corresponding to a Rust enumeration value
    #[must_use]
    pub fn of<T: Enumeration>(value: &T) -> Self {
        Self {
            ty: Arc::new(EnumType::of::<T>()),
            member: value.member().to_owned(),
        }
    }

    #[must_use]
    pub fn member(&self) -> &str {
        &self.member
    }

    #[must_use]
    pub fn enum_type(&self) -> &Arc<EnumType> {
        &self.ty
    }

    /// Convert back to the Rust enumeration it names
    #[must_use]
    pub fn to_enum<T: Enumeration>(&self) -> Option<T> {
        T::from_member(&self.member)
    }
}

impl Value {
    /// Short name of the value's kind, used in type mismatch reports
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match *self {
            Self::None => "None",
            Self::Str(_) => "str",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Enum(_) => "enum",
            Self::List(_) => "list",
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(*self, Self::None)
    }

    /// Literal form: strings quoted, enum members qualified by their type
    #[must_use]
    pub fn repr(&self) -> String {
        match *self {
            Self::Str(ref s) => format!("'{s}'"),
            Self::Enum(ref e) => format!("{}.{}", e.ty.name(), e.member),
            _ => self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::None => f.write_str("None"),
            Self::Str(ref s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Enum(ref e) => f.write_str(&e.member),
            Self::List(ref items) => {
                let rendered: Vec<String> = items.iter().map(Self::repr).collect();
                write!(f, "[{}]", rendered.join(", "))
            }
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}
