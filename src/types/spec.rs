//! Declared types and the categories they classify into

use std::sync::Arc;

/// Built-in primitive type names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Primitive {
    Str,
    Int,
    Float,
    Bool,
}

impl Primitive {
    pub const ALL: [Self; 4] = [Self::Str, Self::Int, Self::Float, Self::Bool];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Str => "str",
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|primitive| primitive.name() == name)
    }
}

/// A closed, named set of values usable as a flag's choice set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    module: Option<String>,
    members: Vec<String>,
}

impl EnumType {
    pub fn new<N, I, M>(name: N, members: I) -> Self
    where
        N: Into<String>,
        I: IntoIterator<Item = M>,
        M: Into<String>,
    {
        Self {
            name: name.into(),
            module: None,
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Place the type in a named module, making it addressable as `module.Name`
    #[must_use]
    pub fn in_module<S: Into<String>>(mut self, module: S) -> Self {
        self.module = Some(module.into());
        self
    }

    /// Describe a Rust enumeration
    #[must_use]
    pub fn of<T: Enumeration>() -> Self {
        Self::new(T::NAME, T::MEMBERS.iter().copied())
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn module(&self) -> Option<&str> {
        self.module.as_deref()
    }

    /// Member names, in declaration order
    #[must_use]
    pub fn members(&self) -> &[String] {
        &self.members
    }

    #[must_use]
    pub fn contains(&self, member: &str) -> bool {
        self.members.iter().any(|name| name == member)
    }
}

/// A Rust enum that can be offered as a flag's choice set
///
/// ```
/// use funcli::Enumeration;
///
/// #[derive(Debug, PartialEq)]
/// enum Status {
///     Active,
///     Inactive,
/// }
///
/// impl Enumeration for Status {
///     const NAME: &'static str = "Status";
///     const MEMBERS: &'static [&'static str] = &["active", "inactive"];
///
///     fn from_member(member: &str) -> Option<Self> {
///         match member {
///             "active" => Some(Self::Active),
///             "inactive" => Some(Self::Inactive),
///             _ => None,
///         }
///     }
///
///     fn member(&self) -> &'static str {
///         match *self {
///             Self::Active => "active",
///             Self::Inactive => "inactive",
///         }
///     }
/// }
///
/// assert_eq!(Status::from_member("inactive"), Some(Status::Inactive));
/// ```
pub trait Enumeration: Sized {
    const NAME: &'static str;
    const MEMBERS: &'static [&'static str];

    fn from_member(member: &str) -> Option<Self>;

    fn member(&self) -> &'static str;
}

/// A parameter's declared type annotation
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeSpec {
    Primitive(Primitive),
    Enum(Arc<EnumType>),
    /// `list[T]`, or the bare `list` when the element type is `None`
    List(Option<Box<TypeSpec>>),
}

impl TypeSpec {
    pub const STR: Self = Self::Primitive(Primitive::Str);
    pub const INT: Self = Self::Primitive(Primitive::Int);
    pub const FLOAT: Self = Self::Primitive(Primitive::Float);
    pub const BOOL: Self = Self::Primitive(Primitive::Bool);
    pub const LIST: Self = Self::List(None);

    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::List(Some(Box::new(element)))
    }

    #[must_use]
    pub fn enumeration(ty: EnumType) -> Self {
        Self::Enum(Arc::new(ty))
    }

    /// Shortcut for a Rust enumeration implementing [`Enumeration`]
    #[must_use]
    pub fn of<T: Enumeration>() -> Self {
        Self::enumeration(EnumType::of::<T>())
    }

    /// The textual name `TypeTable::resolve_by_name` maps back to this type
    #[must_use]
    pub fn display_name(&self) -> String {
        match *self {
            Self::Primitive(primitive) => primitive.name().to_owned(),
            Self::Enum(ref ty) => ty.name().to_owned(),
            Self::List(None) => "list".to_owned(),
            Self::List(Some(ref element)) => format!("list[{}]", element.display_name()),
        }
    }
}

/// Element category of a list; nested lists and lists of booleans do not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementCategory {
    Scalar(Primitive),
    Enumeration(Arc<EnumType>),
}

/// What kind of flag a parameter becomes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeCategory {
    /// Never `Primitive::Bool`, which classifies as `Boolean`
    Scalar(Primitive),
    Boolean,
    Enumeration(Arc<EnumType>),
    List(ElementCategory),
    /// A bare `list`; elements are strings
    UnspecifiedList,
}

impl TypeCategory {
    #[must_use]
    pub const fn is_list(&self) -> bool {
        matches!(*self, Self::List(_) | Self::UnspecifiedList)
    }

    /// The enumeration behind this category or its elements
    #[must_use]
    pub const fn enum_type(&self) -> Option<&Arc<EnumType>> {
        match *self {
            Self::Enumeration(ref ty) | Self::List(ElementCategory::Enumeration(ref ty)) => Some(ty),
            _ => None,
        }
    }

    /// The type raw text is converted to by the parser
    #[must_use]
    pub const fn element_type(&self) -> Primitive {
        match *self {
            Self::Scalar(primitive) | Self::List(ElementCategory::Scalar(primitive)) => primitive,
            Self::Boolean => Primitive::Bool,
            Self::Enumeration(_)
            | Self::List(ElementCategory::Enumeration(_))
            | Self::UnspecifiedList => Primitive::Str,
        }
    }
}
