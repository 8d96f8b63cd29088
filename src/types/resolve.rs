//! Type classification and name resolution

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::trace;

use super::spec::{ElementCategory, EnumType, Primitive, TypeCategory, TypeSpec};
use super::value::Value;
use crate::error::FuncliError;

/// Outcome of classifying one parameter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: TypeCategory,
    /// Coercion target of the raw text (`str` for enumerations and bare lists)
    pub element_type: Primitive,
    /// Type name shown in help
    pub display_name: String,
    /// The default is the explicit `None` sentinel
    pub none_default: bool,
}

/// Classify a parameter from its annotation, falling back to its default's type
///
/// # Errors
///
/// Returns `UnsupportedType` for nested lists and lists of booleans.
pub fn classify(
    parameter: &str,
    declared: Option<&TypeSpec>,
    default: Option<&Value>,
) -> Result<Classification, FuncliError> {
    let none_default = default.is_some_and(Value::is_none);

    let inferred;
    let spec = match (declared, default) {
        (Some(spec), _) => Some(spec),
        (None, Some(value)) if !value.is_none() => {
            inferred = infer(value);
            trace!(parameter, inferred = %inferred.display_name(), "type inferred from default");
            Some(&inferred)
        }
        _ => None,
    };

    let Some(spec) = spec else {
        return Ok(Classification {
            category: TypeCategory::Scalar(Primitive::Str),
            element_type: Primitive::Str,
            display_name: Primitive::Str.name().to_owned(),
            none_default,
        });
    };

    let category = categorize(parameter, spec)?;
    let display_name = match category {
        TypeCategory::UnspecifiedList => TypeSpec::list_of(TypeSpec::STR).display_name(),
        _ => spec.display_name(),
    };
    Ok(Classification {
        element_type: category.element_type(),
        category,
        display_name,
        none_default,
    })
}

fn infer(value: &Value) -> TypeSpec {
    match *value {
        Value::Int(_) => TypeSpec::INT,
        Value::Float(_) => TypeSpec::FLOAT,
        Value::Bool(_) => TypeSpec::BOOL,
        Value::Enum(ref member) => TypeSpec::Enum(Arc::clone(member.enum_type())),
        Value::List(_) => TypeSpec::LIST,
        Value::None | Value::Str(_) => TypeSpec::STR,
    }
}

fn categorize(parameter: &str, spec: &TypeSpec) -> Result<TypeCategory, FuncliError> {
    let unsupported = || FuncliError::UnsupportedType {
        parameter: parameter.to_owned(),
        type_name: spec.display_name(),
    };
    match *spec {
        TypeSpec::Primitive(Primitive::Bool) => Ok(TypeCategory::Boolean),
        TypeSpec::Primitive(primitive) => Ok(TypeCategory::Scalar(primitive)),
        TypeSpec::Enum(ref ty) => Ok(TypeCategory::Enumeration(Arc::clone(ty))),
        TypeSpec::List(None) => Ok(TypeCategory::UnspecifiedList),
        TypeSpec::List(Some(ref element)) => match **element {
            TypeSpec::Primitive(Primitive::Bool) | TypeSpec::List(_) => Err(unsupported()),
            TypeSpec::Primitive(primitive) => {
                Ok(TypeCategory::List(ElementCategory::Scalar(primitive)))
            }
            TypeSpec::Enum(ref ty) => Ok(TypeCategory::List(ElementCategory::Enumeration(
                Arc::clone(ty),
            ))),
        },
    }
}

/// Static registry mapping type names to types
///
/// Knows the primitives, `list` and `list[T]` from the start; enumerations
/// are added explicitly. Unqualified enumeration names are looked up in the
/// home module, `module.Name` in the named one.
#[derive(Debug, Clone)]
pub struct TypeTable {
    home: String,
    enums: BTreeMap<(String, String), Arc<EnumType>>,
}

impl TypeTable {
    #[must_use]
    pub fn new<S: Into<String>>(home: S) -> Self {
        Self {
            home: home.into(),
            enums: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn home(&self) -> &str {
        &self.home
    }

    /// Make an enumeration resolvable by name
    pub fn register_enum(&mut self, ty: EnumType) -> Arc<EnumType> {
        let module = ty.module().unwrap_or(&self.home).to_owned();
        let ty = Arc::new(ty);
        self.enums
            .insert((module, ty.name().to_owned()), Arc::clone(&ty));
        ty
    }

    /// Resolve a textual type name to a type
    ///
    /// # Errors
    ///
    /// Returns `UnresolvedType` when the name is neither a built-in nor a
    /// registered enumeration.
    pub fn resolve_by_name(&self, text: &str) -> Result<TypeSpec, FuncliError> {
        let text = text.trim();
        if let Some(primitive) = Primitive::from_name(text) {
            return Ok(TypeSpec::Primitive(primitive));
        }
        if text == "list" {
            return Ok(TypeSpec::LIST);
        }
        if let Some(inner) = text
            .strip_prefix("list[")
            .and_then(|rest| rest.strip_suffix(']'))
        {
            return Ok(TypeSpec::list_of(self.resolve_by_name(inner)?));
        }

        let (module, name) = text.split_once('.').unwrap_or((self.home.as_str(), text));
        self.enums
            .get(&(module.to_owned(), name.to_owned()))
            .map(|ty| TypeSpec::Enum(Arc::clone(ty)))
            .ok_or_else(|| FuncliError::unresolved(text))
    }
}

impl Default for TypeTable {
    fn default() -> Self {
        Self::new("main")
    }
}
