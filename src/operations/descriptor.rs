//! Argument descriptors: one CLI flag specification per function parameter

use tracing::debug;

use crate::error::FuncliError;
use crate::operations::docstring::Docstring;
use crate::types::{Primitive, TypeCategory, TypeSpec, Value, classify};

/// How many values a flag takes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// `--flag VALUE`
    Single,
    /// `--flag VALUE`, repeatable; each occurrence adds one element
    Repeated,
    /// `--flag` / `--no-flag`, no value
    Toggle,
}

/// Fully built specification of one parameter's flag
#[derive(Debug, Clone, PartialEq)]
pub struct ArgumentDescriptor {
    name: String,
    declared_type: Option<TypeSpec>,
    element_type: Primitive,
    category: TypeCategory,
    required: bool,
    default_value: Value,
    choices: Option<Vec<String>>,
    type_name: String,
    description: String,
    help_text: String,
}

impl ArgumentDescriptor {
    /// Build the descriptor of parameter `name`
    ///
    /// A parameter without a default is required; its default is then
    /// `Value::None`, kept for display only.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedType` when the type cannot become a flag.
    pub fn build(
        name: &str,
        declared_type: Option<&TypeSpec>,
        default: Option<&Value>,
        doc: &Docstring,
    ) -> Result<Self, FuncliError> {
        let class = classify(name, declared_type, default)?;
        let required = default.is_none();
        let default_value = default.cloned().unwrap_or(Value::None);
        let choices = class
            .category
            .enum_type()
            .map(|ty| ty.members().to_vec());

        let default_repr = match default_value {
            Value::Enum(_) => format!("'{}'", default_value.repr()),
            _ if !required
                && !class.none_default
                && class.category == TypeCategory::Scalar(Primitive::Str) =>
            {
                format!("'{default_value}'")
            }
            _ => default_value.to_string(),
        };
        let description = doc.param(name).to_owned();
        let description_repr = if description.is_empty() {
            String::new()
        } else {
            format!(": {description}")
        };
        let help_text = format!(
            "[{}, {}, default:{default_repr}]{description_repr}",
            if required { "REQUIRED" } else { "optional" },
            class.display_name,
        );

        let descriptor = Self {
            name: name.to_owned(),
            declared_type: declared_type.cloned(),
            element_type: class.element_type,
            category: class.category,
            required,
            default_value,
            choices,
            type_name: class.display_name,
            description,
            help_text,
        };
        debug!(
            name = %descriptor.name,
            category = ?descriptor.category,
            arity = ?descriptor.arity(),
            required = descriptor.required,
            default = %descriptor.default_value,
            choices = ?descriptor.choices,
            "argument descriptor built"
        );
        Ok(descriptor)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The annotation as written, if any
    #[must_use]
    pub const fn declared_type(&self) -> Option<&TypeSpec> {
        self.declared_type.as_ref()
    }

    #[must_use]
    pub const fn element_type(&self) -> Primitive {
        self.element_type
    }

    #[must_use]
    pub const fn category(&self) -> &TypeCategory {
        &self.category
    }

    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn default_value(&self) -> &Value {
        &self.default_value
    }

    /// Member names of the enumeration, in order
    #[must_use]
    pub fn choices(&self) -> Option<&[String]> {
        self.choices.as_deref()
    }

    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn help_text(&self) -> &str {
        &self.help_text
    }

    #[must_use]
    pub const fn arity(&self) -> Arity {
        match self.category {
            TypeCategory::Boolean => Arity::Toggle,
            TypeCategory::List(_) | TypeCategory::UnspecifiedList => Arity::Repeated,
            TypeCategory::Scalar(_) | TypeCategory::Enumeration(_) => Arity::Single,
        }
    }

    /// Id and long name of the disabling half of a toggle
    #[must_use]
    pub fn negated_flag(&self) -> String {
        format!("no-{}", self.name)
    }

    /// Settle the value a parameter receives from what the command line supplied
    ///
    /// Supplied values win outright: for repeatable flags `supplied` holds only
    /// the explicit occurrences, so the first one replaces the default list
    /// rather than extending it. Without supplied values the default applies,
    /// unless the parameter is required.
    #[must_use]
    pub fn resolve(&self, supplied: Option<Value>) -> Option<Value> {
        match supplied {
            Some(value) => Some(value),
            None if self.required => None,
            None => Some(self.default_value.clone()),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::{EnumType, EnumValue};

    fn build(name: &str, declared: Option<&TypeSpec>, default: Option<&Value>) -> ArgumentDescriptor {
        ArgumentDescriptor::build(name, declared, default, &Docstring::default()).unwrap()
    }

    #[test]
    fn scalars_without_default_are_required() {
        for spec in [TypeSpec::STR, TypeSpec::INT, TypeSpec::FLOAT] {
            let arg = build("value", Some(&spec), None);
            assert!(arg.required());
            assert_eq!(arg.default_value(), &Value::None);
            assert_eq!(arg.arity(), Arity::Single);
            assert_eq!(arg.resolve(None), None);
        }
    }

    #[test]
    fn help_text_quotes_string_defaults_only() {
        let arg = build("a_str", Some(&TypeSpec::STR), Some(&Value::from("string")));
        assert_eq!(arg.help_text(), "[optional, str, default:'string']");

        let arg = build("a_int", Some(&TypeSpec::INT), Some(&Value::from(1)));
        assert_eq!(arg.help_text(), "[optional, int, default:1]");

        let list = Value::from(vec!["a", "b", "c"]);
        let arg = build("a_list", Some(&TypeSpec::list_of(TypeSpec::STR)), Some(&list));
        assert_eq!(arg.help_text(), "[optional, list[str], default:['a', 'b', 'c']]");

        let arg = build("value", Some(&TypeSpec::INT), None);
        assert_eq!(arg.help_text(), "[REQUIRED, int, default:None]");
    }

    #[test]
    fn none_sentinel_is_not_quoted() {
        let arg = build("nickname", None, Some(&Value::None));
        assert!(!arg.required());
        assert_eq!(arg.help_text(), "[optional, str, default:None]");
        assert_eq!(arg.resolve(None), Some(Value::None));
    }

    #[test]
    fn help_text_appends_description() {
        let doc = Docstring::parse("Greets\n:param name: who to greet");
        let arg = ArgumentDescriptor::build("name", Some(&TypeSpec::STR), None, &doc).unwrap();
        assert_eq!(arg.description(), "who to greet");
        assert_eq!(arg.help_text(), "[REQUIRED, str, default:None]: who to greet");
    }

    #[test]
    fn booleans_toggle() {
        let arg = build("a_bool", Some(&TypeSpec::BOOL), None);
        assert_eq!(arg.arity(), Arity::Toggle);
        assert_eq!(arg.negated_flag(), "no-a_bool");
        assert_eq!(arg.element_type(), Primitive::Bool);
    }

    #[test]
    fn first_occurrence_replaces_default_list() {
        let default = Value::from(vec!["a", "b"]);
        let arg = build("a_list", Some(&TypeSpec::list_of(TypeSpec::STR)), Some(&default));
        assert_eq!(arg.arity(), Arity::Repeated);
        assert_eq!(
            arg.resolve(Some(Value::from(vec!["x"]))),
            Some(Value::from(vec!["x"]))
        );
        assert_eq!(arg.resolve(None), Some(default));
    }

    #[test]
    fn enumerations_carry_choices() {
        let spec = TypeSpec::enumeration(EnumType::new("Value", ["value1", "value2"]));
        let arg = build("value", Some(&spec), None);
        assert_eq!(arg.choices().unwrap(), ["value1", "value2"]);
        assert_eq!(arg.element_type(), Primitive::Str);
        assert_eq!(arg.help_text(), "[REQUIRED, Value, default:None]");

        let arg = build("plain", Some(&TypeSpec::INT), None);
        assert!(arg.choices().is_none());
    }

    #[test]
    fn enumeration_default_is_quoted_literal() {
        let ty = Arc::new(EnumType::new("Status", ["active", "idle"]));
        let idle = Value::Enum(EnumValue::new(&ty, "idle").unwrap());
        let arg = build("status", Some(&TypeSpec::Enum(Arc::clone(&ty))), Some(&idle));
        assert_eq!(arg.help_text(), "[optional, Status, default:'Status.idle']");

        let both = Value::List(vec![idle.clone(), idle]);
        let arg = build("statuses", Some(&TypeSpec::list_of(TypeSpec::Enum(ty))), Some(&both));
        assert_eq!(
            arg.help_text(),
            "[optional, list[Status], default:[Status.idle, Status.idle]]"
        );
    }
}
