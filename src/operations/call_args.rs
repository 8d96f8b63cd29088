//! Typed arguments handed to a handler

use crate::error::FuncliError;
use crate::types::{Enumeration, Value};

/// Named, typed arguments of one invocation, in parameter order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CallArgs {
    function: String,
    values: Vec<(String, Value)>,
}

impl CallArgs {
    #[must_use]
    pub fn new<S: Into<String>>(function: S) -> Self {
        Self {
            function: function.into(),
            values: Vec::new(),
        }
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, value: Value) {
        let name = name.into();
        if let Some(slot) = self.values.iter_mut().find(|entry| entry.0 == name) {
            slot.1 = value;
        } else {
            self.values.push((name, value));
        }
    }

    /// Name of the function these arguments are for
    #[must_use]
    pub fn function(&self) -> &str {
        &self.function
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|&(ref name, ref value)| (name.as_str(), value))
    }

    /// Look up an argument
    ///
    /// # Errors
    ///
    /// Returns `MissingArgument` naming this function when `name` was not supplied.
    pub fn get(&self, name: &str) -> Result<&Value, FuncliError> {
        self.values
            .iter()
            .find(|&&(ref key, _)| key == name)
            .map(|&(_, ref value)| value)
            .ok_or_else(|| FuncliError::missing(&self.function, name))
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`.
    pub fn str(&self, name: &str) -> Result<&str, FuncliError> {
        match *self.get(name)? {
            Value::Str(ref s) => Ok(s),
            ref other => Err(mismatch(name, "str", other)),
        }
    }

    /// A string that may be the `None` sentinel
    ///
    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`.
    pub fn opt_str(&self, name: &str) -> Result<Option<&str>, FuncliError> {
        match *self.get(name)? {
            Value::None => Ok(None),
            Value::Str(ref s) => Ok(Some(s)),
            ref other => Err(mismatch(name, "str", other)),
        }
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`.
    pub fn int(&self, name: &str) -> Result<i64, FuncliError> {
        match *self.get(name)? {
            Value::Int(i) => Ok(i),
            ref other => Err(mismatch(name, "int", other)),
        }
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`.
    pub fn float(&self, name: &str) -> Result<f64, FuncliError> {
        match *self.get(name)? {
            Value::Float(x) => Ok(x),
            ref other => Err(mismatch(name, "float", other)),
        }
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`.
    pub fn flag(&self, name: &str) -> Result<bool, FuncliError> {
        match *self.get(name)? {
            Value::Bool(b) => Ok(b),
            ref other => Err(mismatch(name, "bool", other)),
        }
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`.
    pub fn list(&self, name: &str) -> Result<&[Value], FuncliError> {
        match *self.get(name)? {
            Value::List(ref items) => Ok(items),
            ref other => Err(mismatch(name, "list", other)),
        }
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`, including on a non-string element.
    pub fn strs(&self, name: &str) -> Result<Vec<&str>, FuncliError> {
        self.list(name)?
            .iter()
            .map(|item| match *item {
                Value::Str(ref s) => Ok(s.as_str()),
                ref other => Err(mismatch(name, "list[str]", other)),
            })
            .collect()
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`, including on a non-integer element.
    pub fn ints(&self, name: &str) -> Result<Vec<i64>, FuncliError> {
        self.list(name)?
            .iter()
            .map(|item| match *item {
                Value::Int(i) => Ok(i),
                ref other => Err(mismatch(name, "list[int]", other)),
            })
            .collect()
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`.
    pub fn enumeration<T: Enumeration>(&self, name: &str) -> Result<T, FuncliError> {
        to_enum(name, self.get(name)?)
    }

    /// # Errors
    ///
    /// `MissingArgument` or `TypeMismatch`, including on a foreign element.
    pub fn enumerations<T: Enumeration>(&self, name: &str) -> Result<Vec<T>, FuncliError> {
        self.list(name)?
            .iter()
            .map(|item| to_enum(name, item))
            .collect()
    }
}

fn to_enum<T: Enumeration>(name: &str, value: &Value) -> Result<T, FuncliError> {
    match *value {
        Value::Enum(ref member) if member.enum_type().name() == T::NAME => member
            .to_enum::<T>()
            .ok_or_else(|| mismatch(name, T::NAME, value)),
        ref other => Err(mismatch(name, T::NAME, other)),
    }
}

fn mismatch(argument: &str, expected: &'static str, actual: &Value) -> FuncliError {
    FuncliError::TypeMismatch {
        argument: argument.to_owned(),
        expected,
        actual: actual.kind_name(),
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::types::EnumValue;

    #[derive(Debug, PartialEq)]
    enum Mode {
        Fast,
        Slow,
    }

    impl Enumeration for Mode {
        const NAME: &'static str = "Mode";
        const MEMBERS: &'static [&'static str] = &["fast", "slow"];

        fn from_member(member: &str) -> Option<Self> {
            match member {
                "fast" => Some(Self::Fast),
                "slow" => Some(Self::Slow),
                _ => None,
            }
        }

        fn member(&self) -> &'static str {
            match *self {
                Self::Fast => "fast",
                Self::Slow => "slow",
            }
        }
    }

    fn args() -> CallArgs {
        let mut args = CallArgs::new("demo");
        args.insert("name", Value::from("Ada"));
        args.insert("age", Value::from(36));
        args.insert("scores", Value::from(vec![1, 2]));
        args.insert("nickname", Value::None);
        args.insert("mode", Value::from(EnumValue::of(&Mode::Slow)));
        args.insert(
            "modes",
            Value::from(vec![EnumValue::of(&Mode::Fast), EnumValue::of(&Mode::Slow)]),
        );
        args
    }

    #[test]
    fn typed_accessors_read_values() {
        let args = args();
        assert_eq!(args.str("name").unwrap(), "Ada");
        assert_eq!(args.int("age").unwrap(), 36);
        assert_eq!(args.ints("scores").unwrap(), vec![1, 2]);
        assert_eq!(args.opt_str("nickname").unwrap(), None);
        assert_eq!(args.enumeration::<Mode>("mode").unwrap(), Mode::Slow);
        assert_eq!(
            args.enumerations::<Mode>("modes").unwrap(),
            vec![Mode::Fast, Mode::Slow]
        );
        assert_eq!(args.len(), 6);
    }

    #[test]
    fn absent_argument_names_the_function() {
        let err = args().int("missing").unwrap_err();
        assert_eq!(err.to_string(), "demo() missing required argument: 'missing'");
    }

    #[test]
    fn wrong_type_is_a_mismatch() {
        let err = args().int("name").unwrap_err();
        assert!(matches!(err, FuncliError::TypeMismatch { expected: "int", actual: "str", .. }));
        assert!(args().strs("scores").is_err());
    }

    #[test]
    fn insert_replaces_existing_entries() {
        let mut args = args();
        args.insert("age", Value::from(37));
        assert_eq!(args.int("age").unwrap(), 37);
        assert_eq!(args.iter().next().map(|(name, _)| name), Some("name"));
    }
}
