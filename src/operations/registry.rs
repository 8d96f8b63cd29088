//! Registry of subcommands: each function with its built argument descriptors

use core::fmt;
use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::error::FuncliError;
use crate::operations::descriptor::ArgumentDescriptor;
use crate::operations::docstring::Docstring;
use crate::operations::function::{Function, Handler};

/// Parameter names the parser keeps for itself
const RESERVED_PARAMETERS: &[&str] = &["help"];

/// Flag ids derive `no-<name>` and `<name>-toggle` from a name, so only
/// identifiers are accepted
#[expect(clippy::expect_used, reason = "The pattern is a literal")]
static PARAMETER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid parameter name pattern"));

/// One registered subcommand
pub struct FunctionEntry {
    name: String,
    description: String,
    arguments: Vec<ArgumentDescriptor>,
    handler: Handler,
}

impl FunctionEntry {
    fn build(function: Function) -> Result<Self, FuncliError> {
        let (name, doc, params, handler) = function.into_parts();
        let doc = doc.as_deref().map(Docstring::parse).unwrap_or_default();

        let mut seen = HashSet::new();
        let mut arguments = Vec::with_capacity(params.len());
        for param in &params {
            if !PARAMETER_NAME.is_match(param.name()) {
                return Err(FuncliError::InvalidParameterName {
                    function: name,
                    parameter: param.name().to_owned(),
                });
            }
            if RESERVED_PARAMETERS.contains(&param.name()) {
                return Err(FuncliError::ReservedParameter {
                    function: name,
                    parameter: param.name().to_owned(),
                });
            }
            if !seen.insert(param.name()) {
                return Err(FuncliError::DuplicateParameter {
                    function: name,
                    parameter: param.name().to_owned(),
                });
            }
            arguments.push(ArgumentDescriptor::build(
                param.name(),
                param.annotation(),
                param.default_value(),
                &doc,
            )?);
        }

        Ok(Self {
            description: doc.description().to_owned(),
            name,
            arguments,
            handler,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description taken from the docstring
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Argument descriptors, in parameter order
    #[must_use]
    pub fn arguments(&self) -> &[ArgumentDescriptor] {
        &self.arguments
    }

    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&ArgumentDescriptor> {
        self.arguments.iter().find(|arg| arg.name() == name)
    }

    #[must_use]
    pub fn handler(&self) -> &Handler {
        &self.handler
    }
}

impl fmt::Debug for FunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEntry")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("arguments", &self.arguments)
            .finish_non_exhaustive()
    }
}

/// Subcommand name to function mapping, built once and read-only afterwards
#[derive(Debug)]
pub struct Registry {
    entries: Vec<FunctionEntry>,
    default_subcommand: Option<String>,
}

impl Registry {
    /// Build an entry per function, keeping the given order
    ///
    /// # Errors
    ///
    /// - `DuplicateSubcommand` if two functions share a name
    /// - `UnknownSubcommand` if `default_subcommand` names none of them
    /// - any error from building a parameter's descriptor
    pub fn register<I>(functions: I, default_subcommand: Option<&str>) -> Result<Self, FuncliError>
    where
        I: IntoIterator<Item = Function>,
    {
        let mut entries: Vec<FunctionEntry> = Vec::new();
        for function in functions {
            if entries.iter().any(|entry| entry.name == function.name()) {
                return Err(FuncliError::DuplicateSubcommand {
                    name: function.name().to_owned(),
                });
            }
            debug!(function = function.name(), "registering function");
            entries.push(FunctionEntry::build(function)?);
        }

        if let Some(name) = default_subcommand
            && !entries.iter().any(|entry| entry.name == name)
        {
            return Err(FuncliError::UnknownSubcommand {
                name: name.to_owned(),
            });
        }

        Ok(Self {
            entries,
            default_subcommand: default_subcommand.map(str::to_owned),
        })
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FunctionEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Entries, in registration order
    #[must_use]
    pub fn entries(&self) -> &[FunctionEntry] {
        &self.entries
    }

    #[must_use]
    pub fn default_subcommand(&self) -> Option<&str> {
        self.default_subcommand.as_deref()
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::operations::function::Param;
    use crate::types::{TypeSpec, Value};

    fn noop(name: &str) -> Function {
        Function::new(name, |_| Ok(Value::None))
    }

    #[test]
    fn entries_keep_registration_order() {
        let registry = Registry::register(
            [
                noop("simple").doc("simple function with no args"),
                noop("an_int").param(Param::new("value").typed(TypeSpec::INT)),
            ],
            Some("simple"),
        )
        .unwrap();

        let names: Vec<&str> = registry.entries().iter().map(FunctionEntry::name).collect();
        assert_eq!(names, ["simple", "an_int"]);
        assert_eq!(registry.default_subcommand(), Some("simple"));
        assert_eq!(
            registry.get("simple").unwrap().description(),
            "simple function with no args"
        );
        assert!(registry.get("an_int").unwrap().argument("value").unwrap().required());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let err = Registry::register([noop("simple"), noop("simple")], None).unwrap_err();
        assert!(matches!(err, FuncliError::DuplicateSubcommand { ref name } if name == "simple"));
    }

    #[test]
    fn default_must_be_registered() {
        let err = Registry::register([noop("simple")], Some("other")).unwrap_err();
        assert!(matches!(err, FuncliError::UnknownSubcommand { .. }));
    }

    #[test]
    fn parameters_must_be_unique_and_unreserved() {
        let twice = noop("f").param(Param::new("x")).param(Param::new("x"));
        assert!(matches!(
            Registry::register([twice], None).unwrap_err(),
            FuncliError::DuplicateParameter { .. }
        ));

        let help = noop("f").param(Param::new("help"));
        assert!(matches!(
            Registry::register([help], None).unwrap_err(),
            FuncliError::ReservedParameter { .. }
        ));
    }

    #[test]
    fn parameter_names_must_be_identifiers() {
        let negated = noop("f")
            .param(Param::new("x").typed(TypeSpec::BOOL))
            .param(Param::new("no-x").default("a"));
        assert!(matches!(
            Registry::register([negated], None).unwrap_err(),
            FuncliError::InvalidParameterName { ref parameter, .. } if parameter == "no-x"
        ));

        for bad in ["x-toggle", "1st", "", "two words"] {
            let function = noop("f").param(Param::new(bad));
            assert!(
                Registry::register([function], None).is_err(),
                "'{bad}' was accepted"
            );
        }

        let ok = noop("f").param(Param::new("_private")).param(Param::new("a_list2"));
        assert!(Registry::register([ok], None).is_ok());
    }
}
