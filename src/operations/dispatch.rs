//! Dispatch: coerce parsed arguments to their declared types and call the handler

use anyhow::{Result, anyhow};
use tracing::{debug, trace};

use crate::error::{ArgError, FuncliError};
use crate::operations::call_args::CallArgs;
use crate::operations::descriptor::ArgumentDescriptor;
use crate::operations::registry::Registry;
use crate::types::{EnumValue, Value};

/// Values produced by the parser, keyed by parameter name
///
/// Enumeration values are still raw member names at this point.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawArgs {
    values: Vec<(String, Value)>,
}

impl RawArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<S: Into<String>>(&mut self, name: S, value: Value) {
        self.values.push((name.into(), value));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|&&(ref key, _)| key == name)
            .map(|&(_, ref value)| value)
    }

    fn take(&mut self, name: &str) -> Option<Value> {
        let index = self.values.iter().position(|entry| entry.0 == name)?;
        Some(self.values.remove(index).1)
    }
}

/// Result of a completed invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatched {
    pub result: Value,
    pub args: CallArgs,
}

/// Coerce `raw` through the descriptors of `subcommand` and invoke its handler
///
/// Handler failures that are an [`ArgError`], or a missing argument of this
/// very function, come back as the matching `FuncliError`. Every other
/// failure is returned untouched.
///
/// # Errors
///
/// - `UnknownSubcommand` for a name the registry does not hold
/// - `InvalidChoice` for a member name outside its enumeration
/// - whatever the handler fails with
pub fn dispatch(registry: &Registry, subcommand: &str, mut raw: RawArgs) -> Result<Dispatched> {
    let entry = registry
        .get(subcommand)
        .ok_or_else(|| FuncliError::UnknownSubcommand {
            name: subcommand.to_owned(),
        })?;

    let mut args = CallArgs::new(subcommand);
    for descriptor in entry.arguments() {
        let Some(value) = raw.take(descriptor.name()) else {
            trace!(argument = descriptor.name(), "no value supplied");
            continue;
        };
        let value = coerce(descriptor, value)?;
        trace!(argument = descriptor.name(), value = %value.repr(), "argument coerced");
        args.insert(descriptor.name(), value);
    }
    if let Some(&(ref name, _)) = raw.values.first() {
        return Err(anyhow!(
            "Parsed argument '{name}' is not a parameter of '{subcommand}'"
        ));
    }

    debug!(subcommand, arguments = args.len(), "calling function");
    match (entry.handler())(&args) {
        Ok(result) => Ok(Dispatched { result, args }),
        Err(err) => Err(recover(err, subcommand)),
    }
}

/// Turn enumeration member names into members; other values pass through
///
/// # Errors
///
/// Returns `InvalidChoice` for a name outside the enumeration. A single bad
/// element fails the whole list.
pub fn coerce(descriptor: &ArgumentDescriptor, value: Value) -> Result<Value, FuncliError> {
    let Some(ty) = descriptor.category().enum_type() else {
        return Ok(value);
    };
    let member = |item: Value| match item {
        Value::Str(name) => EnumValue::new(ty, &name).map(Value::Enum).ok_or_else(|| {
            FuncliError::InvalidChoice {
                argument: descriptor.name().to_owned(),
                value: name,
                choices: ty.members().to_vec(),
            }
        }),
        other => Ok(other),
    };

    if descriptor.category().is_list() {
        match value {
            Value::List(items) => items
                .into_iter()
                .map(member)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            other => Ok(other),
        }
    } else {
        member(value)
    }
}

fn recover(err: anyhow::Error, subcommand: &str) -> anyhow::Error {
    let err = match err.downcast::<ArgError>() {
        Ok(arg_err) => return FuncliError::Argument(arg_err).into(),
        Err(err) => err,
    };
    let foreign = matches!(
        err.downcast_ref::<FuncliError>(),
        Some(&FuncliError::MissingArgument { ref function, .. }) if function != subcommand
    );
    // Raised on behalf of another function, so not reported as this call's mistake
    if foreign { anyhow!("{err:#}") } else { err }
}
