//! Binding manifest commands to handlers
//!
//! Types are resolved by name through a [`TypeTable`] holding the manifest's
//! enumerations; YAML defaults are converted guided by the resolved type.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Result, bail};
use serde_yaml::Value as Yaml;
use tracing::{debug, warn};

use crate::cli::Cli;
use crate::config::{Manifest, ParamConfig};
use crate::error::FuncliError;
use crate::operations::{CallArgs, Function, Handler, Param};
use crate::types::{EnumType, EnumValue, Primitive, TypeSpec, TypeTable, Value};

/// Handlers keyed by command name
#[derive(Default)]
pub struct Handlers {
    map: HashMap<String, Handler>,
}

impl Handlers {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to the command called `name`
    #[must_use]
    pub fn on<S, F>(mut self, name: S, handler: F) -> Self
    where
        S: Into<String>,
        F: Fn(&CallArgs) -> anyhow::Result<Value> + 'static,
    {
        self.map.insert(name.into(), Box::new(handler));
        self
    }

    fn take(&mut self, name: &str) -> Option<Handler> {
        self.map.remove(name)
    }
}

impl Manifest {
    /// Resolve every command against `handlers` and assemble the program
    ///
    /// # Errors
    ///
    /// - `UnboundCommand` if a command has no handler
    /// - `UnresolvedType` for a type name that is neither built in nor declared
    /// - `InvalidChoice` for an enumeration default outside its members
    /// - a default whose shape does not match its declared type
    /// - any registration error
    pub fn bind(self, mut handlers: Handlers) -> Result<Cli> {
        let mut table = TypeTable::default();
        for declared in self.enums {
            let mut ty = EnumType::new(declared.name, declared.members);
            if let Some(module) = declared.module {
                ty = ty.in_module(module);
            }
            table.register_enum(ty);
        }

        let mut functions = Vec::with_capacity(self.commands.len());
        for command in self.commands {
            let handler = handlers
                .take(&command.name)
                .ok_or_else(|| FuncliError::UnboundCommand {
                    name: command.name.clone(),
                })?;
            let mut function = Function::with_handler(command.name, handler);
            if let Some(doc) = command.doc {
                function = function.doc(doc);
            }
            for param in &command.params {
                function = function.param(build_param(&table, param)?);
            }
            debug!(command = function.name(), "command bound");
            functions.push(function);
        }
        for name in handlers.map.keys() {
            warn!(handler = name.as_str(), "handler matches no command in the manifest");
        }

        let cli = Cli::from_functions(
            self.app.or_placeholders(),
            functions,
            self.default_subcommand.as_deref(),
        )?;
        Ok(cli)
    }
}

fn build_param(table: &TypeTable, config: &ParamConfig) -> Result<Param> {
    let mut param = Param::new(config.name.as_str());
    let declared = match config.type_name {
        Some(ref name) => Some(table.resolve_by_name(name)?),
        None => None,
    };
    if let Some(ref raw) = config.default {
        param = param.default(to_value(&config.name, declared.as_ref(), raw)?);
    }
    if let Some(declared) = declared {
        param = param.typed(declared);
    }
    Ok(param)
}

/// Convert a YAML default, following the declared type when there is one
fn to_value(param: &str, declared: Option<&TypeSpec>, raw: &Yaml) -> Result<Value> {
    if raw.is_null() {
        return Ok(Value::None);
    }
    let Some(declared) = declared else {
        return infer(param, raw);
    };

    let value = match (declared, raw) {
        (&TypeSpec::Enum(ref ty), &Yaml::String(ref member)) => enum_member(param, ty, member)?,
        (&TypeSpec::List(Some(ref element)), &Yaml::Sequence(ref items)) => Value::List(
            items
                .iter()
                .map(|item| to_value(param, Some(&**element), item))
                .collect::<Result<_>>()?,
        ),
        (&TypeSpec::List(None), &Yaml::Sequence(_)) => infer(param, raw)?,
        (&TypeSpec::Primitive(Primitive::Str), &Yaml::String(ref text)) => Value::Str(text.clone()),
        (&TypeSpec::Primitive(Primitive::Bool), &Yaml::Bool(flag)) => Value::Bool(flag),
        (&TypeSpec::Primitive(Primitive::Int), &Yaml::Number(ref number)) if number.is_i64() => {
            number.as_i64().map_or(Value::None, Value::Int)
        }
        (&TypeSpec::Primitive(Primitive::Float), &Yaml::Number(ref number)) => {
            number.as_f64().map_or(Value::None, Value::Float)
        }
        _ => bail!(
            "Default of parameter '{param}' does not match its type '{}'",
            declared.display_name()
        ),
    };
    Ok(value)
}

/// Untyped defaults take the type their YAML form suggests
fn infer(param: &str, raw: &Yaml) -> Result<Value> {
    let value = match *raw {
        Yaml::Null => Value::None,
        Yaml::Bool(flag) => Value::Bool(flag),
        Yaml::String(ref text) => Value::Str(text.clone()),
        Yaml::Number(ref number) => match number.as_i64() {
            Some(int) => Value::Int(int),
            None => number.as_f64().map_or(Value::None, Value::Float),
        },
        Yaml::Sequence(ref items) => Value::List(
            items
                .iter()
                .map(|item| infer(param, item))
                .collect::<Result<_>>()?,
        ),
        Yaml::Mapping(_) | Yaml::Tagged(_) => {
            bail!("Default of parameter '{param}' must be a scalar or a list")
        }
    };
    Ok(value)
}

fn enum_member(param: &str, ty: &Arc<EnumType>, member: &str) -> Result<Value, FuncliError> {
    EnumValue::new(ty, member)
        .map(Value::Enum)
        .ok_or_else(|| FuncliError::InvalidChoice {
            argument: param.to_owned(),
            value: member.to_owned(),
            choices: ty.members().to_vec(),
        })
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::cli::Outcome;

    const MANIFEST: &str = r"
app:
  name: Tool
  version: 1.2.3
  author: gme
enums:
  - name: Status
    members: [active, idle]
  - name: Level
    module: other
    members: [low, high]
commands:
  - name: report
    doc: |
      Report a status
      :param status: current status
    params:
      - name: status
        type: Status
        default: idle
      - name: levels
        type: list[other.Level]
        default: [low]
      - name: tags
        default: [a, b]
      - name: note
        default: null
";

    fn echo() -> Handlers {
        Handlers::new().on("report", |args: &CallArgs| {
            Ok(Value::from(
                args.iter()
                    .map(|(name, value)| format!("{name}={}", value.repr()))
                    .collect::<Vec<_>>()
                    .join(" "),
            ))
        })
    }

    fn run(cli: &Cli, argv: &[&str]) -> Value {
        match cli.run_from(argv.iter().copied()).unwrap() {
            Outcome::Dispatched { result, .. } => result,
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn defaults_follow_resolved_types() {
        let cli = Manifest::from_yaml_str(MANIFEST).unwrap().bind(echo()).unwrap();
        assert_eq!(
            run(&cli, &["tool", "report"]),
            Value::from("status=Status.idle levels=[Level.low] tags=['a', 'b'] note=None")
        );
        assert_eq!(
            run(&cli, &["tool", "report", "--status", "active", "--levels", "high"]),
            Value::from("status=Status.active levels=[Level.high] tags=['a', 'b'] note=None")
        );
        assert_eq!(cli.version_line(), "Tool version:1.2.3 by gme");
    }

    #[test]
    fn help_shows_manifest_docs() {
        let cli = Manifest::from_yaml_str(MANIFEST).unwrap().bind(echo()).unwrap();
        let help = cli.full_help();
        assert!(help.contains("Report a status"));
        assert!(help.contains("[optional, Status, default:'Status.idle']: current status"));
        assert!(help.contains("[optional, list[str], default:['a', 'b']]"));
    }

    #[test]
    fn unbound_command_is_rejected() {
        let err = Manifest::from_yaml_str(MANIFEST)
            .unwrap()
            .bind(Handlers::new())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FuncliError>(),
            Some(&FuncliError::UnboundCommand { ref name }) if name == "report"
        ));
    }

    #[test]
    fn bad_defaults_are_rejected() {
        let text = MANIFEST.replace("default: idle", "default: asleep");
        let err = Manifest::from_yaml_str(&text).unwrap().bind(echo()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FuncliError>(),
            Some(&FuncliError::InvalidChoice { ref value, .. }) if value == "asleep"
        ));

        let text = MANIFEST.replace("type: Status", "type: Missing");
        let err = Manifest::from_yaml_str(&text).unwrap().bind(echo()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FuncliError>(),
            Some(&FuncliError::UnresolvedType { .. })
        ));

        let text = MANIFEST.replace("type: Status\n        default: idle", "type: int\n        default: idle");
        let err = Manifest::from_yaml_str(&text).unwrap().bind(echo()).unwrap_err();
        assert!(err.to_string().contains("does not match its type 'int'"));
    }
}
