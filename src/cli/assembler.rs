//! Parser assembly: subcommands and flags built from the registry
//!
//! Also reads parsed matches back into raw argument values, and rewrites
//! argv to invoke the default subcommand.

use std::ffi::OsString;

use clap::builder::{PossibleValue, PossibleValuesParser, ValueParser};
use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command, value_parser};
use tracing::debug;

use crate::cli::info::AppInfo;
use crate::operations::{Arity, ArgumentDescriptor, FunctionEntry, RawArgs, Registry};
use crate::types::{Primitive, Value};

/// Id of the `--full-help` flag
pub const FULL_HELP: &str = "full_help";
/// Id of the `--version` flag
pub const VERSION: &str = "version";
/// Prefix of the default subcommand's about text
pub const DEFAULT_TAG: &str = "[default if no subcommand provided]";

/// Flags that are answered without running any subcommand
const STANDALONE_FLAGS: [&str; 4] = ["-h", "--help", "--full-help", "--version"];

/// Build the whole parser surface
#[must_use]
pub fn build_command(info: &AppInfo, registry: &Registry) -> Command {
    let mut command = Command::new(info.name.clone())
        .about(info.about())
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .arg(
            Arg::new(FULL_HELP)
                .long("full-help")
                .action(ArgAction::SetTrue)
                .help("Show help for every subcommand"),
        )
        .arg(
            Arg::new(VERSION)
                .long("version")
                .action(ArgAction::SetTrue)
                .help("Show version"),
        );

    for entry in registry.entries() {
        let is_default = registry.default_subcommand() == Some(entry.name());
        command = command.subcommand(build_subcommand(entry, is_default));
    }
    command
}

fn build_subcommand(entry: &FunctionEntry, is_default: bool) -> Command {
    let about = if is_default {
        format!("{DEFAULT_TAG}\n{}", entry.description())
    } else {
        entry.description().to_owned()
    };
    // A repeated single-value flag keeps its last occurrence
    let mut command = Command::new(entry.name().to_owned())
        .about(about.trim_end().to_owned())
        .args_override_self(true);
    for descriptor in entry.arguments() {
        command = add_flag(command, descriptor);
    }
    command
}

fn add_flag(command: Command, descriptor: &ArgumentDescriptor) -> Command {
    let name = descriptor.name().to_owned();
    match descriptor.arity() {
        Arity::Toggle => {
            let negated = descriptor.negated_flag();
            command
                .arg(
                    Arg::new(name.clone())
                        .long(name.clone())
                        .action(ArgAction::SetTrue)
                        .help(descriptor.help_text().to_owned()),
                )
                .arg(
                    Arg::new(negated.clone())
                        .long(negated.clone())
                        .action(ArgAction::SetTrue)
                        .help(format!("Disable --{name}")),
                )
                .group(
                    ArgGroup::new(format!("{name}-toggle"))
                        .args([name, negated])
                        .required(descriptor.required())
                        .multiple(false),
                )
        }
        Arity::Single | Arity::Repeated => {
            let action = if descriptor.arity() == Arity::Repeated {
                ArgAction::Append
            } else {
                ArgAction::Set
            };
            command.arg(
                Arg::new(name.clone())
                    .long(name.clone())
                    .value_name(name.to_uppercase())
                    .action(action)
                    .value_parser(value_parser_for(descriptor))
                    .required(descriptor.required())
                    .help(descriptor.help_text().to_owned()),
            )
        }
    }
}

/// Parser converting one raw token: closed choice set, number, or plain text
fn value_parser_for(descriptor: &ArgumentDescriptor) -> ValueParser {
    if let Some(choices) = descriptor.choices() {
        return PossibleValuesParser::new(
            choices
                .iter()
                .map(|choice| PossibleValue::new(choice.clone())),
        )
        .into();
    }
    match descriptor.element_type() {
        Primitive::Int => value_parser!(i64).into(),
        Primitive::Float => value_parser!(f64).into(),
        Primitive::Str | Primitive::Bool => ValueParser::string(),
    }
}

/// Read a subcommand's matches back into raw values
///
/// Parameters the command line left alone receive their default; required
/// ones the parser let through are left out.
#[must_use]
pub fn collect_raw(entry: &FunctionEntry, matches: &ArgMatches) -> RawArgs {
    let mut raw = RawArgs::new();
    for descriptor in entry.arguments() {
        let supplied = match descriptor.arity() {
            Arity::Toggle => toggle_state(matches, descriptor),
            Arity::Single => read_values(matches, descriptor).and_then(|values| values.into_iter().next()),
            Arity::Repeated => read_values(matches, descriptor).map(Value::List),
        };
        if let Some(value) = descriptor.resolve(supplied) {
            raw.insert(descriptor.name(), value);
        }
    }
    raw
}

fn toggle_state(matches: &ArgMatches, descriptor: &ArgumentDescriptor) -> Option<Value> {
    if matches.get_flag(descriptor.name()) {
        Some(Value::Bool(true))
    } else if matches.get_flag(&descriptor.negated_flag()) {
        Some(Value::Bool(false))
    } else {
        None
    }
}

/// Explicit occurrences only; `None` when the flag was not given
fn read_values(matches: &ArgMatches, descriptor: &ArgumentDescriptor) -> Option<Vec<Value>> {
    let id = descriptor.name();
    let values = match descriptor.element_type() {
        Primitive::Int => matches.get_many::<i64>(id)?.copied().map(Value::Int).collect(),
        Primitive::Float => matches.get_many::<f64>(id)?.copied().map(Value::Float).collect(),
        Primitive::Str | Primitive::Bool => matches
            .get_many::<String>(id)?
            .cloned()
            .map(Value::Str)
            .collect(),
    };
    Some(values)
}

/// Insert the default subcommand when argv names none
///
/// Left untouched when the first argument is a registered subcommand, when a
/// standalone flag such as `--version` is present, or when no default exists.
#[must_use]
pub fn inject_default(registry: &Registry, mut argv: Vec<OsString>) -> Vec<OsString> {
    let Some(default) = registry.default_subcommand() else {
        return argv;
    };
    let first = argv.get(1).and_then(|arg| arg.to_str());
    if first.is_some_and(|token| registry.contains(token)) {
        return argv;
    }
    let standalone = argv
        .iter()
        .skip(1)
        .filter_map(|arg| arg.to_str())
        .any(|arg| STANDALONE_FLAGS.contains(&arg));
    if standalone {
        return argv;
    }

    debug!(default, "no subcommand given, invoking the default");
    let at = argv.len().min(1);
    argv.insert(at, OsString::from(default));
    argv
}

/// Top-level help followed by every subcommand's help, separated by rules
#[must_use]
pub fn render_full_help(command: &Command) -> String {
    let mut command = command.clone();
    command.build();
    let mut output = command.render_long_help().to_string();
    for subcommand in command.get_subcommands_mut() {
        output.push_str(&format!(
            "\n{}\n\nHelp for subcommand '{}':\n",
            "-".repeat(80),
            subcommand.get_name()
        ));
        output.push_str(&subcommand.render_help().to_string());
    }
    output
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "These are unit tests")]
mod tests {
    use super::*;
    use crate::operations::{Function, Param};
    use crate::types::TypeSpec;

    fn registry(default: Option<&str>) -> Registry {
        let noop = |_: &crate::operations::CallArgs| Ok::<_, anyhow::Error>(Value::None);
        Registry::register(
            [
                Function::new("simple", noop).doc("simple function with no args"),
                Function::new("a_bool", noop).param(Param::new("a_bool").typed(TypeSpec::BOOL)),
                Function::new("default_value", noop)
                    .param(Param::new("a_int").typed(TypeSpec::INT).default(1))
                    .param(
                        Param::new("a_list")
                            .typed(TypeSpec::list_of(TypeSpec::STR))
                            .default(vec!["a", "b"]),
                    ),
                Function::new("an_int_list", noop)
                    .param(Param::new("a_list").typed(TypeSpec::list_of(TypeSpec::INT))),
            ],
            default,
        )
        .unwrap()
    }

    fn parse(registry: &Registry, argv: &[&str]) -> Result<RawArgs, clap::Error> {
        let command = build_command(&AppInfo::new("Demo", "0.0.1", "gme"), registry);
        let matches = command.try_get_matches_from(argv)?;
        let (name, sub) = matches.subcommand().unwrap();
        Ok(collect_raw(registry.get(name).unwrap(), sub))
    }

    fn argv(items: &[&str]) -> Vec<OsString> {
        items.iter().map(OsString::from).collect()
    }

    #[test]
    fn toggles_resolve_to_one_boolean() {
        let registry = registry(None);
        let on = parse(&registry, &["demo", "a_bool", "--a_bool"]).unwrap();
        assert_eq!(on.get("a_bool"), Some(&Value::Bool(true)));

        let off = parse(&registry, &["demo", "a_bool", "--no-a_bool"]).unwrap();
        assert_eq!(off.get("a_bool"), Some(&Value::Bool(false)));

        let neither = parse(&registry, &["demo", "a_bool"]).unwrap_err();
        assert_eq!(neither.kind(), clap::error::ErrorKind::MissingRequiredArgument);

        assert!(parse(&registry, &["demo", "a_bool", "--a_bool", "--no-a_bool"]).is_err());
        assert!(parse(&registry, &["demo", "a_bool", "--no-a_bool", "--a_bool"]).is_err());

        let twice = parse(&registry, &["demo", "a_bool", "--no-a_bool", "--no-a_bool"]).unwrap();
        assert_eq!(twice.get("a_bool"), Some(&Value::Bool(false)));
    }

    #[test]
    fn repeated_single_value_flag_keeps_last() {
        let registry = registry(None);
        let raw = parse(
            &registry,
            &["demo", "default_value", "--a_int", "1", "--a_int", "2"],
        )
        .unwrap();
        assert_eq!(raw.get("a_int"), Some(&Value::Int(2)));
    }

    #[test]
    fn repeated_flags_collect_typed_values() {
        let registry = registry(None);
        let raw = parse(
            &registry,
            &["demo", "an_int_list", "--a_list", "11", "--a_list", "22", "--a_list", "33"],
        )
        .unwrap();
        assert_eq!(raw.get("a_list"), Some(&Value::from(vec![11_i64, 22, 33])));

        assert!(parse(&registry, &["demo", "an_int_list", "--a_list", "x"]).is_err());
    }

    #[test]
    fn explicit_occurrences_replace_default_list() {
        let registry = registry(None);
        let raw = parse(&registry, &["demo", "default_value", "--a_list", "x"]).unwrap();
        assert_eq!(raw.get("a_list"), Some(&Value::from(vec!["x"])));
        assert_eq!(raw.get("a_int"), Some(&Value::Int(1)));

        let raw = parse(&registry, &["demo", "default_value"]).unwrap();
        assert_eq!(raw.get("a_list"), Some(&Value::from(vec!["a", "b"])));
    }

    #[test]
    fn default_is_injected_only_without_subcommand() {
        let registry = registry(Some("simple"));
        assert_eq!(inject_default(&registry, argv(&["demo"])), argv(&["demo", "simple"]));
        assert_eq!(
            inject_default(&registry, argv(&["demo", "a_bool", "--a_bool"])),
            argv(&["demo", "a_bool", "--a_bool"])
        );
        assert_eq!(
            inject_default(&registry, argv(&["demo", "--version"])),
            argv(&["demo", "--version"])
        );
        assert_eq!(
            inject_default(&registry, argv(&["demo", "unknown"])),
            argv(&["demo", "simple", "unknown"])
        );
        assert_eq!(inject_default(&self::registry(None), argv(&["demo"])), argv(&["demo"]));
    }

    #[test]
    fn default_subcommand_is_tagged_in_help() {
        let registry = registry(Some("simple"));
        let mut command = build_command(&AppInfo::new("Demo", "0.0.1", "gme"), &registry);
        let help = command.render_long_help().to_string();
        assert!(help.contains("Demo version:0.0.1 by gme"));
        assert!(help.contains(DEFAULT_TAG));
    }

    #[test]
    fn full_help_covers_every_subcommand() {
        let registry = registry(None);
        let command = build_command(&AppInfo::new("Demo", "0.0.1", "gme"), &registry);
        let help = render_full_help(&command);
        for name in ["simple", "a_bool", "default_value", "an_int_list"] {
            assert!(help.contains(&format!("Help for subcommand '{name}':")));
        }
        assert!(help.contains("[optional, int, default:1]"));
        assert!(help.contains(&"-".repeat(80)));
    }
}
