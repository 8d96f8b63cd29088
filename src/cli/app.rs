//! The assembled program: parse, dispatch, report

use std::ffi::OsString;
use std::io;

use anyhow::Result;
use clap::Command;
use tracing::{debug, info};

use crate::cli::assembler::{FULL_HELP, VERSION, build_command, collect_raw, inject_default, render_full_help};
use crate::cli::info::AppInfo;
use crate::error::FuncliError;
use crate::operations::{CallArgs, Dispatched, Function, Registry, dispatch};
use crate::types::Value;

/// What a completed run produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// `--version` was given
    Version(String),
    /// `--full-help` was given
    FullHelp(String),
    /// A subcommand ran to completion
    Dispatched {
        subcommand: String,
        result: Value,
        args: CallArgs,
    },
}

/// A command-line program built from a set of functions
#[derive(Debug)]
pub struct Cli {
    info: AppInfo,
    registry: Registry,
    command: Command,
}

impl Cli {
    #[must_use]
    pub fn new(info: AppInfo, registry: Registry) -> Self {
        let command = build_command(&info, &registry);
        Self {
            info,
            registry,
            command,
        }
    }

    /// Register `functions` and assemble the parser over them
    ///
    /// # Errors
    ///
    /// Returns any registration error, see [`Registry::register`].
    pub fn from_functions<I>(
        info: AppInfo,
        functions: I,
        default_subcommand: Option<&str>,
    ) -> Result<Self, FuncliError>
    where
        I: IntoIterator<Item = Function>,
    {
        let registry = Registry::register(functions, default_subcommand)?;
        Ok(Self::new(info, registry))
    }

    #[must_use]
    pub const fn info(&self) -> &AppInfo {
        &self.info
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    #[must_use]
    pub const fn command(&self) -> &Command {
        &self.command
    }

    #[must_use]
    pub fn version_line(&self) -> String {
        self.info.version_line()
    }

    #[must_use]
    pub fn full_help(&self) -> String {
        render_full_help(&self.command)
    }

    /// Parse `argv` (program name first) and run the selected subcommand
    ///
    /// Nothing is printed; see [`Cli::execute`] for the reporting layer.
    ///
    /// # Errors
    ///
    /// - `Parse` for anything the parser rejects, including `--help`
    /// - `SubcommandRequired` when no subcommand is given and none is default
    /// - any error from [`dispatch`]
    pub fn run_from<I, T>(&self, argv: I) -> Result<Outcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let argv: Vec<OsString> = argv.into_iter().map(Into::into).collect();
        let argv = inject_default(&self.registry, argv);

        let mut command = self.command.clone();
        let matches = command
            .try_get_matches_from_mut(&argv)
            .map_err(FuncliError::from)?;

        if matches.get_flag(FULL_HELP) {
            return Ok(Outcome::FullHelp(render_full_help(&command)));
        }
        if matches.get_flag(VERSION) {
            return Ok(Outcome::Version(self.version_line()));
        }

        let Some((name, sub_matches)) = matches.subcommand() else {
            return Err(FuncliError::SubcommandRequired {
                usage: command.render_usage().to_string(),
            }
            .into());
        };
        let entry = self
            .registry
            .get(name)
            .ok_or_else(|| FuncliError::UnknownSubcommand {
                name: name.to_owned(),
            })?;

        let raw = collect_raw(entry, sub_matches);
        let Dispatched { result, args } = dispatch(&self.registry, name, raw)?;
        Ok(Outcome::Dispatched {
            subcommand: name.to_owned(),
            result,
            args,
        })
    }

    /// Run and report, returning the process exit code
    ///
    /// Recoverable errors are printed and mapped to their exit code.
    ///
    /// # Errors
    ///
    /// Returns every failure that is not a recoverable [`FuncliError`].
    pub fn execute<I, T>(&self, argv: I) -> Result<i32>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let err = match self.run_from(argv) {
            Ok(Outcome::Version(line)) => {
                println!("{line}");
                return Ok(0);
            }
            Ok(Outcome::FullHelp(text)) => {
                println!("{text}");
                return Ok(0);
            }
            Ok(Outcome::Dispatched {
                subcommand, result, ..
            }) => {
                info!(subcommand, result = %result.repr(), "subcommand finished");
                return Ok(0);
            }
            Err(err) => err,
        };

        match err.downcast::<FuncliError>() {
            Ok(err) if err.is_recoverable() => Ok(report(&err)?),
            Ok(err) => Err(err.into()),
            Err(err) => Err(err),
        }
    }

    /// [`Cli::execute`] over the process arguments
    ///
    /// # Errors
    ///
    /// See [`Cli::execute`].
    pub fn run(&self) -> Result<i32> {
        self.execute(std::env::args_os())
    }
}

fn report(err: &FuncliError) -> io::Result<i32> {
    debug!(error = %err, "reporting recoverable error");
    match *err {
        FuncliError::Parse(ref parse) => parse.print()?,
        FuncliError::SubcommandRequired { ref usage } => {
            println!("{err}");
            println!("{usage}");
        }
        FuncliError::Argument(_) | FuncliError::MissingArgument { .. } => {
            println!("ERROR: {err}");
            println!();
        }
        _ => eprintln!("error: {err}"),
    }
    Ok(err.exit_code())
}
