//! `funcli` - Turn plain functions into a command-line interface
//!
//! Each declared function becomes a subcommand. Its parameters become typed
//! `--flags` (booleans get a `--no-` twin, lists are repeatable, enumerations
//! take a closed set of choices), its docstring becomes the help text, and
//! parsed input is coerced back into typed arguments for the handler.
//!
//! ```no_run
//! use funcli::{AppInfo, Cli, Function, Param, TypeSpec, Value};
//!
//! let cli = Cli::from_functions(
//!     AppInfo::new("Demo", "0.0.1", "gme"),
//!     [Function::new("an_int", |args| Ok(Value::from(args.int("value")? * 2)))
//!         .doc("Double a number\n:param value: the number")
//!         .param(Param::new("value").typed(TypeSpec::INT))],
//!     None,
//! )?;
//! std::process::exit(cli.run()?);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod operations;
pub mod system;
pub mod types;

use tracing_subscriber::{EnvFilter, fmt};

pub use cli::{AppInfo, Cli, Outcome};
pub use config::{Handlers, Manifest};
pub use error::{ArgError, FuncliError};
pub use operations::{CallArgs, Function, Param, Registry};
pub use types::{EnumType, EnumValue, Enumeration, TypeSpec, TypeTable, Value};

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`, `warn` by default
///
/// Does nothing when a global subscriber is already set.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout belongs to the program's own output
    let _ = fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
