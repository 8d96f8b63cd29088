//! Command-line interface module
//!
//! Builds the parser from a registry and runs it

pub mod app;
pub mod assembler;
pub mod info;

pub use app::{Cli, Outcome};
pub use info::AppInfo;
