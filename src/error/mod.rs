//! Error handling module
//!
//! Defines the error taxonomy with exit codes, and the `ArgError` handlers raise

pub mod types;

pub use types::*;
