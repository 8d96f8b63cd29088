//! Core operations
//!
//! Turning declared functions into argument descriptors, registering them,
//! and dispatching parsed input back to them

pub mod call_args;
pub mod descriptor;
pub mod dispatch;
pub mod docstring;
pub mod function;
pub mod registry;

pub use call_args::CallArgs;
pub use descriptor::{Arity, ArgumentDescriptor};
pub use dispatch::{Dispatched, RawArgs, coerce, dispatch};
pub use docstring::{Docstring, extract_description, extract_param_description};
pub use function::{Function, Handler, Param};
pub use registry::{FunctionEntry, Registry};
