//! Custom error types with exit codes

use thiserror::Error;

/// Main error type for funcli operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum FuncliError {
    /// A textual type name could not be mapped to a known type
    #[error("Unresolved type: '{name}'")]
    UnresolvedType { name: String },

    /// A type the flag layer cannot express (nested lists, list of bool)
    #[error("Unsupported type for parameter '{parameter}': {type_name}")]
    UnsupportedType { parameter: String, type_name: String },

    /// Two registered functions share a name
    #[error("Duplicate subcommand: '{name}'")]
    DuplicateSubcommand { name: String },

    /// Two parameters of one function share a name
    #[error("Duplicate parameter '{parameter}' in function '{function}'")]
    DuplicateParameter { function: String, parameter: String },

    /// A parameter name collides with a flag owned by the parser
    #[error("Parameter name '{parameter}' in function '{function}' is reserved")]
    ReservedParameter { function: String, parameter: String },

    /// A parameter name that cannot become a flag
    #[error("Parameter name '{parameter}' in function '{function}' is not an identifier")]
    InvalidParameterName { function: String, parameter: String },

    /// The default subcommand names no registered function
    #[error("Unknown subcommand: '{name}'")]
    UnknownSubcommand { name: String },

    /// A manifest command has no handler bound to it
    #[error("No handler bound to command '{name}'")]
    UnboundCommand { name: String },

    /// Enumeration text outside the closed set of members
    #[error("argument --{argument}: invalid choice: '{value}' (choose from {})", quoted(.choices))]
    InvalidChoice {
        argument: String,
        value: String,
        choices: Vec<String>,
    },

    /// No subcommand given and no default configured
    #[error("Subcommand required!")]
    SubcommandRequired { usage: String },

    /// Domain-level error raised by a handler
    #[error(transparent)]
    Argument(#[from] ArgError),

    /// A handler asked for a parameter its invocation does not carry
    #[error("{function}() missing required argument: '{argument}'")]
    MissingArgument { function: String, argument: String },

    /// A handler read a parameter as the wrong type
    #[error("Argument '{argument}' is {actual}, not {expected}")]
    TypeMismatch {
        argument: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Argument parsing failed, or help was requested
    #[error(transparent)]
    Parse(#[from] clap::Error),
}

impl FuncliError {
    /// Get the appropriate exit code for this error type
    #[must_use]
    #[inline]
    pub fn exit_code(&self) -> i32 {
        match *self {
            Self::InvalidChoice { .. } => 2,
            Self::Parse(ref err) => err.exit_code(),
            Self::UnresolvedType { .. }
            | Self::UnsupportedType { .. }
            | Self::DuplicateSubcommand { .. }
            | Self::DuplicateParameter { .. }
            | Self::ReservedParameter { .. }
            | Self::InvalidParameterName { .. }
            | Self::UnknownSubcommand { .. }
            | Self::UnboundCommand { .. }
            | Self::SubcommandRequired { .. }
            | Self::Argument(_)
            | Self::MissingArgument { .. }
            | Self::TypeMismatch { .. } => 1,
        }
    }

    /// Whether the error is reported to the user instead of aborting the run
    #[must_use]
    #[inline]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            *self,
            Self::Argument(_)
                | Self::MissingArgument { .. }
                | Self::SubcommandRequired { .. }
                | Self::InvalidChoice { .. }
                | Self::Parse(_)
        )
    }

    /// Create an unresolved type error
    #[inline]
    pub fn unresolved<S: Into<String>>(name: S) -> Self {
        Self::UnresolvedType { name: name.into() }
    }

    /// Create a missing argument error
    #[inline]
    pub fn missing<F: Into<String>, A: Into<String>>(function: F, argument: A) -> Self {
        Self::MissingArgument {
            function: function.into(),
            argument: argument.into(),
        }
    }
}

/// Error a handler returns to reject one of its argument values
///
/// Rendered to the user as `ERROR: <arg_name>: <message>` with exit code 1.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{arg_name}: {message}")]
pub struct ArgError {
    pub arg_name: String,
    pub message: String,
}

impl ArgError {
    #[inline]
    pub fn new<A: Into<String>, M: Into<String>>(arg_name: A, message: M) -> Self {
        Self {
            arg_name: arg_name.into(),
            message: message.into(),
        }
    }
}

fn quoted(choices: &[String]) -> String {
    choices
        .iter()
        .map(|choice| format!("'{choice}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
