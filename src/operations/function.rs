//! Declarative function signatures
//!
//! The embedding program declares each function it exposes: its name, its
//! docstring, its parameters (annotation and default) and the handler that
//! runs it.

use core::fmt;

use crate::operations::call_args::CallArgs;
use crate::types::{TypeSpec, Value};

/// Code run when a subcommand is invoked
pub type Handler = Box<dyn Fn(&CallArgs) -> anyhow::Result<Value>>;

/// One formal parameter
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    name: String,
    annotation: Option<TypeSpec>,
    default: Option<Value>,
}

impl Param {
    #[must_use]
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            annotation: None,
            default: None,
        }
    }

    /// Annotate the parameter with a type
    #[must_use]
    pub fn typed(mut self, annotation: TypeSpec) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Give the parameter a default, making it optional
    #[must_use]
    pub fn default<V: Into<Value>>(mut self, value: V) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Default to the `None` sentinel
    #[must_use]
    pub fn default_none(mut self) -> Self {
        self.default = Some(Value::None);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn annotation(&self) -> Option<&TypeSpec> {
        self.annotation.as_ref()
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }
}

/// A function to expose as a subcommand
pub struct Function {
    name: String,
    doc: Option<String>,
    params: Vec<Param>,
    handler: Handler,
}

impl Function {
    pub fn new<S, F>(name: S, handler: F) -> Self
    where
        S: Into<String>,
        F: Fn(&CallArgs) -> anyhow::Result<Value> + 'static,
    {
        Self::with_handler(name, Box::new(handler))
    }

    pub fn with_handler<S: Into<String>>(name: S, handler: Handler) -> Self {
        Self {
            name: name.into(),
            doc: None,
            params: Vec::new(),
            handler,
        }
    }

    /// Attach the docstring help is composed from
    #[must_use]
    pub fn doc<S: Into<String>>(mut self, doc: S) -> Self {
        self.doc = Some(doc.into());
        self
    }

    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn docstring(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    #[must_use]
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub(crate) fn into_parts(self) -> (String, Option<String>, Vec<Param>, Handler) {
        (self.name, self.doc, self.params, self.handler)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}
