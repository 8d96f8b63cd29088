//! Configuration management module
//!
//! A YAML manifest declares the program metadata, the enumerations and the
//! commands; handlers are bound to the commands by name in code.

pub mod bind;
pub mod yaml;

use serde::{Deserialize, Deserializer};

use crate::cli::AppInfo;
use crate::system::System;

pub use bind::Handlers;

/// Root of a YAML manifest
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Program metadata; missing fields take their placeholders
    #[serde(default)]
    pub app: AppInfo,

    /// Subcommand run when argv names none
    #[serde(default)]
    pub default_subcommand: Option<String>,

    /// Enumerations resolvable by the parameters' `type`
    #[serde(default)]
    pub enums: Vec<EnumConfig>,

    /// Commands, in the order they are registered
    #[serde(default)]
    pub commands: Vec<CommandConfig>,
}

/// An enumeration declared in the manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnumConfig {
    pub name: String,

    /// Module qualifier; the home module when absent
    #[serde(default)]
    pub module: Option<String>,

    pub members: Vec<String>,
}

/// A command declared in the manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandConfig {
    pub name: String,

    /// Docstring, with `:param name:` tags
    #[serde(default)]
    pub doc: Option<String>,

    #[serde(default)]
    pub params: Vec<ParamConfig>,
}

/// A parameter declared in the manifest
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamConfig {
    pub name: String,

    /// Textual type name such as `int`, `list[str]` or `Status`
    #[serde(default, rename = "type")]
    pub type_name: Option<String>,

    /// `None` when absent (required); `Some(Null)` for an explicit `null`
    #[serde(default, deserialize_with = "present")]
    pub default: Option<serde_yaml::Value>,
}

/// Keep an explicit `null` apart from a missing key
fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<serde_yaml::Value>, D::Error> {
    serde_yaml::Value::deserialize(deserializer).map(Some)
}

impl Manifest {
    /// Load a manifest from file
    ///
    /// # Errors
    ///
    /// See [`yaml::load_manifest`].
    pub fn load_from_file(system: &dyn System, path: &str) -> anyhow::Result<Self> {
        yaml::load_manifest(system, path)
    }

    /// Parse a manifest from YAML text
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid manifest.
    pub fn from_yaml_str(text: &str) -> anyhow::Result<Self> {
        yaml::parse_manifest(text)
    }
}
