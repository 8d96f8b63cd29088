//! YAML manifest loading and parsing

use std::path::Path;

use anyhow::{Context as _, Result, anyhow};
use tracing::debug;

use crate::config::Manifest;
use crate::system::System;

/// Load and parse a YAML manifest from file
///
/// # Errors
///
/// Returns an error if the file does not exist, cannot be read, or is not a
/// valid manifest.
pub fn load_manifest(system: &dyn System, path: &str) -> Result<Manifest> {
    let path_obj = Path::new(path);

    if !system.exists(path_obj) {
        return Err(anyhow!("Manifest file not found: {path}"));
    }

    let content = system
        .read_to_string(path_obj)
        .with_context(|| format!("Failed to read manifest file: {path}"))?;

    let manifest = parse_manifest(&content)
        .with_context(|| format!("Failed to parse YAML manifest in file: {path}"))?;
    debug!(
        path,
        commands = manifest.commands.len(),
        enums = manifest.enums.len(),
        "manifest loaded"
    );
    Ok(manifest)
}

/// Parse a manifest from YAML text
///
/// # Errors
///
/// Returns an error on invalid YAML or an unexpected structure.
pub fn parse_manifest(content: &str) -> Result<Manifest> {
    serde_yaml::from_str(content).context("Failed to parse YAML manifest")
}
