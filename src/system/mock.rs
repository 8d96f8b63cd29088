//! Mock system implementation for testing

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::System;

/// In-memory implementation of [`System`]
///
/// # Example
/// ```
/// use funcli::system::{MockSystem, System};
/// use std::path::Path;
///
/// let system = MockSystem::new()
///     .with_file("/cli/manifest.yaml", "commands: []").unwrap();
///
/// assert!(system.exists(Path::new("/cli/manifest.yaml")));
/// assert!(!system.exists(Path::new("/cli/other.yaml")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockSystem {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MockSystem {
    #[must_use]
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file with contents (builder pattern)
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory state is poisoned
    #[inline]
    pub fn with_file<P: AsRef<Path>>(self, path: P, contents: &str) -> io::Result<Self> {
        let mut files = self
            .files
            .write()
            .map_err(|e| io::Error::other(e.to_string()))?;
        files.insert(path.as_ref().to_path_buf(), contents.to_owned());
        drop(files);
        Ok(self)
    }
}

impl System for MockSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let files = self
            .files
            .read()
            .map_err(|e| io::Error::other(e.to_string()))?;
        files.get(path).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("File not found: {}", path.display()),
            )
        })
    }

    fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .is_ok_and(|files| files.contains_key(path))
    }
}
