//! System abstraction for filesystem reads
//!
//! Manifests are loaded through this trait so tests can swap in an
//! in-memory implementation.

use std::io;
use std::path::Path;

pub mod mock;
pub mod real;

pub use mock::MockSystem;
pub use real::RealSystem;

/// Filesystem operations needed to load a manifest
///
/// # Implementations
/// - `RealSystem`: delegates to `std::fs`
/// - `MockSystem`: in-memory files for tests
pub trait System: Send + Sync {
    /// Read entire file contents as a string
    fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;
}
