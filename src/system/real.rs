//! Real system implementation using `std::fs`

use super::System;
use std::fs;
use std::io;
use std::path::Path;

/// Production implementation of [`System`]
#[derive(Debug, Clone, Copy, Default)]
pub struct RealSystem;

impl RealSystem {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl System for RealSystem {
    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
