//! Application metadata shown by `--version` and the top-level help

use serde::Deserialize;

pub const DEFAULT_NAME: &str = "Anonymous script";
pub const DEFAULT_VERSION: &str = "0.0.0";
pub const DEFAULT_AUTHOR: &str = "Anonymous author";

/// Name, version, author and description of the embedding program
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub author: String,
    pub description: String,
}

impl AppInfo {
    #[must_use]
    pub fn new<N, V, A>(name: N, version: V, author: A) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            version: version.into(),
            author: author.into(),
            description: String::new(),
        }
    }

    #[must_use]
    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    /// Replace empty fields with their placeholders
    #[must_use]
    pub fn or_placeholders(mut self) -> Self {
        if self.name.trim().is_empty() {
            DEFAULT_NAME.clone_into(&mut self.name);
        }
        if self.version.trim().is_empty() {
            DEFAULT_VERSION.clone_into(&mut self.version);
        }
        if self.author.trim().is_empty() {
            DEFAULT_AUTHOR.clone_into(&mut self.author);
        }
        self
    }

    /// `<name> version:<version> by <author>`
    #[must_use]
    pub fn version_line(&self) -> String {
        format!("{} version:{} by {}", self.name, self.version, self.author)
    }

    /// Version line followed by the description
    #[must_use]
    pub fn about(&self) -> String {
        format!("{}\n{}", self.version_line(), self.description)
            .trim_end()
            .to_owned()
    }
}

impl Default for AppInfo {
    fn default() -> Self {
        Self::new(DEFAULT_NAME, DEFAULT_VERSION, DEFAULT_AUTHOR)
    }
}

/// Build an [`AppInfo`] from the calling crate's Cargo metadata
#[macro_export]
macro_rules! app_info {
    () => {
        $crate::cli::AppInfo::new(
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION"),
            env!("CARGO_PKG_AUTHORS"),
        )
        .with_description(env!("CARGO_PKG_DESCRIPTION"))
        .or_placeholders()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_line_format() {
        let info = AppInfo::new("Demo", "0.0.1", "gme");
        assert_eq!(info.version_line(), "Demo version:0.0.1 by gme");
        assert_eq!(info.about(), "Demo version:0.0.1 by gme");
    }

    #[test]
    fn placeholders_fill_gaps() {
        let info = AppInfo::new("", "", "").or_placeholders();
        assert_eq!(
            info.version_line(),
            "Anonymous script version:0.0.0 by Anonymous author"
        );
        assert_eq!(AppInfo::default(), info);
    }

    #[test]
    fn about_appends_description() {
        let info = AppInfo::new("Demo", "0.0.1", "gme").with_description("Does things");
        assert_eq!(info.about(), "Demo version:0.0.1 by gme\nDoes things");
    }

    #[test]
    fn cargo_metadata_macro() {
        let info = crate::app_info!();
        assert_eq!(info.name, "funcli");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
