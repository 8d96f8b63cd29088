//! Docstring parsing
//!
//! A docstring is free text followed by `:param <name>:` tags and an optional
//! `:return:` tag. The text before the first tag describes the function; each
//! tag's text runs until the next tag.

use std::sync::LazyLock;

use regex::Regex;

#[expect(clippy::expect_used, reason = "The pattern is a literal")]
static PARAM_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^:param\s+([A-Za-z_][A-Za-z0-9_]*)\s*:\s*(.*)$").expect("valid param tag pattern")
});

#[expect(clippy::expect_used, reason = "The pattern is a literal")]
static RETURN_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:return:\s*(.*)$").expect("valid return tag pattern"));

/// A parsed docstring
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Docstring {
    description: String,
    params: Vec<(String, String)>,
    returns: String,
}

enum Section {
    Description,
    Param(usize),
    Returns,
}

impl Docstring {
    #[must_use]
    pub fn parse(doc: &str) -> Self {
        let mut description = Vec::new();
        let mut params: Vec<(String, Vec<&str>)> = Vec::new();
        let mut returns = Vec::new();
        let mut section = Section::Description;

        for line in doc.lines().map(str::trim) {
            if let Some(caps) = PARAM_TAG.captures(line) {
                let name = caps.get(1).map_or("", |m| m.as_str());
                let first = caps.get(2).map_or("", |m| m.as_str());
                params.push((name.to_owned(), vec![first]));
                section = Section::Param(params.len() - 1);
                continue;
            }
            if let Some(caps) = RETURN_TAG.captures(line) {
                returns.push(caps.get(1).map_or("", |m| m.as_str()));
                section = Section::Returns;
                continue;
            }
            match section {
                Section::Description => description.push(line),
                Section::Param(index) => {
                    if let Some((_, lines)) = params.get_mut(index) {
                        lines.push(line);
                    }
                }
                Section::Returns => returns.push(line),
            }
        }

        Self {
            description: join(&description),
            params: params
                .into_iter()
                .map(|(name, lines)| (name, join(&lines)))
                .collect(),
            returns: join(&returns),
        }
    }

    /// Whole-function description
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Description of one parameter; empty when it has no tag
    #[must_use]
    pub fn param(&self, name: &str) -> &str {
        self.params
            .iter()
            .find(|&&(ref tagged, _)| tagged == name)
            .map_or("", |&(_, ref text)| text.as_str())
    }

    #[must_use]
    pub fn returns(&self) -> &str {
        &self.returns
    }
}

fn join(lines: &[&str]) -> String {
    lines.join("\n").trim().to_owned()
}

/// Text preceding the first `:param` or `:return:` tag
#[must_use]
pub fn extract_description(doc: &str) -> String {
    Docstring::parse(doc).description
}

/// Text of the `:param <name>:` tag, empty when absent
#[must_use]
pub fn extract_param_description(doc: &str, name: &str) -> String {
    Docstring::parse(doc).param(name).to_owned()
}
