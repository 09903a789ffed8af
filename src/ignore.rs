//! Path-ignore and content-ignore rules declared by a template's manifest.
//!
//! Both rule sets come from the same declared `ignore` list. Path rules keep
//! entries out of scanning; content rules keep specific identifiers from being
//! reported as content placeholders.

use std::collections::BTreeSet;
use std::path::{Path, MAIN_SEPARATOR};

use globset::{Glob, GlobSet, GlobSetBuilder};
use log::warn;

use crate::placeholder::bare_name;

/// Identifiers that are never content placeholders, whatever the manifest says.
pub const DEFAULT_IGNORED_CONTENT: &[&str] = &["tests", "snapshots"];

const RECURSIVE: &str = "**";

#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<String>,
    globs: GlobSet,
    content: BTreeSet<String>,
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self {
            patterns: Vec::new(),
            globs: GlobSet::empty(),
            content: default_content(),
        }
    }
}

fn default_content() -> BTreeSet<String> {
    DEFAULT_IGNORED_CONTENT
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn normalize(path: &str) -> String {
    if MAIN_SEPARATOR == '/' {
        path.to_string()
    } else {
        path.replace(MAIN_SEPARATOR, "/")
    }
}

/// Only `*` (and `**`) turns an entry into a glob. Other glob metacharacters
/// are matched literally.
fn has_glob_syntax(pattern: &str) -> bool {
    pattern.contains('*')
}

fn escape_literal_meta(pattern: &str) -> String {
    let mut escaped = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '?' | '[' | ']' | '{' | '}' => {
                escaped.push('[');
                escaped.push(c);
                escaped.push(']');
            }
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Forward-slash form of a path relative to the template root.
pub fn relative_str(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

impl IgnoreRules {
    /// Build rules from declared entries, merged with the built-in content tokens.
    ///
    /// An entry that does not compile as a glob is logged and kept for the
    /// literal rules only.
    pub fn new<S: AsRef<str>>(declared: &[S]) -> Self {
        let mut patterns = Vec::new();
        let mut builder = GlobSetBuilder::new();
        let mut content = default_content();

        for entry in declared {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }
            let pattern = normalize(entry);
            if has_glob_syntax(&pattern) {
                match Glob::new(&escape_literal_meta(&pattern)) {
                    Ok(glob) => {
                        builder.add(glob);
                    }
                    Err(e) => warn!("Ignore entry \"{pattern}\" is not a valid glob: {e}"),
                }
            }
            content.insert(bare_name(entry).to_string());
            patterns.push(pattern);
        }

        let globs = builder.build().unwrap_or_else(|e| {
            warn!("Ignore globs could not be combined, using literal rules only: {e}");
            GlobSet::empty()
        });

        Self {
            patterns,
            globs,
            content,
        }
    }

    /// Declared path patterns, separator-normalized.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Identifiers excluded from content placeholders, built-ins included.
    pub fn content_tokens(&self) -> impl Iterator<Item = &str> {
        self.content.iter().map(String::as_str)
    }

    pub fn is_path_ignored(&self, relative: &Path) -> bool {
        self.matches_path(&relative_str(relative))
    }

    /// Whether a forward-slash relative path is excluded from scanning.
    pub fn matches_path(&self, relative: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }
        let normalized = normalize(relative);
        let segments: Vec<&str> = normalized.split('/').collect();

        for pattern in &self.patterns {
            if *pattern == normalized {
                return true;
            }

            if !pattern.contains('/') {
                if segments.contains(&pattern.as_str()) {
                    return true;
                }
                continue;
            }

            if let Some(suffix) = pattern.strip_prefix("**/") {
                if normalized.ends_with(suffix) {
                    return true;
                }
                continue;
            }

            if let Some(prefix) = pattern
                .strip_suffix(RECURSIVE)
                .and_then(|p| p.strip_suffix('/'))
            {
                if normalized == prefix || normalized.starts_with(&format!("{prefix}/")) {
                    return true;
                }
                continue;
            }

            if normalized.starts_with(&format!("{pattern}/")) {
                return true;
            }
        }

        self.globs.is_match(&normalized)
    }

    /// Whether a matched token (bounded or bare) must not become a content placeholder.
    pub fn is_content_ignored(&self, token: &str) -> bool {
        self.content.contains(token) || self.content.contains(bare_name(token))
    }
}
