//! Placeholder tokens: `____NAME____` in file names and file bodies.

pub mod stream;

use std::borrow::Cow;
use std::sync::OnceLock;

use indexmap::IndexMap;
use regex_lite::{NoExpand, Regex};

use crate::answers::{answer_string, Answers};

/// Marker on both sides of a placeholder identifier.
///
/// Changing it breaks every existing template.
pub const BOUNDARY: &str = "____";

fn placeholder_regex() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!("{BOUNDARY}([A-Za-z_][A-Za-z0-9_]*?){BOUNDARY}"))
            .expect("placeholder grammar is a valid pattern")
    })
}

/// A placeholder token found in a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderMatch<'a> {
    /// The full token, boundaries included.
    pub token: &'a str,
    /// The bare identifier.
    pub name: &'a str,
}

/// All non-overlapping placeholder tokens in `text`, left to right.
pub fn find_placeholders(text: &str) -> impl Iterator<Item = PlaceholderMatch<'_>> {
    placeholder_regex().captures_iter(text).filter_map(|caps| {
        let token = caps.get(0)?.as_str();
        let name = caps.get(1)?.as_str();
        Some(PlaceholderMatch { token, name })
    })
}

/// Wrap a bare identifier in boundary markers.
pub fn token_for(name: &str) -> String {
    format!("{BOUNDARY}{name}{BOUNDARY}")
}

/// Strip boundary markers from a fully bounded token. Bare identifiers pass through.
pub fn bare_name(token: &str) -> &str {
    token
        .strip_prefix(BOUNDARY)
        .and_then(|rest| rest.strip_suffix(BOUNDARY))
        .filter(|name| !name.is_empty())
        .unwrap_or(token)
}

/// Bytes that can appear inside a placeholder token, boundaries included.
pub fn is_identifier_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

/// A discovered placeholder paired with the matcher that substitutes exactly it.
#[derive(Debug, Clone)]
pub struct Replacer {
    name: String,
    matcher: Regex,
}

impl Replacer {
    pub fn new(name: &str) -> Self {
        let matcher = Regex::new(&regex_lite::escape(&token_for(name)))
            .expect("escaped literal is a valid pattern");
        Self {
            name: name.to_string(),
            matcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.matcher.is_match(text)
    }

    /// Replace every occurrence of this placeholder with `value`, taken literally.
    pub fn replace_all<'t>(&self, text: &'t str, value: &str) -> Cow<'t, str> {
        self.matcher.replace_all(text, NoExpand(value))
    }
}

/// Insertion-ordered set of replacers, unique by identifier.
#[derive(Debug, Clone, Default)]
pub struct ReplacerSet {
    replacers: IndexMap<String, Replacer>,
}

impl ReplacerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a replacer for `name` unless one exists. Returns true if it was new.
    pub fn insert(&mut self, name: &str) -> bool {
        if self.replacers.contains_key(name) {
            return false;
        }
        self.replacers
            .insert(name.to_string(), Replacer::new(name));
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.replacers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.replacers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.replacers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Replacer> {
        self.replacers.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.replacers.keys().map(String::as_str)
    }

    /// Apply each replacer that has an answer, in discovery order.
    ///
    /// Replacers without an answer leave their token untouched.
    pub fn apply<'t>(&self, text: &'t str, answers: &Answers) -> Cow<'t, str> {
        let mut result = Cow::Borrowed(text);
        for replacer in self.iter() {
            let Some(value) = answer_string(answers, replacer.name()) else {
                continue;
            };
            if !replacer.is_match(&result) {
                continue;
            }
            result = Cow::Owned(replacer.replace_all(&result, &value).into_owned());
        }
        result
    }
}
