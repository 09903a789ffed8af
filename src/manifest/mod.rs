//! The optional question manifest at a template root.
//!
//! `.questions.json` is tried first. `.questions.rhai` is evaluated in a
//! sandboxed Rhai engine and must end with a map expression. Anything that
//! fails to load or fails the `{ questions: [...] }` shape check is logged
//! and treated as absent.

mod rhai_runtime;

use std::collections::BTreeMap;
use std::path::{Component, Path};

use log::{debug, info, warn};
use serde_json::Value;

pub const MANIFEST_JSON: &str = ".questions.json";
pub const MANIFEST_SCRIPT: &str = ".questions.rhai";
/// Recognized so it is never copied, but never executed.
pub const MANIFEST_JS: &str = ".questions.js";

pub const MANIFEST_FILES: [&str; 3] = [MANIFEST_JSON, MANIFEST_SCRIPT, MANIFEST_JS];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuestionManifest {
    /// Question entries exactly as declared, handed on untouched.
    pub questions: Vec<Value>,
    /// String entries of the declared `ignore` list. Anything else is dropped.
    pub ignore: Vec<String>,
}

impl QuestionManifest {
    /// The entries that can be prompted for: objects with a non-empty string `name`.
    pub fn prompts(&self) -> Vec<Question> {
        self.questions.iter().filter_map(Question::from_value).collect()
    }
}

/// One prompt definition, read leniently from a question entry.
///
/// Keys this crate does not use are kept in `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub name: String,
    pub message: Option<String>,
    /// The entry's `type` key.
    pub kind: Option<String>,
    pub default: Option<Value>,
    pub required: bool,
    pub options: Vec<Value>,
    pub extra: BTreeMap<String, Value>,
}

impl Question {
    pub fn from_value(value: &Value) -> Option<Self> {
        let entry = value.as_object()?;
        let name = entry
            .get("name")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|name| !name.is_empty())?;
        let text = |key: &str| entry.get(key).and_then(Value::as_str).map(String::from);

        Some(Self {
            name: name.to_string(),
            message: text("message"),
            kind: text("type"),
            default: entry.get("default").filter(|v| !v.is_null()).cloned(),
            required: entry
                .get("required")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            options: entry
                .get("options")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default(),
            extra: entry
                .iter()
                .filter(|(key, _)| !QUESTION_KEYS.contains(&key.as_str()))
                .map(|(key, v)| (key.clone(), v.clone()))
                .collect(),
        })
    }

    pub fn prompt_text(&self) -> &str {
        self.message.as_deref().unwrap_or(&self.name)
    }
}

const QUESTION_KEYS: &[&str] = &["name", "message", "type", "default", "required", "options"];

/// True for a reserved manifest file sitting directly under the template root.
pub fn is_manifest_entry(relative: &Path) -> bool {
    let mut components = relative.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(name)), None) => name
            .to_str()
            .is_some_and(|name| MANIFEST_FILES.contains(&name)),
        _ => false,
    }
}

/// Check the `{ questions: array }` shape and split out the ignore list.
///
/// Only `questions` is validated. A missing or non-array `ignore` means no
/// declared rules.
pub fn parse_manifest_value(value: Value) -> Result<QuestionManifest, String> {
    let Value::Object(mut map) = value else {
        return Err("expected an object with a 'questions' array".into());
    };
    let Some(Value::Array(questions)) = map.remove("questions") else {
        return Err("expected an object with a 'questions' array".into());
    };

    let ignore = match map.remove("ignore") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(entries)) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(s) => Some(s),
                other => {
                    warn!("Ignoring non-string ignore entry {other}");
                    None
                }
            })
            .collect(),
        Some(other) => {
            warn!("Ignoring 'ignore' value that is not a list: {other}");
            Vec::new()
        }
    };

    Ok(QuestionManifest { questions, ignore })
}

/// Load the manifest at `template_root`, if one is present and well-formed.
pub fn load_manifest(template_root: &Path) -> Option<QuestionManifest> {
    let json_path = template_root.join(MANIFEST_JSON);
    if json_path.is_file() {
        let loaded = std::fs::read_to_string(&json_path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                serde_json::from_str::<Value>(&content).map_err(|e| e.to_string())
            })
            .and_then(parse_manifest_value);
        match loaded {
            Ok(manifest) => {
                info!(
                    "Loaded {MANIFEST_JSON} ({} questions)",
                    manifest.questions.len()
                );
                return Some(manifest);
            }
            Err(e) => warn!("Failed to parse {MANIFEST_JSON}: {e}"),
        }
    }

    let script_path = template_root.join(MANIFEST_SCRIPT);
    if script_path.is_file() {
        let loaded = std::fs::read_to_string(&script_path)
            .map_err(|e| e.to_string())
            .and_then(|script| rhai_runtime::eval_manifest(&script))
            .and_then(parse_manifest_value);
        match loaded {
            Ok(manifest) => {
                info!(
                    "Loaded {MANIFEST_SCRIPT} ({} questions)",
                    manifest.questions.len()
                );
                return Some(manifest);
            }
            Err(e) => warn!("Failed to load {MANIFEST_SCRIPT}: {e}"),
        }
    }

    if template_root.join(MANIFEST_JS).is_file() {
        warn!("{MANIFEST_JS} cannot be executed; port it to {MANIFEST_SCRIPT}");
    }

    debug!("No question manifest in {}", template_root.display());
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;

    #[test]
    fn test_load_json_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_JSON),
            r#"{
                "questions": [
                    {"name": "PROJECT", "message": "Project name?", "default": "demo"},
                    {"name": "LICENSE", "type": "list", "options": ["MIT", "ISC"], "custom": 1}
                ],
                "ignore": ["vendor/**"]
            }"#,
        )
        .unwrap();

        let manifest = load_manifest(dir.path()).unwrap();
        assert_eq!(manifest.questions.len(), 2);
        let prompts = manifest.prompts();
        assert_eq!(prompts[0].prompt_text(), "Project name?");
        assert_eq!(prompts[0].default, Some(json!("demo")));
        assert_eq!(prompts[1].kind.as_deref(), Some("list"));
        assert_eq!(prompts[1].options, vec![json!("MIT"), json!("ISC")]);
        assert_eq!(prompts[1].extra.get("custom"), Some(&json!(1)));
        assert_eq!(manifest.ignore, vec!["vendor/**"]);
    }

    #[test]
    fn test_missing_manifest_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_manifest(dir.path()).is_none());
    }

    #[test]
    fn test_malformed_json_is_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_JSON), "{ not json").unwrap();
        assert!(load_manifest(dir.path()).is_none());
    }

    #[test]
    fn test_wrong_shape_is_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_JSON), r#"{"questions": {}}"#).unwrap();
        assert!(load_manifest(dir.path()).is_none());
    }

    #[test]
    fn test_script_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_SCRIPT),
            r#"#{ questions: [#{ name: "NAME" }], ignore: ["docs"] }"#,
        )
        .unwrap();

        let manifest = load_manifest(dir.path()).unwrap();
        assert_eq!(manifest.prompts()[0].name, "NAME");
        assert_eq!(manifest.ignore, vec!["docs"]);
    }

    #[test]
    fn test_broken_json_falls_through_to_script() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_JSON), "[]").unwrap();
        fs::write(
            dir.path().join(MANIFEST_SCRIPT),
            r#"#{ questions: [] }"#,
        )
        .unwrap();

        let manifest = load_manifest(dir.path()).unwrap();
        assert!(manifest.questions.is_empty());
        assert!(manifest.ignore.is_empty());
    }

    #[test]
    fn test_failing_script_is_none() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_SCRIPT), "throw \"boom\";").unwrap();
        assert!(load_manifest(dir.path()).is_none());
    }

    #[test]
    fn test_js_manifest_is_not_executed() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_JS),
            "module.exports = { questions: [] };",
        )
        .unwrap();
        assert!(load_manifest(dir.path()).is_none());
    }

    #[test]
    fn test_loose_question_entries_keep_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(MANIFEST_JSON),
            r#"{
                "questions": [
                    {"message": "no name key", "required": "yes"},
                    "just a string",
                    {"name": "AUTHOR", "required": "yes", "options": "MIT"}
                ],
                "ignore": ["vendor", 42, null]
            }"#,
        )
        .unwrap();

        let manifest = load_manifest(dir.path()).unwrap();
        assert_eq!(manifest.questions.len(), 3);
        assert_eq!(manifest.questions[1], json!("just a string"));
        assert_eq!(manifest.ignore, vec!["vendor"]);

        let prompts = manifest.prompts();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].name, "AUTHOR");
        assert!(!prompts[0].required);
        assert!(prompts[0].options.is_empty());
    }

    #[test]
    fn test_null_or_scalar_ignore_means_no_rules() {
        for ignore in ["null", "\"vendor\""] {
            let value: Value =
                serde_json::from_str(&format!(r#"{{"questions": [], "ignore": {ignore}}}"#)).unwrap();
            let manifest = parse_manifest_value(value).unwrap();
            assert!(manifest.ignore.is_empty());
        }
    }

    #[test]
    fn test_is_manifest_entry_only_at_root() {
        assert!(is_manifest_entry(Path::new(".questions.json")));
        assert!(is_manifest_entry(Path::new(".questions.rhai")));
        assert!(!is_manifest_entry(Path::new("sub/.questions.json")));
        assert!(!is_manifest_entry(Path::new("questions.json")));
    }
}
