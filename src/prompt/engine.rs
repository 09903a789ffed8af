use std::collections::{BTreeSet, HashMap};

use serde_json::Value;

use crate::answers::{value_to_string, Answers};
use crate::error::{Result, StampError};
use crate::manifest::Question;
use crate::scan::ScanResult;

#[derive(Debug, Default)]
pub struct PromptOptions {
    /// `-d NAME=value` pairs; always win over prompts and defaults.
    pub data_overrides: HashMap<String, String>,
    /// Never prompt: take defaults, leave names without one unresolved.
    pub use_defaults: bool,
    /// Fallback answers from the user config.
    pub user_defaults: Answers,
}

/// Collect answers for every manifest question and discovered placeholder.
///
/// Manifest questions are asked first, in order, then placeholder names no
/// question covers (path names before content names). Overrides and user
/// defaults for names the template never mentions are passed through, so
/// keys like `LICENSE` or `USEREMAIL` reach the license step.
pub fn collect_answers(scanned: &ScanResult, options: &PromptOptions) -> Result<Answers> {
    let mut answers = Answers::new();
    let mut asked: BTreeSet<String> = BTreeSet::new();

    if let Some(manifest) = &scanned.manifest {
        for question in &manifest.prompts() {
            if !asked.insert(question.name.clone()) {
                continue;
            }
            if let Some(value) = resolve(&question.name, Some(question), options)? {
                answers.insert(question.name.clone(), value);
            }
        }
    }

    let discovered = scanned
        .path_replacers
        .names()
        .chain(scanned.content_replacers.names());
    for name in discovered {
        if !asked.insert(name.to_string()) {
            continue;
        }
        if let Some(value) = resolve(name, None, options)? {
            answers.insert(name.to_string(), value);
        }
    }

    for (name, value) in &options.data_overrides {
        answers
            .entry(name.clone())
            .or_insert_with(|| Value::String(value.clone()));
    }
    for (name, value) in &options.user_defaults {
        answers.entry(name.clone()).or_insert_with(|| value.clone());
    }

    Ok(answers)
}

fn resolve(name: &str, question: Option<&Question>, options: &PromptOptions) -> Result<Option<Value>> {
    if let Some(value) = options.data_overrides.get(name) {
        return Ok(Some(Value::String(value.clone())));
    }

    let default = question
        .and_then(|q| q.default.clone())
        .filter(|v| !v.is_null())
        .or_else(|| options.user_defaults.get(name).cloned());

    if options.use_defaults {
        return Ok(default);
    }

    prompt_value(name, question, default.as_ref()).map(Some)
}

fn prompt_value(name: &str, question: Option<&Question>, default: Option<&Value>) -> Result<Value> {
    let prompt_text = question.map(Question::prompt_text).unwrap_or(name);
    let required = question.is_some_and(|q| q.required);
    let kind = question.and_then(|q| q.kind.as_deref()).unwrap_or("text");

    if kind == "confirm" {
        let default = default.and_then(Value::as_bool).unwrap_or(false);
        let answer = inquire::Confirm::new(prompt_text)
            .with_default(default)
            .prompt()
            .map_err(|_| StampError::PromptCancelled)?;
        return Ok(Value::Bool(answer));
    }

    let choices: Vec<String> = question
        .map(|q| q.options.iter().filter_map(value_to_string).collect())
        .unwrap_or_default();
    if !choices.is_empty() {
        let default_str = default.and_then(value_to_string);
        let cursor = default_str
            .and_then(|d| choices.iter().position(|c| *c == d))
            .unwrap_or(0);
        let answer = inquire::Select::new(prompt_text, choices)
            .with_starting_cursor(cursor)
            .prompt()
            .map_err(|_| StampError::PromptCancelled)?;
        return Ok(Value::String(answer));
    }

    let default_str = default.and_then(value_to_string);
    let mut prompt = inquire::Text::new(prompt_text);
    if let Some(default) = &default_str {
        prompt = prompt.with_default(default);
    }
    if required {
        prompt = prompt.with_validator(inquire::required!("A value is required"));
    }
    let answer = prompt.prompt().map_err(|_| StampError::PromptCancelled)?;
    Ok(Value::String(answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::QuestionManifest;
    use serde_json::json;

    fn question(name: &str, default: Option<Value>) -> Value {
        match default {
            Some(default) => json!({ "name": name, "default": default }),
            None => json!({ "name": name }),
        }
    }

    fn scanned() -> ScanResult {
        let mut scanned = ScanResult::default();
        scanned.path_replacers.insert("PROJECT");
        scanned.content_replacers.insert("NAME");
        scanned.content_replacers.insert("PROJECT");
        scanned.manifest = Some(QuestionManifest {
            questions: vec![
                question("AUTHOR", Some(json!("Manifest Author"))),
                question("NAME", Some(json!("Manifest Name"))),
            ],
            ignore: Vec::new(),
        });
        scanned
    }

    #[test]
    fn test_defaults_mode_uses_manifest_defaults() {
        let options = PromptOptions {
            use_defaults: true,
            ..Default::default()
        };
        let answers = collect_answers(&scanned(), &options).unwrap();

        assert_eq!(answers["AUTHOR"], json!("Manifest Author"));
        assert_eq!(answers["NAME"], json!("Manifest Name"));
        // no default anywhere: stays unresolved
        assert!(!answers.contains_key("PROJECT"));
    }

    #[test]
    fn test_overrides_win_over_defaults() {
        let options = PromptOptions {
            data_overrides: [
                ("NAME".to_string(), "Ada".to_string()),
                ("PROJECT".to_string(), "demo".to_string()),
                ("LICENSE".to_string(), "MIT".to_string()),
            ]
            .into_iter()
            .collect(),
            use_defaults: true,
            ..Default::default()
        };
        let answers = collect_answers(&scanned(), &options).unwrap();

        assert_eq!(answers["NAME"], json!("Ada"));
        assert_eq!(answers["PROJECT"], json!("demo"));
        // not a placeholder, still passed through for the license step
        assert_eq!(answers["LICENSE"], json!("MIT"));
    }

    #[test]
    fn test_user_defaults_fill_gaps_only() {
        let mut user_defaults = Answers::new();
        user_defaults.insert("PROJECT".into(), json!("from-config"));
        user_defaults.insert("AUTHOR".into(), json!("Config Author"));
        user_defaults.insert("USEREMAIL".into(), json!("me@example.com"));

        let options = PromptOptions {
            use_defaults: true,
            user_defaults,
            ..Default::default()
        };
        let answers = collect_answers(&scanned(), &options).unwrap();

        assert_eq!(answers["PROJECT"], json!("from-config"));
        assert_eq!(answers["AUTHOR"], json!("Manifest Author"));
        assert_eq!(answers["USEREMAIL"], json!("me@example.com"));
    }

    #[test]
    fn test_null_default_is_no_default() {
        let mut scanned = ScanResult::default();
        scanned.manifest = Some(QuestionManifest {
            questions: vec![question("X", Some(Value::Null))],
            ignore: Vec::new(),
        });
        let options = PromptOptions {
            use_defaults: true,
            ..Default::default()
        };
        let answers = collect_answers(&scanned, &options).unwrap();
        assert!(answers.is_empty());
    }

    #[test]
    fn test_entries_without_name_are_not_asked() {
        let mut scanned = ScanResult::default();
        scanned.manifest = Some(QuestionManifest {
            questions: vec![
                json!({ "message": "who?", "default": "nobody" }),
                json!(["not", "a", "question"]),
                question("KEPT", Some(json!("yes"))),
            ],
            ignore: Vec::new(),
        });
        let options = PromptOptions {
            use_defaults: true,
            ..Default::default()
        };
        let answers = collect_answers(&scanned, &options).unwrap();
        assert_eq!(answers.len(), 1);
        assert_eq!(answers["KEPT"], json!("yes"));
    }
}
