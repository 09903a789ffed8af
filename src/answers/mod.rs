use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::{Result, StampError};

/// Placeholder name to answer value.
pub type Answers = BTreeMap<String, Value>;

/// Coerce an answer to the text substituted for its placeholder.
///
/// Strings are used as-is, scalars through `Display`, arrays and objects as
/// compact JSON. `null` counts as no answer.
pub fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        other => Some(other.to_string()),
    }
}

/// The substitution text for `name`, if it has a usable answer.
pub fn answer_string(answers: &Answers, name: &str) -> Option<String> {
    answers.get(name).and_then(value_to_string)
}

/// First key in `keys` whose answer is a non-empty string after trimming.
pub fn first_non_empty(answers: &Answers, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| {
        answer_string(answers, key)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

/// Parse a `NAME=value` override. The value may itself contain `=`.
pub fn parse_override(input: &str) -> Result<(String, String)> {
    let (key, value) = input
        .split_once('=')
        .ok_or_else(|| StampError::InvalidOverride {
            input: input.to_string(),
        })?;
    let key = key.trim();
    if key.is_empty() {
        return Err(StampError::InvalidOverride {
            input: input.to_string(),
        });
    }
    Ok((key.to_string(), value.to_string()))
}
