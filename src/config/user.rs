use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::answers::Answers;
use crate::error::{Result, StampError};

/// User-level configuration loaded from `~/.config/stamp/config.toml`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UserConfig {
    /// Fallback answers, e.g. `USERFULLNAME` and `USEREMAIL` for license text.
    #[serde(default)]
    pub answers: BTreeMap<String, toml::Value>,
}

impl UserConfig {
    /// The configured answers as JSON values. Entries that cannot be represented are skipped.
    pub fn default_answers(&self) -> Answers {
        self.answers
            .iter()
            .filter_map(|(key, value)| {
                serde_json::to_value(value)
                    .ok()
                    .map(|value| (key.clone(), value))
            })
            .collect()
    }
}

/// Get the path to the user config file.
fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("stamp").join("config.toml"))
}

/// Load user configuration from the XDG config directory.
///
/// Returns `Ok(None)` if the config file does not exist.
/// Returns `Err` if the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<Option<UserConfig>> {
    match config_path() {
        Some(path) => load_user_config_from(&path),
        None => Ok(None),
    }
}

pub fn load_user_config_from(path: &Path) -> Result<Option<UserConfig>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = std::fs::read_to_string(path).map_err(|e| StampError::Io {
        context: format!("reading user config {}", path.display()),
        source: e,
    })?;

    let config: UserConfig =
        toml::from_str(&content).map_err(|e| StampError::ConfigParse { source: e })?;

    Ok(Some(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_valid_user_config() {
        let toml_str = r#"
[answers]
USERFULLNAME = "Ada Lovelace"
USEREMAIL = "ada@example.com"
year = 1843
"#;
        let config: UserConfig = toml::from_str(toml_str).unwrap();
        let answers = config.default_answers();
        assert_eq!(answers["USERFULLNAME"], json!("Ada Lovelace"));
        assert_eq!(answers["USEREMAIL"], json!("ada@example.com"));
        assert_eq!(answers["year"], json!(1843));
    }

    #[test]
    fn parse_empty_config() {
        let config: UserConfig = toml::from_str("").unwrap();
        assert!(config.default_answers().is_empty());
    }

    #[test]
    fn parse_malformed_config_errors() {
        let result: std::result::Result<UserConfig, _> = toml::from_str("not valid [[ toml");
        assert!(result.is_err());
    }

    #[test]
    fn load_from_missing_path_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_user_config_from(&dir.path().join("config.toml")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn load_from_malformed_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[answers\n").unwrap();
        assert!(matches!(
            load_user_config_from(&path),
            Err(StampError::ConfigParse { .. })
        ));
    }

    #[test]
    fn load_user_config_returns_ok_when_no_file() {
        let result = load_user_config();
        assert!(result.is_ok());
    }
}
