//! Built-in license texts written over the generated `LICENSE`.

use std::path::{Path, PathBuf};

use chrono::Datelike;
use log::{info, warn};
use tera::{Context, Tera};

use crate::answers::{first_non_empty, Answers};
use crate::error::{Result, StampError};

pub const LICENSE_KEY: &str = "LICENSE";
pub const AUTHOR_KEYS: &[&str] = &["USERFULLNAME", "AUTHOR", "AUTHORFULLNAME", "USERNAME"];
pub const EMAIL_KEYS: &[&str] = &["USEREMAIL", "EMAIL"];
pub const YEAR_KEY: &str = "year";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

const LICENSE_FILE: &str = "LICENSE";

const LICENSE_TEMPLATES: &[(&str, &str)] = &[
    ("MIT", include_str!("templates/mit.tera")),
    ("APACHE-2.0", include_str!("templates/apache-2.0.tera")),
    ("ISC", include_str!("templates/isc.tera")),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LicenseOutcome {
    /// No `LICENSE` answer was given.
    NotRequested,
    /// The identifier has no built-in text; the template's file was left alone.
    Unsupported(String),
    Written { license: String, path: PathBuf },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseContext {
    pub year: String,
    pub author: String,
    pub email: Option<String>,
}

impl LicenseContext {
    pub fn from_answers(answers: &Answers) -> Self {
        Self {
            year: first_non_empty(answers, &[YEAR_KEY])
                .unwrap_or_else(|| chrono::Local::now().year().to_string()),
            author: first_non_empty(answers, AUTHOR_KEYS)
                .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string()),
            email: first_non_empty(answers, EMAIL_KEYS),
        }
    }

    fn email_line(&self) -> String {
        match &self.email {
            Some(email) => format!(" <{email}>"),
            None => String::new(),
        }
    }
}

fn find_template(name: &str) -> Option<(&'static str, &'static str)> {
    let normalized = name.trim().to_uppercase();
    LICENSE_TEMPLATES
        .iter()
        .find(|(id, _)| *id == normalized)
        .copied()
}

pub fn supported_licenses() -> Vec<&'static str> {
    LICENSE_TEMPLATES.iter().map(|(id, _)| *id).collect()
}

pub fn is_supported_license(name: &str) -> bool {
    find_template(name).is_some()
}

/// Render the license text for `name` (case-insensitive). `None` if unsupported.
pub fn render_license(name: &str, license: &LicenseContext) -> Result<Option<String>> {
    let Some((id, body)) = find_template(name) else {
        return Ok(None);
    };

    let mut context = Context::new();
    context.insert("year", &license.year);
    context.insert("author", &license.author);
    context.insert("email_line", &license.email_line());

    let rendered = Tera::one_off(body, &context, false).map_err(|e| StampError::LicenseRender {
        license: id.to_string(),
        source: e,
    })?;
    Ok(Some(rendered))
}

/// Write `LICENSE` at the output root when a supported license was chosen.
///
/// Overwrites whatever the template produced. An unsupported identifier only
/// logs a warning.
pub fn ensure_license_file(output_dir: &Path, answers: &Answers) -> Result<LicenseOutcome> {
    let Some(selected) = first_non_empty(answers, &[LICENSE_KEY]) else {
        return Ok(LicenseOutcome::NotRequested);
    };

    let Some((id, _)) = find_template(&selected) else {
        warn!(
            "License \"{selected}\" is not supported by the built-in templates. \
             Leaving template LICENSE file as-is."
        );
        return Ok(LicenseOutcome::Unsupported(selected));
    };

    let context = LicenseContext::from_answers(answers);
    let Some(content) = render_license(id, &context)? else {
        return Ok(LicenseOutcome::Unsupported(selected));
    };

    std::fs::create_dir_all(output_dir).map_err(|e| StampError::Io {
        context: format!("creating output directory {}", output_dir.display()),
        source: e,
    })?;
    let path = output_dir.join(LICENSE_FILE);
    std::fs::write(&path, format!("{}\n", content.trim_end())).map_err(|e| StampError::Io {
        context: format!("writing {}", path.display()),
        source: e,
    })?;
    info!("LICENSE updated with {id} template");

    Ok(LicenseOutcome::Written {
        license: id.to_string(),
        path,
    })
}
