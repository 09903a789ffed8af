pub mod answers;
pub mod config;
pub mod error;
pub mod ignore;
pub mod license;
pub mod manifest;
pub mod placeholder;
pub mod prompt;
pub mod render;
pub mod scan;

use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::config::load_user_config;
use crate::error::{Result, StampError};
use crate::prompt::{collect_answers, PromptOptions};
use crate::scan::{ensure_template_root, ScanResult};

pub use crate::render::GeneratedProject;

pub struct GenerateOptions {
    /// Local template directory.
    pub template: PathBuf,
    /// Subdirectory of `template` holding the actual template tree.
    pub subpath: Option<String>,
    /// Output directory; the current directory when absent.
    pub output: Option<PathBuf>,
    pub data: Vec<(String, String)>,
    pub defaults: bool,
    pub overwrite: bool,
}

/// Join the template with its optional subdirectory and check it is a directory.
pub fn resolve_template_root(template: &Path, subpath: Option<&str>) -> Result<PathBuf> {
    let root = match subpath {
        Some(sub) if !sub.is_empty() => template.join(sub),
        _ => template.to_path_buf(),
    };
    ensure_template_root(&root)?;
    Ok(root)
}

/// Scan a template without generating anything.
pub fn inspect(template: &Path, subpath: Option<&str>) -> Result<ScanResult> {
    let root = resolve_template_root(template, subpath)?;
    scan::scan(&root)
}

fn check_output_dir(output_dir: &Path, overwrite: bool) -> Result<()> {
    if !output_dir.exists() {
        return Ok(());
    }
    if !output_dir.is_dir() {
        return Err(StampError::OutputNotDirectory {
            path: output_dir.to_path_buf(),
        });
    }
    if overwrite {
        return Ok(());
    }
    // An empty dir is fine
    let mut entries = std::fs::read_dir(output_dir).map_err(|e| StampError::Io {
        context: format!("reading output directory {}", output_dir.display()),
        source: e,
    })?;
    if entries.next().is_some() {
        return Err(StampError::OutputExists {
            path: output_dir.to_path_buf(),
        });
    }
    Ok(())
}

/// Generate a project from a template.
pub fn generate(options: GenerateOptions) -> Result<GeneratedProject> {
    let template_root = resolve_template_root(&options.template, options.subpath.as_deref())?;

    let output_dir = match options.output {
        Some(out) => out,
        None => std::env::current_dir().map_err(|e| StampError::Io {
            context: "getting current directory".into(),
            source: e,
        })?,
    };
    check_output_dir(&output_dir, options.overwrite)?;

    let scanned = scan::scan(&template_root)?;
    debug!(
        "Discovered {} path and {} content placeholders",
        scanned.path_replacers.len(),
        scanned.content_replacers.len()
    );

    let user_defaults = load_user_config()?
        .map(|config| config.default_answers())
        .unwrap_or_default();
    let prompt_options = PromptOptions {
        data_overrides: options.data.into_iter().collect(),
        use_defaults: options.defaults,
        user_defaults,
    };
    let answers = collect_answers(&scanned, &prompt_options)?;

    info!(
        "Generating {} from {}",
        output_dir.display(),
        template_root.display()
    );
    render::generate(&template_root, &output_dir, &scanned, &answers)
}
