use std::path::{Component, Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::answers::Answers;
use crate::error::{Result, StampError};
use crate::ignore::IgnoreRules;
use crate::license::LicenseOutcome;
use crate::manifest::is_manifest_entry;
use crate::placeholder::ReplacerSet;
use crate::render::file::{
    copy_file, ensure_parent, is_binary_file, render_file_content, render_path_component,
};
use crate::render::RenderOptions;
use crate::scan::{ensure_template_root, ScanResult};

#[derive(Debug)]
pub struct GeneratedProject {
    pub output_dir: PathBuf,
    /// Files written through the content transform.
    pub files_rendered: Vec<PathBuf>,
    /// Binary or ignored files copied verbatim.
    pub files_copied: Vec<PathBuf>,
    /// Files whose transform failed and were copied verbatim instead.
    pub fallbacks: Vec<PathBuf>,
    pub license: LicenseOutcome,
}

/// Mirror the template tree into `output_dir`, renaming paths and rewriting content.
///
/// Paths are relative to `output_dir` in the returned project. The license
/// step is not run here; `license` is left as `NotRequested`.
pub fn walk_and_render(
    template_root: &Path,
    output_dir: &Path,
    scanned: &ScanResult,
    answers: &Answers,
    options: &RenderOptions,
) -> Result<GeneratedProject> {
    ensure_template_root(template_root)?;
    std::fs::create_dir_all(output_dir).map_err(|e| StampError::Io {
        context: format!("creating output directory {}", output_dir.display()),
        source: e,
    })?;

    let mut project = GeneratedProject {
        output_dir: output_dir.to_path_buf(),
        files_rendered: Vec::new(),
        files_copied: Vec::new(),
        fallbacks: Vec::new(),
        license: LicenseOutcome::NotRequested,
    };

    for entry in WalkDir::new(template_root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|e| StampError::Walk {
            context: format!("reading {}", template_root.display()),
            source: e,
        })?;
        let src_path = entry.path();
        let rel_path = src_path
            .strip_prefix(template_root)
            .expect("walkdir yields paths under its root");

        if is_manifest_entry(rel_path) {
            continue;
        }

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            debug!("Skipping symlink {}", rel_path.display());
            continue;
        }

        let (rendered_rel, verbatim) =
            render_relative_path(rel_path, &scanned.path_replacers, &scanned.ignore, answers);
        let dest_path = output_dir.join(&rendered_rel);

        if file_type.is_dir() {
            std::fs::create_dir_all(&dest_path).map_err(|e| StampError::Io {
                context: format!("creating directory {}", dest_path.display()),
                source: e,
            })?;
            continue;
        }

        if verbatim || is_binary_file(src_path) {
            debug!("Copying {} verbatim", rel_path.display());
            copy_file(src_path, &dest_path)?;
            project.files_copied.push(rendered_rel);
            continue;
        }

        ensure_parent(&dest_path)?;
        match render_file_content(
            src_path,
            &dest_path,
            &scanned.content_replacers,
            answers,
            options.chunk_size,
        ) {
            Ok(()) => project.files_rendered.push(rendered_rel),
            Err(e) => {
                warn!(
                    "Failed to rewrite {}, copying verbatim: {e}",
                    rel_path.display()
                );
                copy_file(src_path, &dest_path)?;
                project.fallbacks.push(rendered_rel);
            }
        }
    }

    Ok(project)
}

/// Rename each component of a relative path.
///
/// Once a prefix matches a path-ignore rule, it and everything below it keep
/// their template names. The flag reports whether that happened.
fn render_relative_path(
    rel_path: &Path,
    replacers: &ReplacerSet,
    ignore: &IgnoreRules,
    answers: &Answers,
) -> (PathBuf, bool) {
    let mut rendered = PathBuf::new();
    let mut prefix = PathBuf::new();
    let mut verbatim = false;

    for component in rel_path.components() {
        prefix.push(component);
        if !verbatim && ignore.is_path_ignored(&prefix) {
            verbatim = true;
        }

        match (verbatim, component) {
            (false, Component::Normal(name)) => match name.to_str() {
                Some(name) => rendered.push(render_path_component(name, replacers, answers)),
                None => rendered.push(name),
            },
            _ => rendered.push(component),
        }
    }

    (rendered, verbatim)
}
