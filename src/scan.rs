//! First pass over a template: discover path and content placeholders.

use std::fs::File;
use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::error::{Result, StampError};
use crate::ignore::{relative_str, IgnoreRules};
use crate::manifest::{is_manifest_entry, load_manifest, QuestionManifest};
use crate::placeholder::find_placeholders;
use crate::placeholder::stream::{stream_text, DEFAULT_CHUNK_SIZE};
use crate::placeholder::ReplacerSet;
use crate::render::file::is_binary_file;

#[derive(Debug, Clone)]
pub struct ScanOptions {
    /// Bytes per read when streaming file content.
    pub chunk_size: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Everything the generation pass needs from a scan.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    /// Placeholders found in file and directory names, in first-seen order.
    pub path_replacers: ReplacerSet,
    /// Placeholders found in file bodies, in first-seen order.
    pub content_replacers: ReplacerSet,
    pub manifest: Option<QuestionManifest>,
    pub ignore: IgnoreRules,
}

/// Fail unless `template_root` is an existing directory.
pub fn ensure_template_root(template_root: &Path) -> Result<()> {
    if !template_root.exists() {
        return Err(StampError::TemplateNotFound {
            path: template_root.to_path_buf(),
        });
    }
    if !template_root.is_dir() {
        return Err(StampError::TemplateNotDirectory {
            path: template_root.to_path_buf(),
        });
    }
    Ok(())
}

pub fn scan(template_root: &Path) -> Result<ScanResult> {
    scan_with_options(template_root, &ScanOptions::default())
}

pub fn scan_with_options(template_root: &Path, options: &ScanOptions) -> Result<ScanResult> {
    ensure_template_root(template_root)?;

    let manifest = load_manifest(template_root);
    let ignore = match &manifest {
        Some(manifest) => IgnoreRules::new(&manifest.ignore),
        None => IgnoreRules::default(),
    };

    let mut path_replacers = ReplacerSet::new();
    let mut content_replacers = ReplacerSet::new();

    let walker = WalkDir::new(template_root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            let Ok(rel) = entry.path().strip_prefix(template_root) else {
                return false;
            };
            if is_manifest_entry(rel) {
                return false;
            }
            if ignore.is_path_ignored(rel) {
                debug!("Skipping ignored path {}", rel.display());
                return false;
            }
            true
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable template entry: {e}");
                continue;
            }
        };
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            debug!("Skipping symlink {}", entry.path().display());
            continue;
        }

        let rel = entry
            .path()
            .strip_prefix(template_root)
            .expect("walkdir yields paths under its root");
        for found in find_placeholders(&relative_str(rel)) {
            path_replacers.insert(found.name);
        }

        if !file_type.is_file() {
            continue;
        }

        for name in scan_file_content(entry.path(), &ignore, options.chunk_size) {
            content_replacers.insert(&name);
        }
    }

    debug!(
        "Scan found {} path and {} content placeholders",
        path_replacers.len(),
        content_replacers.len()
    );

    Ok(ScanResult {
        path_replacers,
        content_replacers,
        manifest,
        ignore,
    })
}

/// Content placeholder names in one file, in order of appearance.
///
/// Binary files and files that fail to read contribute nothing.
fn scan_file_content(path: &Path, ignore: &IgnoreRules, chunk_size: usize) -> Vec<String> {
    if is_binary_file(path) {
        debug!("Not scanning binary file {}", path.display());
        return Vec::new();
    }

    let mut names: Vec<String> = Vec::new();
    let result = File::open(path).and_then(|file| {
        stream_text(file, chunk_size, |text| {
            for found in find_placeholders(text) {
                if ignore.is_content_ignored(found.token) {
                    continue;
                }
                if !names.iter().any(|n| n == found.name) {
                    names.push(found.name.to_string());
                }
            }
            Ok(())
        })
    });

    match result {
        Ok(()) => names,
        Err(e) => {
            warn!("Could not scan {}: {e}", path.display());
            Vec::new()
        }
    }
}
