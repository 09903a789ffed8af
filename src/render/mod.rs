pub mod file;
pub mod walker;

use std::path::Path;

use crate::answers::Answers;
use crate::error::Result;
use crate::license::ensure_license_file;
use crate::placeholder::stream::DEFAULT_CHUNK_SIZE;
use crate::scan::ScanResult;

pub use walker::{walk_and_render, GeneratedProject};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Bytes per read when streaming file content.
    pub chunk_size: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

/// Generate the output tree, then synthesize `LICENSE` from the answers.
pub fn generate(
    template_root: &Path,
    output_dir: &Path,
    scanned: &ScanResult,
    answers: &Answers,
) -> Result<GeneratedProject> {
    generate_with_options(
        template_root,
        output_dir,
        scanned,
        answers,
        &RenderOptions::default(),
    )
}

pub fn generate_with_options(
    template_root: &Path,
    output_dir: &Path,
    scanned: &ScanResult,
    answers: &Answers,
    options: &RenderOptions,
) -> Result<GeneratedProject> {
    let mut project = walk_and_render(template_root, output_dir, scanned, answers, options)?;
    project.license = ensure_license_file(output_dir, answers)?;
    Ok(project)
}
