#![allow(unused_assignments)]

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum StampError {
    #[error("Template directory not found: {path}")]
    #[diagnostic(help("Check the template path (and --path subdirectory, if given)"))]
    TemplateNotFound { path: PathBuf },

    #[error("Template path is not a directory: {path}")]
    TemplateNotDirectory { path: PathBuf },

    #[error("Output directory already exists: {path}")]
    #[diagnostic(help("Use --overwrite to generate into a non-empty directory"))]
    OutputExists { path: PathBuf },

    #[error("Output path is not a directory: {path}")]
    OutputNotDirectory { path: PathBuf },

    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to walk template directory: {context}")]
    Walk {
        context: String,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to parse user config")]
    #[diagnostic(help("Check the TOML syntax in ~/.config/stamp/config.toml"))]
    ConfigParse {
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to render {license} license text")]
    LicenseRender {
        license: String,
        #[source]
        source: tera::Error,
    },

    #[error("Invalid variable override: {input}")]
    #[diagnostic(help("Overrides must look like NAME=value"))]
    InvalidOverride { input: String },

    #[error("Prompt cancelled by user")]
    PromptCancelled,
}

pub type Result<T> = std::result::Result<T, StampError>;
