use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stamp",
    about = "Generate projects from templates with ____NAME____ placeholders",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new project from a template
    New {
        /// Local template directory
        template: PathBuf,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Subdirectory of the template holding the template tree
        #[arg(long = "path", value_name = "SUBDIR")]
        subpath: Option<String>,

        /// Set placeholder values (can be repeated: -d NAME=value)
        #[arg(short, long = "data", value_name = "NAME=VALUE")]
        data: Vec<String>,

        /// Use default values without prompting
        #[arg(long)]
        defaults: bool,

        /// Generate into a non-empty output directory
        #[arg(long)]
        overwrite: bool,

        /// Show debug logging
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the placeholders, questions and ignore rules of a template
    Inspect {
        /// Local template directory
        template: PathBuf,

        /// Subdirectory of the template holding the template tree
        #[arg(long = "path", value_name = "SUBDIR")]
        subpath: Option<String>,

        /// Show debug logging
        #[arg(short, long)]
        verbose: bool,
    },
}
