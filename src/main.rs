mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn init_logger(verbose: bool) {
    // RUST_LOG still wins when set
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .parse_default_env()
        .init();
}

fn main() -> miette::Result<()> {
    match Cli::parse().command {
        Commands::New {
            template,
            output,
            subpath,
            data,
            defaults,
            overwrite,
            verbose,
        } => {
            init_logger(verbose);
            commands::new::run(template, output, subpath, data, defaults, overwrite)
        }
        Commands::Inspect {
            template,
            subpath,
            verbose,
        } => {
            init_logger(verbose);
            commands::inspect::run(template, subpath)
        }
    }
}
