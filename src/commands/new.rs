use std::path::PathBuf;

use console::style;
use miette::Result;
use stamp::answers::parse_override;
use stamp::license::{supported_licenses, LicenseOutcome};
use stamp::GenerateOptions;

pub fn run(
    template: PathBuf,
    output: Option<PathBuf>,
    subpath: Option<String>,
    data: Vec<String>,
    defaults: bool,
    overwrite: bool,
) -> Result<()> {
    let data_pairs = data
        .iter()
        .map(|kv| parse_override(kv))
        .collect::<stamp::error::Result<Vec<_>>>()?;

    let options = GenerateOptions {
        template,
        subpath,
        output,
        data: data_pairs,
        defaults,
        overwrite,
    };

    let project = stamp::generate(options)?;

    println!(
        "\n{} Project generated at {}",
        style("✓").green().bold(),
        style(project.output_dir.display()).cyan()
    );
    println!(
        "  {} files rendered, {} files copied",
        project.files_rendered.len(),
        project.files_copied.len()
    );

    if !project.fallbacks.is_empty() {
        println!(
            "\n{}",
            style("Copied verbatim after a rewrite failure:").yellow().bold()
        );
        for path in &project.fallbacks {
            println!("  {} {}", style("⚠").yellow(), path.display());
        }
    }

    match &project.license {
        LicenseOutcome::Written { license, .. } => {
            println!("  LICENSE written from the {} template", style(license).cyan());
        }
        LicenseOutcome::Unsupported(license) => {
            println!(
                "  {} no built-in text for license {}, template LICENSE kept",
                style("⚠").yellow(),
                style(license).cyan()
            );
            println!("    built-in licenses: {}", supported_licenses().join(", "));
        }
        LicenseOutcome::NotRequested => {}
    }

    Ok(())
}
