use std::path::PathBuf;

use console::style;
use miette::Result;
use stamp::answers::value_to_string;
use stamp::license::{is_supported_license, supported_licenses, LICENSE_KEY};

pub fn run(template: PathBuf, subpath: Option<String>) -> Result<()> {
    println!(
        "{} {}",
        style("Inspecting template at").bold(),
        style(template.display()).cyan()
    );

    let scanned = stamp::inspect(&template, subpath.as_deref())?;

    println!("\n{}", style("Path placeholders:").bold());
    print_names(scanned.path_replacers.names());

    println!("\n{}", style("Content placeholders:").bold());
    print_names(scanned.content_replacers.names());

    match &scanned.manifest {
        Some(manifest) => {
            let prompts = manifest.prompts();
            println!("\n{}", style("Questions:").bold());
            if prompts.is_empty() {
                println!("  {}", style("(none)").dim());
            }
            for question in &prompts {
                let default = question
                    .default
                    .as_ref()
                    .and_then(value_to_string)
                    .map(|d| format!(" [default: {d}]"))
                    .unwrap_or_default();
                let used = scanned.path_replacers.contains(&question.name)
                    || scanned.content_replacers.contains(&question.name);
                let marker = if used { "" } else { " (not a placeholder)" };
                println!(
                    "  {} {}{}{}",
                    style(&question.name).cyan(),
                    question.prompt_text(),
                    style(default).dim(),
                    style(marker).dim()
                );

                if question.name == LICENSE_KEY {
                    for option in question.options.iter().filter_map(value_to_string) {
                        if !is_supported_license(&option) {
                            println!(
                                "    {} {} has no built-in license text",
                                style("⚠").yellow(),
                                option
                            );
                        }
                    }
                }
            }
            let skipped = manifest.questions.len() - prompts.len();
            if skipped > 0 {
                println!(
                    "  {} {skipped} entries without a name",
                    style("⚠").yellow()
                );
            }
        }
        None => println!("\n{}", style("No question manifest").dim()),
    }

    println!(
        "\n{} {}",
        style("Built-in licenses:").bold(),
        supported_licenses().join(", ")
    );

    println!("\n{}", style("Ignore rules:").bold());
    for pattern in scanned.ignore.patterns() {
        println!("  {pattern}");
    }
    println!(
        "  {} {}",
        style("content tokens:").dim(),
        scanned.ignore.content_tokens().collect::<Vec<_>>().join(", ")
    );

    Ok(())
}

fn print_names<'a>(names: impl Iterator<Item = &'a str>) {
    let mut any = false;
    for name in names {
        any = true;
        println!("  {}", style(name).cyan());
    }
    if !any {
        println!("  {}", style("(none)").dim());
    }
}
