//! Bundled example projects.

use std::path::PathBuf;

use clap::Args;
use fixsim_config::{EXAMPLE_PROJECT_NAMES, example_project_toml, get_example_project};

#[derive(Args)]
pub struct ExamplesArgs {
    /// Example to show (omit to list all)
    name: Option<String>,

    /// Write the example's TOML to this file
    #[arg(short, long, requires = "name")]
    output: Option<PathBuf>,
}

pub fn run(args: ExamplesArgs) -> anyhow::Result<()> {
    let Some(name) = args.name else {
        println!("Example Projects\n");
        for &name in EXAMPLE_PROJECT_NAMES {
            let project = get_example_project(name)?;
            println!(
                "  {:<12} {:<10} {}",
                name,
                project.signal,
                project.description.as_deref().unwrap_or("")
            );
        }
        println!("\nRun one with: fixsim run --example <NAME>");
        return Ok(());
    };

    let project = get_example_project(&name)?;
    // display names resolve to the internal one for the raw TOML lookup
    let key = EXAMPLE_PROJECT_NAMES
        .iter()
        .copied()
        .find(|&n| get_example_project(n).is_ok_and(|p| p == project))
        .unwrap_or(name.as_str());
    let toml = match example_project_toml(key) {
        Some(text) => text.to_string(),
        None => project.to_toml()?,
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, toml)?;
            println!("Wrote example '{}' to {}", project.name, path.display());
        }
        None => print!("{toml}"),
    }

    Ok(())
}
