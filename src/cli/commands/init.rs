//! `fixit init` command - create a new project

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::core::Project;
use crate::store::Store;

#[derive(clap::Args, Debug)]
pub struct InitArgs {
    /// Directory to initialize (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

pub fn run(args: InitArgs) -> Result<()> {
    let project = Project::init(&args.path).map_err(|e| miette::miette!("{}", e))?;

    // Create the store up front so the seed roles exist before the
    // first user import.
    Store::open(&project).map_err(|e| miette::miette!("{}", e))?;

    println!(
        "{} Initialized FixIt project at {}",
        style("✓").green(),
        style(project.root().display()).cyan()
    );
    println!();
    println!("Next steps:");
    println!("  fixit import --template parts > parts.csv");
    println!("  fixit import parts parts.csv");

    Ok(())
}
