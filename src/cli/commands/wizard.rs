//! `fixit wizard` command - interactive import
//!
//! Walks the same four steps as the web importer: pick a resource type,
//! point at a file, preview the parsed rows with a dry run, then commit.
//! File-level problems keep the wizard on the upload step; finishing an
//! import loops back to the resource picker.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;
use tabled::{builder::Builder, settings::Style};

use crate::cli::GlobalOpts;
use crate::core::Config;
use crate::import::{
    parse_file, DuplicateStrategy, ImportOptions, Importer, ParsedFile, ResourceType,
};
use crate::store::Store;

const PREVIEW_ROWS: usize = 10;

#[derive(clap::Args, Debug)]
pub struct WizardArgs {}

enum Step {
    Select,
    Upload(ResourceType),
    Preview(ResourceType, PathBuf, ParsedFile),
    Done,
}

pub fn run(_args: WizardArgs, global: &GlobalOpts) -> Result<()> {
    let project = super::open_project(global)?;
    let config = Config::load(Some(project.root()));
    let mut store = Store::open(&project).map_err(|e| miette::miette!("{}", e))?;
    let theme = ColorfulTheme::default();

    println!("{}", style("FixIt import wizard").bold());
    println!();

    let mut step = Step::Select;
    loop {
        step = match step {
            Step::Select => select_resource(&theme)?,
            Step::Upload(resource) => upload_file(&theme, resource)?,
            Step::Preview(resource, path, parsed) => {
                preview_and_import(&theme, &config, &mut store, resource, &path, &parsed)?
            }
            Step::Done => break,
        };
    }

    Ok(())
}

fn select_resource(theme: &ColorfulTheme) -> Result<Step> {
    let mut items: Vec<&str> = ResourceType::ALL.iter().map(|r| r.label()).collect();
    items.push("Quit");

    let selection = Select::with_theme(theme)
        .with_prompt("What would you like to import?")
        .items(&items)
        .default(0)
        .interact()
        .into_diagnostic()?;

    match ResourceType::ALL.get(selection) {
        Some(resource) => Ok(Step::Upload(*resource)),
        None => Ok(Step::Done),
    }
}

fn upload_file(theme: &ColorfulTheme, resource: ResourceType) -> Result<Step> {
    let raw: String = Input::with_theme(theme)
        .with_prompt(format!(
            "Path to {} CSV file (empty to go back)",
            resource.as_str()
        ))
        .allow_empty(true)
        .interact_text()
        .into_diagnostic()?;

    if raw.trim().is_empty() {
        return Ok(Step::Select);
    }

    let path = PathBuf::from(raw.trim());
    if let Err(e) = super::import::check_file(&path) {
        eprintln!("  {} {}", style("•").red(), e);
        return Ok(Step::Upload(resource));
    }

    let text = std::fs::read_to_string(&path).into_diagnostic()?;
    let parsed = parse_file(resource, &text);

    if !parsed.errors.is_empty() {
        for error in &parsed.errors {
            eprintln!("  {} {}", style("•").red(), error);
        }
        return Ok(Step::Upload(resource));
    }

    Ok(Step::Preview(resource, path, parsed))
}

fn preview_and_import(
    theme: &ColorfulTheme,
    config: &Config,
    store: &mut Store,
    resource: ResourceType,
    path: &std::path::Path,
    parsed: &ParsedFile,
) -> Result<Step> {
    println!();
    println!(
        "{} {} rows from {}",
        style("→").blue(),
        parsed.rows.len(),
        style(path.display()).yellow()
    );
    print_preview(parsed);

    let strategy = select_strategy(theme, config.duplicate_strategy())?;

    // Dry run first so problems show up before anything is written
    let dry_report = Importer::new(store)
        .import(
            resource,
            &parsed.rows,
            ImportOptions {
                duplicate_strategy: strategy,
                validate_only: true,
            },
        )
        .map_err(|e| miette::miette!("{}", e))?;

    println!();
    super::import::print_report(&dry_report, parsed.rows.len(), true, false);
    println!();

    let proceed = Confirm::with_theme(theme)
        .with_prompt(if dry_report.success {
            "Proceed with import?".to_string()
        } else {
            format!(
                "Proceed anyway? {} row(s) with errors will be skipped",
                dry_report.errors.len()
            )
        })
        .default(dry_report.success)
        .interact()
        .into_diagnostic()?;

    if proceed {
        let report = Importer::new(store)
            .import(
                resource,
                &parsed.rows,
                ImportOptions {
                    duplicate_strategy: strategy,
                    validate_only: false,
                },
            )
            .map_err(|e| miette::miette!("{}", e))?;

        println!();
        super::import::print_report(&report, parsed.rows.len(), false, false);
        println!();
    }

    let again = Confirm::with_theme(theme)
        .with_prompt("Import another file?")
        .default(false)
        .interact()
        .into_diagnostic()?;

    if again {
        Ok(Step::Select)
    } else {
        Ok(Step::Done)
    }
}

fn select_strategy(theme: &ColorfulTheme, default: DuplicateStrategy) -> Result<DuplicateStrategy> {
    let strategies = [
        DuplicateStrategy::Skip,
        DuplicateStrategy::Update,
        DuplicateStrategy::Error,
    ];
    let items = [
        "Skip rows whose key already exists",
        "Update existing records in place",
        "Treat duplicates as errors",
    ];
    let default_idx = strategies.iter().position(|s| *s == default).unwrap_or(0);

    let selection = Select::with_theme(theme)
        .with_prompt("Duplicate handling")
        .items(&items)
        .default(default_idx)
        .interact()
        .into_diagnostic()?;

    Ok(strategies[selection])
}

/// Show the first few raw rows under the file's own headers
fn print_preview(parsed: &ParsedFile) {
    let mut builder = Builder::default();
    builder.push_record(&parsed.headers);
    for row in parsed.raw_rows.iter().take(PREVIEW_ROWS) {
        // Short rows render as blank trailing cells
        let mut cells = row.clone();
        cells.resize(parsed.headers.len().max(row.len()), String::new());
        builder.push_record(cells);
    }

    println!();
    println!("{}", builder.build().with(Style::markdown()));
    if parsed.raw_rows.len() > PREVIEW_ROWS {
        println!(
            "{}",
            style(format!(
                "... and {} more row(s)",
                parsed.raw_rows.len() - PREVIEW_ROWS
            ))
            .dim()
        );
    }
}
