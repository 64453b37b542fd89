//! `fixit import` command - bulk CSV import

use console::style;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::Config;
use crate::import::{
    parse_file, parse_resource_type, template, DuplicateStrategy, ImportOptions, ImportReport,
    Importer, ResourceType,
};
use crate::store::Store;

/// Upload size cap carried over from the web importer
const MAX_FILE_BYTES: u64 = 10 * 1024 * 1024;

#[derive(clap::Args, Debug)]
pub struct ImportArgs {
    /// Resource type to import (parts, equipment, locations, users)
    #[arg(value_parser = parse_resource_type)]
    pub resource: Option<ResourceType>,

    /// CSV file to import
    pub file: Option<PathBuf>,

    /// Print a CSV template for the resource type and exit
    #[arg(long)]
    pub template: bool,

    /// How to handle rows whose key already exists
    #[arg(long, value_enum)]
    pub duplicates: Option<DuplicateStrategy>,

    /// Validate and detect duplicates without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

pub fn run(args: ImportArgs, global: &GlobalOpts) -> Result<()> {
    if args.template {
        let resource = args.resource.ok_or_else(|| {
            miette::miette!(
                "Resource type required for template generation. Usage: fixit import --template parts"
            )
        })?;
        return print_template(resource, global);
    }

    let resource = args
        .resource
        .ok_or_else(|| miette::miette!("Resource type required. Usage: fixit import parts data.csv"))?;
    let file_path = args
        .file
        .ok_or_else(|| miette::miette!("CSV file required. Usage: fixit import parts data.csv"))?;

    check_file(&file_path)?;

    let project = super::open_project(global)?;
    let config = Config::load(Some(project.root()));
    let format = super::effective_format(global, &config);

    let options = ImportOptions {
        duplicate_strategy: args.duplicates.unwrap_or_else(|| config.duplicate_strategy()),
        validate_only: args.dry_run,
    };

    if !global.quiet && format != OutputFormat::Json {
        println!(
            "{} Importing {} from {}{}",
            style("→").blue(),
            style(resource.as_str()).cyan(),
            style(file_path.display()).yellow(),
            if args.dry_run {
                style(" (dry run)").dim().to_string()
            } else {
                String::new()
            }
        );
        println!();
    }

    let text = std::fs::read_to_string(&file_path).into_diagnostic()?;
    let parsed = parse_file(resource, &text);

    if !parsed.errors.is_empty() {
        for error in &parsed.errors {
            eprintln!("  {} {}", style("•").red(), error);
        }
        return Err(miette::miette!(
            "{} could not be imported: {} file error(s)",
            file_path.display(),
            parsed.errors.len()
        ));
    }

    let mut store = Store::open(&project).map_err(|e| miette::miette!("{}", e))?;
    let report = Importer::new(&mut store)
        .import(resource, &parsed.rows, options)
        .map_err(|e| miette::miette!("{}", e))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
            println!("{}", json);
            Ok(())
        }
        _ => {
            print_report(&report, parsed.rows.len(), args.dry_run, global.quiet);
            if report.success {
                Ok(())
            } else {
                Err(miette::miette!(
                    "Import completed with {} error(s)",
                    report.errors.len()
                ))
            }
        }
    }
}

fn print_template(resource: ResourceType, global: &GlobalOpts) -> Result<()> {
    // Data on stdout so it can be redirected; hint on stderr
    print!("{}", template::render(resource));
    if !global.quiet {
        eprintln!();
        eprintln!(
            "{} Template generated. Redirect to file: fixit import --template {} > {}",
            style("→").blue(),
            resource.as_str(),
            template::filename(resource)
        );
    }
    Ok(())
}

pub(crate) fn check_file(path: &Path) -> Result<()> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());
    match extension.as_deref() {
        Some("csv") | Some("txt") => {}
        _ => return Err(miette::miette!("File must be a CSV file: {}", path.display())),
    }

    let metadata = std::fs::metadata(path)
        .map_err(|e| miette::miette!("File not found: {} ({})", path.display(), e))?;
    if metadata.len() > MAX_FILE_BYTES {
        return Err(miette::miette!("File size must be less than 10MB"));
    }

    Ok(())
}

/// Render per-row problems and the summary block
pub(crate) fn print_report(report: &ImportReport, total_rows: usize, dry_run: bool, quiet: bool) {
    for error in &report.errors {
        let field = error
            .field
            .as_deref()
            .map(|f| format!("[{}] ", f))
            .unwrap_or_default();
        let value = error
            .value
            .as_deref()
            .map(|v| format!(" ({})", v))
            .unwrap_or_default();
        println!(
            "{} Row {}: {}{}{}",
            style("✗").red(),
            error.row,
            style(field).dim(),
            error.message,
            style(value).dim()
        );
    }

    for warning in &report.warnings {
        println!(
            "{} Row {}: {}{}",
            style("⚠").yellow(),
            warning.row,
            style(format!("[{}] ", warning.field)).dim(),
            warning.message
        );
    }

    if quiet {
        return;
    }

    println!();
    println!("{}", style("─".repeat(50)).dim());
    println!("{}", style("Import Summary").bold());
    println!("{}", style("─".repeat(50)).dim());
    println!("  Rows processed: {}", style(total_rows).cyan());
    println!("  Inserted:       {}", style(report.inserted).green());
    if report.updated > 0 {
        println!("  Updated:        {}", style(report.updated).yellow());
    }
    if report.skipped > 0 {
        println!("  Skipped:        {}", style(report.skipped).dim());
    }
    if !report.errors.is_empty() {
        println!("  Errors:         {}", style(report.errors.len()).red());
    }
    if !report.warnings.is_empty() {
        println!("  Warnings:       {}", style(report.warnings.len()).yellow());
    }

    if dry_run {
        println!();
        println!("{}", style("Dry run complete. Nothing was written.").yellow());
    }
}
