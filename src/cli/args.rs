//! CLI argument definitions using clap derive

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::cli::commands::{
    completions::CompletionsArgs, export::ExportArgs, import::ImportArgs, init::InitArgs,
    list::ListArgs, wizard::WizardArgs,
};

#[derive(Parser)]
#[command(name = "fixit")]
#[command(author, version, about = "FixIt maintenance data toolkit")]
#[command(
    long_about = "A command-line toolkit for bulk-loading spare parts, equipment, locations and users into a FixIt maintenance data store from CSV files."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOpts,
}

#[derive(clap::Args, Clone, Debug)]
pub struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "auto")]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Project root (default: auto-detect by finding .fixit/)
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new FixIt project
    Init(InitArgs),

    /// Import records from a CSV file (or generate a template)
    Import(ImportArgs),

    /// Export records as CSV
    Export(ExportArgs),

    /// List records in the store
    List(ListArgs),

    /// Interactive import wizard
    Wizard(WizardArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Styled terminal output
    #[default]
    Auto,
    /// JSON (for programming)
    Json,
    /// CSV (for spreadsheets)
    Csv,
}
