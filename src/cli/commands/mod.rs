//! Command implementations

pub mod completions;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod wizard;

use miette::Result;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::{Config, Project};

/// Resolve the project from --project or by walking up from the cwd
pub(crate) fn open_project(global: &GlobalOpts) -> Result<Project> {
    match &global.project {
        Some(path) => Project::open(path).map_err(|e| miette::miette!("{}", e)),
        None => Project::discover().map_err(|e| miette::miette!("{}", e)),
    }
}

/// `--format` wins; under `auto` the config's default format applies
pub(crate) fn effective_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    match global.format {
        OutputFormat::Auto => match config.default_format.as_deref() {
            Some("json") => OutputFormat::Json,
            Some("csv") => OutputFormat::Csv,
            _ => OutputFormat::Auto,
        },
        other => other,
    }
}
