//! Import outcome reporting
//!
//! The JSON shape here is shared with the FixIt web UI; field names and
//! optionality must stay wire-compatible.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Policy for rows whose unique key already exists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicateStrategy {
    /// Leave the existing record untouched and count the row as skipped
    #[default]
    Skip,
    /// Overwrite the existing record with the row's values
    Update,
    /// Report the row as an error
    Error,
}

impl std::fmt::Display for DuplicateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateStrategy::Skip => write!(f, "skip"),
            DuplicateStrategy::Update => write!(f, "update"),
            DuplicateStrategy::Error => write!(f, "error"),
        }
    }
}

/// Options accepted by the importer
#[derive(Debug, Clone, Copy, Default)]
pub struct ImportOptions {
    pub duplicate_strategy: DuplicateStrategy,
    /// Validate and detect duplicates without committing any writes
    pub validate_only: bool,
}

/// A per-row error. `row` is the 1-indexed file line (header = row 1,
/// first data row = row 2) so it matches what the user sees in a
/// spreadsheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowError {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

impl RowError {
    pub fn new(row: usize, field: &str, message: impl Into<String>) -> Self {
        Self {
            row,
            field: Some(field.to_string()),
            message: message.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }
}

/// A per-row warning: the row still imports, but with a caveat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RowWarning {
    pub row: usize,
    pub field: String,
    pub message: String,
}

/// Aggregate outcome of one import request.
///
/// Built incrementally while rows are processed, immutable once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub success: bool,
    pub inserted: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<RowError>,
    pub warnings: Vec<RowWarning>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self {
            success: true,
            inserted: 0,
            updated: 0,
            skipped: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn push_error(&mut self, error: RowError) {
        self.errors.push(error);
        self.success = false;
    }

    pub fn push_warning(&mut self, warning: RowWarning) {
        self.warnings.push(warning);
    }
}

impl Default for ImportReport {
    fn default() -> Self {
        Self::new()
    }
}
