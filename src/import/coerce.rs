//! Row coercion
//!
//! Turns raw string cells into typed `ImportRow`s using a header mapping.
//! Numeric fields tolerate currency symbols and thousands separators and
//! are silently dropped when unparseable - a bad number is an absent
//! field, never a row error.

use std::collections::BTreeMap;

use crate::import::mapping::HeaderMapping;
use crate::import::resource::FieldKind;

/// A typed cell value
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

/// One typed data row: canonical field name to value, blanks absent
#[derive(Debug, Clone, Default)]
pub struct ImportRow {
    values: BTreeMap<&'static str, CellValue>,
}

impl ImportRow {
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.values.get(field)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.values.get(field) {
            Some(CellValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn number(&self, field: &str) -> Option<f64> {
        match self.values.get(field) {
            Some(CellValue::Number(n)) => Some(*n),
            _ => None,
        }
    }

}

/// Coerce raw rows into typed rows, order preserved.
///
/// Cells align positionally with the mapping; extra cells beyond the
/// header width are ignored, missing trailing cells are treated as blank.
pub fn coerce_rows(mapping: &HeaderMapping, raw_rows: &[Vec<String>]) -> Vec<ImportRow> {
    raw_rows.iter().map(|raw| coerce_row(mapping, raw)).collect()
}

fn coerce_row(mapping: &HeaderMapping, cells: &[String]) -> ImportRow {
    let mut row = ImportRow::default();

    for (column, cell) in cells.iter().enumerate() {
        let Some(field) = mapping.field_at(column) else {
            continue;
        };

        let trimmed = cell.trim();
        if trimmed.is_empty() {
            continue;
        }

        match field.kind {
            FieldKind::Text => {
                row.values
                    .insert(field.name, CellValue::Text(trimmed.to_string()));
            }
            FieldKind::Number => {
                if let Some(n) = parse_number(trimmed) {
                    row.values.insert(field.name, CellValue::Number(n));
                }
            }
        }
    }

    row
}

/// Parse a numeric cell, tolerating `$` and thousands commas.
///
/// Returns `None` for anything that is not a clean number after
/// stripping - the field is then simply omitted from the row.
pub fn parse_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
