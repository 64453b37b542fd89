//! Bulk CSV import pipeline
//!
//! Tokenize -> map headers -> coerce rows -> import. The first three
//! stages are pure and live here; the importer at the end talks to the
//! store and produces an [`ImportReport`].

pub mod coerce;
pub mod importer;
pub mod mapping;
pub mod report;
pub mod resource;
pub mod template;
pub mod tokenizer;

pub use coerce::{CellValue, ImportRow};
pub use importer::Importer;
pub use report::{DuplicateStrategy, ImportOptions, ImportReport, RowError, RowWarning};
pub use resource::{parse_resource_type, FieldKind, FieldSpec, ResourceType};

use mapping::map_headers;
use tokenizer::tokenize;

/// Outcome of parsing one CSV file for a resource type.
///
/// File-level failures (empty file, missing required columns) yield zero
/// rows and one message per problem in `errors`; callers must not import
/// in that case.
#[derive(Debug, Default)]
pub struct ParsedFile {
    /// Raw header cells as they appeared in the file
    pub headers: Vec<String>,
    /// Untyped data rows, for previews
    pub raw_rows: Vec<Vec<String>>,
    /// Typed rows ready for the importer, one per data line
    pub rows: Vec<ImportRow>,
    /// File-level errors; non-empty means `rows` is empty
    pub errors: Vec<String>,
}

/// Run the pure half of the pipeline: tokenize, map headers, coerce rows.
pub fn parse_file(resource: ResourceType, text: &str) -> ParsedFile {
    let doc = match tokenize(text) {
        Ok(doc) => doc,
        Err(e) => {
            return ParsedFile {
                errors: vec![e.to_string()],
                ..Default::default()
            }
        }
    };

    let mapping = match map_headers(resource, &doc.headers) {
        Ok(mapping) => mapping,
        Err(errors) => {
            return ParsedFile {
                headers: doc.headers,
                errors,
                ..Default::default()
            }
        }
    };

    let rows = coerce::coerce_rows(&mapping, &doc.rows);

    ParsedFile {
        headers: doc.headers,
        raw_rows: doc.rows,
        rows,
        errors: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_column_yields_zero_rows_and_an_error() {
        let parsed = parse_file(ResourceType::Parts, "sku,qty\nP-1,5\n");
        assert!(parsed.rows.is_empty());
        assert!(!parsed.errors.is_empty());
        assert!(parsed.errors[0].contains("name"));
    }

    #[test]
    fn empty_file_is_a_file_level_error() {
        let parsed = parse_file(ResourceType::Parts, "\n\n");
        assert_eq!(parsed.errors, vec!["File is empty".to_string()]);
        assert!(parsed.rows.is_empty());
    }

    #[test]
    fn header_only_file_is_a_file_level_error() {
        let parsed = parse_file(ResourceType::Parts, "sku,name\n");
        assert_eq!(parsed.errors, vec!["CSV file has no data rows".to_string()]);
    }

    #[test]
    fn well_formed_file_parses_every_data_line() {
        let text = "sku,name,unit cost\nP-1,Bearing,\"$1,250.50\"\nP-2,\"Seal, Kit\",9.99\n";
        let parsed = parse_file(ResourceType::Parts, text);
        assert!(parsed.errors.is_empty());
        assert_eq!(parsed.rows.len(), 2);
        assert_eq!(parsed.rows[0].number("unitCost"), Some(1250.5));
        assert_eq!(parsed.rows[1].text("name"), Some("Seal, Kit"));
    }
}
