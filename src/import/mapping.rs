//! Header mapping
//!
//! Resolves raw CSV headers to canonical fields, positionally. Built once
//! per file; the coercer walks cells against it.

use crate::import::resource::{FieldSpec, ResourceType};

/// Positional mapping from CSV columns to canonical fields.
///
/// Columns whose header matched nothing are `None` and their cells are
/// ignored downstream.
#[derive(Debug)]
pub struct HeaderMapping {
    slots: Vec<Option<&'static FieldSpec>>,
}

impl HeaderMapping {
    pub fn field_at(&self, column: usize) -> Option<&'static FieldSpec> {
        self.slots.get(column).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Map raw headers for a resource type.
///
/// Headers are lowercased and trimmed, then looked up in the resource's
/// alias table. Missing required columns fail the whole file: the caller
/// must not proceed to row coercion.
pub fn map_headers(
    resource: ResourceType,
    raw_headers: &[String],
) -> Result<HeaderMapping, Vec<String>> {
    let slots: Vec<Option<&'static FieldSpec>> = raw_headers
        .iter()
        .map(|header| {
            let normalized = header.trim().to_lowercase();
            resource.fields().iter().find(|f| f.matches(&normalized))
        })
        .collect();

    let errors: Vec<String> = resource
        .fields()
        .iter()
        .filter(|f| f.required)
        .filter(|f| !slots.iter().any(|s| s.map(|m| m.name) == Some(f.name)))
        .map(|f| missing_column_error(f))
        .collect();

    if errors.is_empty() {
        Ok(HeaderMapping { slots })
    } else {
        Err(errors)
    }
}

fn missing_column_error(field: &FieldSpec) -> String {
    if field.aliases.is_empty() {
        format!("Missing required column: \"{}\"", field.name)
    } else {
        let alternatives = field
            .aliases
            .iter()
            .map(|a| format!("\"{}\"", a))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Missing required column: \"{}\" (or {})",
            field.name, alternatives
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn case_and_spacing_variants_resolve_to_same_field() {
        for header in ["Part Number", "partnumber", "SKU", "  part_number  "] {
            let mapping =
                map_headers(ResourceType::Parts, &headers(&[header, "name"])).unwrap();
            assert_eq!(mapping.field_at(0).unwrap().name, "partNumber");
        }
    }

    #[test]
    fn unmapped_columns_are_none() {
        let mapping = map_headers(
            ResourceType::Parts,
            &headers(&["sku", "name", "internal_note"]),
        )
        .unwrap();
        assert!(mapping.field_at(2).is_none());
        assert_eq!(mapping.len(), 3);
    }

    #[test]
    fn missing_required_column_fails_the_file() {
        let errors = map_headers(ResourceType::Parts, &headers(&["sku", "qty"])).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("\"name\""));
    }

    #[test]
    fn reports_every_missing_required_column() {
        let errors = map_headers(ResourceType::Users, &headers(&["email"])).unwrap_err();
        // employee_id, name, pin, role_name
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.contains("\"pin\"")));
        assert!(errors.iter().any(|e| e.contains("\"access_code\"")));
    }

    #[test]
    fn duplicate_headers_both_map() {
        // Both columns map to the same field; the coercer takes the last
        // non-blank cell in column order.
        let mapping = map_headers(
            ResourceType::Locations,
            &headers(&["code", "location_code", "name"]),
        )
        .unwrap();
        assert_eq!(mapping.field_at(0).unwrap().name, "code");
        assert_eq!(mapping.field_at(1).unwrap().name, "code");
    }
}
