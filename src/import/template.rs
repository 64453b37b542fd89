//! Downloadable CSV templates
//!
//! One static header row plus one example row per resource type. The
//! filenames match what the FixIt web UI serves, so docs and muscle
//! memory carry over.

use crate::import::resource::ResourceType;

/// Canonical header row: field-table order, canonical names
pub fn headers(resource: ResourceType) -> Vec<&'static str> {
    resource.fields().iter().map(|f| f.name).collect()
}

/// Example data row shown in the template
pub fn example_row(resource: ResourceType) -> &'static [&'static str] {
    match resource {
        ResourceType::Parts => &[
            "PART-001",
            "Bearing 6205",
            "Deep groove ball bearing",
            "100",
            "10",
            "25.50",
            "Main Warehouse",
            "SKF",
        ],
        ResourceType::Equipment => &[
            "EQ-001",
            "CNC Lathe",
            "PLANT-A",
            "Haas VF-2",
            "CNC",
            "TECH-001",
            "operational",
        ],
        ResourceType::Locations => &["PLANT-A", "Plant A", "Main manufacturing facility", ""],
        ResourceType::Users => &[
            "TECH-001",
            "John Smith",
            "john@company.com",
            "1234",
            "tech",
            "45.00",
        ],
    }
}

/// Suggested download filename for a resource's template
pub fn filename(resource: ResourceType) -> &'static str {
    match resource {
        // Historical name from the inventory import form
        ResourceType::Parts => "parts_import_template.csv",
        ResourceType::Equipment => "equipment-import-template.csv",
        ResourceType::Locations => "locations-import-template.csv",
        ResourceType::Users => "users-import-template.csv",
    }
}

/// Render the template as CSV text.
///
/// Example values are known to be quote- and comma-free, so a plain join
/// is enough here; real data exports go through `csv::Writer`.
pub fn render(resource: ResourceType) -> String {
    format!(
        "{}\n{}\n",
        headers(resource).join(","),
        example_row(resource).join(",")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::parse_file;

    #[test]
    fn example_rows_match_header_width() {
        for resource in ResourceType::ALL {
            assert_eq!(
                headers(resource).len(),
                example_row(resource).len(),
                "{} template is ragged",
                resource
            );
        }
    }

    #[test]
    fn templates_round_trip_through_the_parser() {
        for resource in ResourceType::ALL {
            let parsed = parse_file(resource, &render(resource));
            assert!(
                parsed.errors.is_empty(),
                "{} template failed to parse: {:?}",
                resource,
                parsed.errors
            );
            assert_eq!(parsed.rows.len(), 1);
        }
    }

    #[test]
    fn filenames_follow_the_download_patterns() {
        assert_eq!(filename(ResourceType::Parts), "parts_import_template.csv");
        for resource in [
            ResourceType::Equipment,
            ResourceType::Locations,
            ResourceType::Users,
        ] {
            assert_eq!(
                filename(resource),
                format!("{}-import-template.csv", resource)
            );
        }
    }
}
