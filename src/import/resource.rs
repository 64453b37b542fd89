//! Importable resource types and their field tables
//!
//! Each resource carries a static table of canonical fields with the
//! header aliases the FixIt web UI historically accepted. These tables
//! are load-bearing for compatibility: files exported from or written
//! for the web importer must map identically here.

use std::fmt;

/// Resource types that support bulk CSV import
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceType {
    Parts,
    Equipment,
    Locations,
    Users,
}

impl ResourceType {
    pub const ALL: [ResourceType; 4] = [
        ResourceType::Parts,
        ResourceType::Equipment,
        ResourceType::Locations,
        ResourceType::Users,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Parts => "parts",
            ResourceType::Equipment => "equipment",
            ResourceType::Locations => "locations",
            ResourceType::Users => "users",
        }
    }

    /// Human-facing label, e.g. for the wizard menu
    pub fn label(&self) -> &'static str {
        match self {
            ResourceType::Parts => "Spare Parts",
            ResourceType::Equipment => "Equipment",
            ResourceType::Locations => "Locations",
            ResourceType::Users => "Users",
        }
    }

    /// The field whose value uniquely identifies a row of this resource
    pub fn key_field(&self) -> &'static str {
        match self {
            ResourceType::Parts => "partNumber",
            ResourceType::Equipment => "code",
            ResourceType::Locations => "code",
            ResourceType::Users => "employee_id",
        }
    }

    pub fn fields(&self) -> &'static [FieldSpec] {
        match self {
            ResourceType::Parts => PART_FIELDS,
            ResourceType::Equipment => EQUIPMENT_FIELDS,
            ResourceType::Locations => LOCATION_FIELDS,
            ResourceType::Users => USER_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields().iter().find(|f| f.name == name)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a resource type from user input (CLI argument or config)
pub fn parse_resource_type(s: &str) -> Result<ResourceType, String> {
    match s.to_lowercase().as_str() {
        "parts" | "part" | "spare-parts" => Ok(ResourceType::Parts),
        "equipment" | "equip" | "eq" => Ok(ResourceType::Equipment),
        "locations" | "location" | "loc" => Ok(ResourceType::Locations),
        "users" | "user" => Ok(ResourceType::Users),
        _ => Err(format!(
            "Unsupported resource type: '{}'. Supported: parts, equipment, locations, users",
            s
        )),
    }
}

/// How cell values for a field are typed during coercion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
}

/// A canonical import field with its accepted header aliases
#[derive(Debug)]
pub struct FieldSpec {
    /// Canonical field name (the name used in errors and templates)
    pub name: &'static str,
    /// Accepted header spellings besides the canonical name itself
    pub aliases: &'static [&'static str],
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldSpec {
    /// Whether a normalized (lowercased, trimmed) header matches this field
    pub fn matches(&self, normalized: &str) -> bool {
        self.name.to_lowercase() == normalized
            || self.aliases.iter().any(|a| *a == normalized)
    }
}

const PART_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "partNumber",
        aliases: &["part number", "part_number", "sku"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "name",
        aliases: &["part name", "partname"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "description",
        aliases: &["desc"],
        required: false,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "quantity",
        aliases: &["qty", "stock"],
        required: false,
        kind: FieldKind::Number,
    },
    FieldSpec {
        name: "minStock",
        aliases: &["min stock", "min_stock", "reorderpoint", "reorder point", "reorder_point"],
        required: false,
        kind: FieldKind::Number,
    },
    FieldSpec {
        name: "unitCost",
        aliases: &["unit cost", "unit_cost", "cost", "price"],
        required: false,
        kind: FieldKind::Number,
    },
    FieldSpec {
        name: "location",
        aliases: &["loc"],
        required: false,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "manufacturer",
        aliases: &["mfg", "vendor"],
        required: false,
        kind: FieldKind::Text,
    },
];

const EQUIPMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "code",
        aliases: &["equipment_code", "eq_code", "asset_code"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "name",
        aliases: &["equipment_name", "eq_name", "asset_name", "description"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "location_code",
        aliases: &["location", "loc_code", "site"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "model_name",
        aliases: &["model", "equipment_model"],
        required: false,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "type_code",
        aliases: &["type", "equipment_type", "category"],
        required: false,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "owner_employee_id",
        aliases: &["owner", "owner_id", "responsible"],
        required: false,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "status",
        aliases: &["equipment_status", "state"],
        required: false,
        kind: FieldKind::Text,
    },
];

const LOCATION_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "code",
        aliases: &["location_code", "loc_code", "site_code"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "name",
        aliases: &["location_name", "site_name", "area"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "description",
        aliases: &["desc", "notes", "details"],
        required: false,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "parent_code",
        aliases: &["parent", "parent_location", "parent_site"],
        required: false,
        kind: FieldKind::Text,
    },
];

const USER_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "employee_id",
        aliases: &["emp_id", "employee_code", "id"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "name",
        aliases: &["full_name", "employee_name", "username"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "email",
        aliases: &["email_address", "e-mail"],
        required: false,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "pin",
        aliases: &["password", "passcode", "access_code"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "role_name",
        aliases: &["role", "user_role", "access_level"],
        required: true,
        kind: FieldKind::Text,
    },
    FieldSpec {
        name: "hourly_rate",
        aliases: &["rate", "wage", "pay_rate"],
        required: false,
        kind: FieldKind::Number,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_resource_has_a_required_key_field() {
        for resource in ResourceType::ALL {
            let key = resource.key_field();
            let spec = resource.field(key).expect("key field present");
            assert!(spec.required, "{} key field must be required", resource);
        }
    }

    #[test]
    fn aliases_are_pre_normalized() {
        // Lookup normalizes headers to lowercase; alias tables must
        // already be lowercase or they can never match.
        for resource in ResourceType::ALL {
            for field in resource.fields() {
                for alias in field.aliases {
                    assert_eq!(*alias, alias.to_lowercase().as_str());
                }
            }
        }
    }

    #[test]
    fn parse_accepts_common_spellings() {
        assert_eq!(parse_resource_type("Parts").unwrap(), ResourceType::Parts);
        assert_eq!(
            parse_resource_type("spare-parts").unwrap(),
            ResourceType::Parts
        );
        assert_eq!(parse_resource_type("eq").unwrap(), ResourceType::Equipment);
        assert!(parse_resource_type("widgets").is_err());
    }
}
