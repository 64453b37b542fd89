//! Store record types
//!
//! `New*` structs carry validated values into the store; `*Record`
//! structs come back out with foreign keys resolved to display names for
//! listing and export.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Equipment operating status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EquipmentStatus {
    #[default]
    Operational,
    Down,
    Maintenance,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 3] = [
        EquipmentStatus::Operational,
        EquipmentStatus::Down,
        EquipmentStatus::Maintenance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Operational => "operational",
            EquipmentStatus::Down => "down",
            EquipmentStatus::Maintenance => "maintenance",
        }
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "operational" => Ok(EquipmentStatus::Operational),
            "down" => Ok(EquipmentStatus::Down),
            "maintenance" => Ok(EquipmentStatus::Maintenance),
            _ => Err(format!(
                "Invalid status \"{}\". Expected one of: operational, down, maintenance",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewPart {
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub min_stock: f64,
    pub unit_cost: Option<f64>,
    pub location_id: Option<i64>,
    pub manufacturer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PartRecord {
    pub id: i64,
    pub part_number: String,
    pub name: String,
    pub description: Option<String>,
    pub quantity: f64,
    pub min_stock: f64,
    pub unit_cost: Option<f64>,
    /// Name of the linked location, if any
    pub location: Option<String>,
    pub manufacturer: Option<String>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEquipment {
    pub code: String,
    pub name: String,
    pub location_id: i64,
    pub model_name: Option<String>,
    pub type_code: Option<String>,
    pub owner_employee_id: Option<String>,
    pub status: EquipmentStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct EquipmentRecord {
    pub id: i64,
    pub code: String,
    pub name: String,
    /// Code of the linked location
    pub location_code: String,
    pub model_name: Option<String>,
    pub type_code: Option<String>,
    pub owner_employee_id: Option<String>,
    pub status: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewLocation {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    /// Resolved against existing codes at write time, inside the
    /// import transaction, so parents earlier in the same file work.
    pub parent_code: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationRecord {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    /// Code of the parent location, if any
    pub parent_code: Option<String>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub employee_id: String,
    pub name: String,
    pub email: Option<String>,
    pub pin: String,
    pub role_id: i64,
    pub hourly_rate: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: i64,
    pub employee_id: String,
    pub name: String,
    pub email: Option<String>,
    pub pin: String,
    /// Name of the linked role
    pub role_name: String,
    pub hourly_rate: Option<f64>,
    pub created: DateTime<Utc>,
}

pub(super) fn parse_created(raw: String) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_default()
}
