//! Row validation and store writes
//!
//! Consumes typed rows and produces an [`ImportReport`]. Rows are
//! independent: a bad row adds error entries and processing continues.
//! Writes are deferred until every row has been examined, then applied
//! in one store transaction. Under `validate_only` the same validation
//! and duplicate detection runs but nothing is written.

use std::collections::HashMap;

use crate::import::coerce::ImportRow;
use crate::import::report::{DuplicateStrategy, ImportOptions, ImportReport, RowError, RowWarning};
use crate::import::resource::ResourceType;
use crate::store::{
    EquipmentStatus, NewEquipment, NewLocation, NewPart, NewUser, Store, StoreError,
};

/// Where a unique key was last seen during an import
enum Seen {
    /// Already in the store, with its record id
    Existing(i64),
    /// Queued for insert earlier in this file, with its queue index
    Pending(usize),
}

/// Imports typed rows into a store
pub struct Importer<'a> {
    store: &'a mut Store,
}

impl<'a> Importer<'a> {
    pub fn new(store: &'a mut Store) -> Self {
        Self { store }
    }

    pub fn import(
        &mut self,
        resource: ResourceType,
        rows: &[ImportRow],
        options: ImportOptions,
    ) -> Result<ImportReport, StoreError> {
        match resource {
            ResourceType::Parts => self.import_parts(rows, options),
            ResourceType::Equipment => self.import_equipment(rows, options),
            ResourceType::Locations => self.import_locations(rows, options),
            ResourceType::Users => self.import_users(rows, options),
        }
    }

    fn import_parts(
        &mut self,
        rows: &[ImportRow],
        options: ImportOptions,
    ) -> Result<ImportReport, StoreError> {
        let mut report = ImportReport::new();
        let locations = self.store.location_lookup_map()?;
        let mut seen = seen_map(self.store.part_keys()?);

        let mut to_insert: Vec<NewPart> = Vec::new();
        let mut to_update: Vec<(i64, NewPart)> = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_num = idx + 2;
            let Some(part) = validate_part(row, row_num, &locations, &mut report) else {
                continue;
            };

            let key = part.part_number.to_lowercase();
            match seen.get(&key) {
                Some(prior) => match options.duplicate_strategy {
                    DuplicateStrategy::Error => report.push_error(
                        RowError::new(
                            row_num,
                            "partNumber",
                            format!("Part with SKU \"{}\" already exists", part.part_number),
                        )
                        .with_value(&part.part_number),
                    ),
                    DuplicateStrategy::Skip => report.skipped += 1,
                    DuplicateStrategy::Update => match prior {
                        Seen::Existing(id) => to_update.push((*id, part)),
                        // Same key twice in one file: last row wins
                        Seen::Pending(queue_idx) => to_insert[*queue_idx] = part,
                    },
                },
                None => {
                    seen.insert(key, Seen::Pending(to_insert.len()));
                    to_insert.push(part);
                }
            }
        }

        self.finish(report, options, to_insert, to_update, Store::apply_parts)
    }

    fn import_equipment(
        &mut self,
        rows: &[ImportRow],
        options: ImportOptions,
    ) -> Result<ImportReport, StoreError> {
        let mut report = ImportReport::new();
        let locations = self.store.location_code_map()?;
        let mut seen = seen_map(self.store.equipment_keys()?);

        let mut to_insert: Vec<NewEquipment> = Vec::new();
        let mut to_update: Vec<(i64, NewEquipment)> = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_num = idx + 2;
            let Some(eq) = validate_equipment(row, row_num, &locations, &mut report) else {
                continue;
            };

            let key = eq.code.to_lowercase();
            match seen.get(&key) {
                Some(prior) => match options.duplicate_strategy {
                    DuplicateStrategy::Error => report.push_error(
                        RowError::new(
                            row_num,
                            "code",
                            format!("Equipment with code \"{}\" already exists", eq.code),
                        )
                        .with_value(&eq.code),
                    ),
                    DuplicateStrategy::Skip => report.skipped += 1,
                    DuplicateStrategy::Update => match prior {
                        Seen::Existing(id) => to_update.push((*id, eq)),
                        Seen::Pending(queue_idx) => to_insert[*queue_idx] = eq,
                    },
                },
                None => {
                    seen.insert(key, Seen::Pending(to_insert.len()));
                    to_insert.push(eq);
                }
            }
        }

        self.finish(report, options, to_insert, to_update, Store::apply_equipment)
    }

    fn import_locations(
        &mut self,
        rows: &[ImportRow],
        options: ImportOptions,
    ) -> Result<ImportReport, StoreError> {
        let mut report = ImportReport::new();
        let mut seen = seen_map(self.store.location_code_map()?);

        let mut to_insert: Vec<NewLocation> = Vec::new();
        let mut to_update: Vec<(i64, NewLocation)> = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_num = idx + 2;
            let Some(mut loc) = validate_location(row, row_num, &mut report) else {
                continue;
            };

            // A parent must exist in the store or earlier in this file;
            // otherwise warn and import the location without one.
            if let Some(parent) = loc.parent_code.clone() {
                if !seen.contains_key(&parent.to_lowercase()) {
                    report.push_warning(RowWarning {
                        row: row_num,
                        field: "parent_code".to_string(),
                        message: format!("Parent \"{}\" not found, will be left empty", parent),
                    });
                    loc.parent_code = None;
                }
            }

            let key = loc.code.to_lowercase();
            match seen.get(&key) {
                Some(prior) => match options.duplicate_strategy {
                    DuplicateStrategy::Error => report.push_error(
                        RowError::new(
                            row_num,
                            "code",
                            format!("Location with code \"{}\" already exists", loc.code),
                        )
                        .with_value(&loc.code),
                    ),
                    DuplicateStrategy::Skip => report.skipped += 1,
                    DuplicateStrategy::Update => match prior {
                        Seen::Existing(id) => to_update.push((*id, loc)),
                        Seen::Pending(queue_idx) => to_insert[*queue_idx] = loc,
                    },
                },
                None => {
                    seen.insert(key, Seen::Pending(to_insert.len()));
                    to_insert.push(loc);
                }
            }
        }

        self.finish(report, options, to_insert, to_update, Store::apply_locations)
    }

    fn import_users(
        &mut self,
        rows: &[ImportRow],
        options: ImportOptions,
    ) -> Result<ImportReport, StoreError> {
        let mut report = ImportReport::new();
        let roles = self.store.role_map()?;
        let mut seen = seen_map(self.store.user_keys()?);

        let mut to_insert: Vec<NewUser> = Vec::new();
        let mut to_update: Vec<(i64, NewUser)> = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let row_num = idx + 2;
            let Some(user) = validate_user(row, row_num, &roles, &mut report) else {
                continue;
            };

            let key = user.employee_id.to_lowercase();
            match seen.get(&key) {
                Some(prior) => match options.duplicate_strategy {
                    DuplicateStrategy::Error => report.push_error(
                        RowError::new(
                            row_num,
                            "employee_id",
                            format!(
                                "User with employee ID \"{}\" already exists",
                                user.employee_id
                            ),
                        )
                        .with_value(&user.employee_id),
                    ),
                    DuplicateStrategy::Skip => report.skipped += 1,
                    DuplicateStrategy::Update => match prior {
                        Seen::Existing(id) => to_update.push((*id, user)),
                        Seen::Pending(queue_idx) => to_insert[*queue_idx] = user,
                    },
                },
                None => {
                    seen.insert(key, Seen::Pending(to_insert.len()));
                    to_insert.push(user);
                }
            }
        }

        self.finish(report, options, to_insert, to_update, Store::apply_users)
    }

    /// Fill in counts and, unless validating only, commit the batch
    fn finish<T>(
        &mut self,
        mut report: ImportReport,
        options: ImportOptions,
        to_insert: Vec<T>,
        to_update: Vec<(i64, T)>,
        apply: fn(&mut Store, &[T], &[(i64, T)]) -> Result<(usize, usize), StoreError>,
    ) -> Result<ImportReport, StoreError> {
        if options.validate_only {
            report.inserted = to_insert.len();
            report.updated = to_update.len();
            return Ok(report);
        }

        let (inserted, updated) = apply(self.store, &to_insert, &to_update)?;
        report.inserted = inserted;
        report.updated = updated;
        Ok(report)
    }
}

fn seen_map(existing: HashMap<String, i64>) -> HashMap<String, Seen> {
    existing
        .into_iter()
        .map(|(k, id)| (k, Seen::Existing(id)))
        .collect()
}

fn require_text(
    row: &ImportRow,
    field: &'static str,
    label: &str,
    row_num: usize,
    errors: &mut Vec<RowError>,
) -> Option<String> {
    match row.text(field) {
        Some(value) => Some(value.to_string()),
        None => {
            errors.push(RowError::new(row_num, field, format!("{} is required", label)));
            None
        }
    }
}

fn check_max_len(
    value: &Option<String>,
    field: &'static str,
    label: &str,
    max: usize,
    row_num: usize,
    errors: &mut Vec<RowError>,
) {
    if let Some(v) = value {
        if v.chars().count() > max {
            errors.push(RowError::new(
                row_num,
                field,
                format!("{} must be {} characters or fewer", label, max),
            ));
        }
    }
}

fn check_non_negative(
    row: &ImportRow,
    field: &'static str,
    label: &str,
    row_num: usize,
    errors: &mut Vec<RowError>,
) -> Option<f64> {
    let value = row.number(field)?;
    if value < 0.0 {
        errors.push(RowError::new(
            row_num,
            field,
            format!("{} must be a non-negative number", label),
        ));
        return None;
    }
    Some(value)
}

fn validate_part(
    row: &ImportRow,
    row_num: usize,
    locations: &HashMap<String, i64>,
    report: &mut ImportReport,
) -> Option<NewPart> {
    let mut errors = Vec::new();

    let part_number = require_text(row, "partNumber", "Part number", row_num, &mut errors);
    let name = require_text(row, "name", "Name", row_num, &mut errors);

    let quantity = check_non_negative(row, "quantity", "Quantity", row_num, &mut errors);
    let min_stock = check_non_negative(row, "minStock", "Min stock", row_num, &mut errors);
    let unit_cost = check_non_negative(row, "unitCost", "Unit cost", row_num, &mut errors);

    let mut location_id = None;
    if let Some(location) = row.text("location") {
        match locations.get(&location.to_lowercase()) {
            Some(&id) => location_id = Some(id),
            None => errors.push(
                RowError::new(
                    row_num,
                    "location",
                    format!("Location \"{}\" not found", location),
                )
                .with_value(location),
            ),
        }
    }

    if !errors.is_empty() {
        for e in errors {
            report.push_error(e);
        }
        return None;
    }

    Some(NewPart {
        part_number: part_number?,
        name: name?,
        description: row.text("description").map(String::from),
        quantity: quantity.unwrap_or(0.0),
        min_stock: min_stock.unwrap_or(0.0),
        unit_cost,
        location_id,
        manufacturer: row.text("manufacturer").map(String::from),
    })
}

fn validate_equipment(
    row: &ImportRow,
    row_num: usize,
    locations: &HashMap<String, i64>,
    report: &mut ImportReport,
) -> Option<NewEquipment> {
    let mut errors = Vec::new();

    let code = require_text(row, "code", "Code", row_num, &mut errors).map(|c| c.to_uppercase());
    let name = require_text(row, "name", "Name", row_num, &mut errors);
    check_max_len(&code, "code", "Code", 20, row_num, &mut errors);
    check_max_len(&name, "name", "Name", 100, row_num, &mut errors);

    let location_code = require_text(row, "location_code", "Location code", row_num, &mut errors);
    let mut location_id = None;
    if let Some(ref lc) = location_code {
        match locations.get(&lc.to_lowercase()) {
            Some(&id) => location_id = Some(id),
            None => errors.push(
                RowError::new(
                    row_num,
                    "location_code",
                    format!("Location \"{}\" not found", lc),
                )
                .with_value(lc),
            ),
        }
    }

    let status = match row.text("status") {
        Some(raw) => match raw.parse::<EquipmentStatus>() {
            Ok(status) => status,
            Err(message) => {
                errors.push(RowError::new(row_num, "status", message).with_value(raw));
                EquipmentStatus::default()
            }
        },
        None => EquipmentStatus::default(),
    };

    if !errors.is_empty() {
        for e in errors {
            report.push_error(e);
        }
        return None;
    }

    Some(NewEquipment {
        code: code?,
        name: name?,
        location_id: location_id?,
        model_name: row.text("model_name").map(String::from),
        type_code: row.text("type_code").map(String::from),
        owner_employee_id: row.text("owner_employee_id").map(String::from),
        status,
    })
}

fn validate_location(
    row: &ImportRow,
    row_num: usize,
    report: &mut ImportReport,
) -> Option<NewLocation> {
    let mut errors = Vec::new();

    let code = require_text(row, "code", "Code", row_num, &mut errors).map(|c| c.to_uppercase());
    let name = require_text(row, "name", "Name", row_num, &mut errors);
    check_max_len(&code, "code", "Code", 20, row_num, &mut errors);
    check_max_len(&name, "name", "Name", 100, row_num, &mut errors);

    if !errors.is_empty() {
        for e in errors {
            report.push_error(e);
        }
        return None;
    }

    Some(NewLocation {
        code: code?,
        name: name?,
        description: row.text("description").map(String::from),
        parent_code: row.text("parent_code").map(String::from),
    })
}

fn validate_user(
    row: &ImportRow,
    row_num: usize,
    roles: &HashMap<String, i64>,
    report: &mut ImportReport,
) -> Option<NewUser> {
    let mut errors = Vec::new();

    let employee_id =
        require_text(row, "employee_id", "Employee ID", row_num, &mut errors).map(|v| v.to_uppercase());
    let name = require_text(row, "name", "Name", row_num, &mut errors);
    check_max_len(&employee_id, "employee_id", "Employee ID", 20, row_num, &mut errors);
    check_max_len(&name, "name", "Name", 100, row_num, &mut errors);

    let pin = require_text(row, "pin", "PIN", row_num, &mut errors);
    if let Some(ref pin) = pin {
        if !pin.chars().all(|c| c.is_ascii_digit()) {
            errors.push(RowError::new(row_num, "pin", "PIN must contain only digits"));
        } else if pin.len() < 4 {
            errors.push(RowError::new(row_num, "pin", "PIN must be at least 4 digits"));
        } else if pin.len() > 8 {
            errors.push(RowError::new(row_num, "pin", "PIN must be at most 8 digits"));
        }
    }

    let email = row.text("email").map(String::from);
    if let Some(ref email) = email {
        if !looks_like_email(email) {
            errors.push(
                RowError::new(row_num, "email", "Invalid email address").with_value(email),
            );
        }
    }

    let role_name = require_text(row, "role_name", "Role", row_num, &mut errors);
    let mut role_id = None;
    if let Some(ref role) = role_name {
        match roles.get(&role.to_lowercase()) {
            Some(&id) => role_id = Some(id),
            None => errors.push(
                RowError::new(row_num, "role_name", format!("Role \"{}\" not found", role))
                    .with_value(role),
            ),
        }
    }

    let hourly_rate = row.number("hourly_rate");
    if let Some(rate) = hourly_rate {
        if rate <= 0.0 {
            errors.push(RowError::new(
                row_num,
                "hourly_rate",
                "Hourly rate must be a positive number",
            ));
        }
    }

    if !errors.is_empty() {
        for e in errors {
            report.push_error(e);
        }
        return None;
    }

    Some(NewUser {
        employee_id: employee_id?,
        name: name?,
        email,
        pin: pin?,
        role_id: role_id?,
        hourly_rate,
    })
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::{parse_file, DuplicateStrategy, ImportOptions, ResourceType};

    fn import_text(
        store: &mut Store,
        resource: ResourceType,
        text: &str,
        options: ImportOptions,
    ) -> ImportReport {
        let parsed = parse_file(resource, text);
        assert!(parsed.errors.is_empty(), "file errors: {:?}", parsed.errors);
        Importer::new(store)
            .import(resource, &parsed.rows, options)
            .unwrap()
    }

    fn seed_location(store: &mut Store, code: &str) {
        let text = format!("code,name\n{},{} name\n", code, code);
        let report = import_text(store, ResourceType::Locations, &text, ImportOptions::default());
        assert!(report.success);
    }

    #[test]
    fn duplicate_sku_is_skipped_under_skip_strategy() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "sku,name\nP-1,First\nP-1,Again\nP-2,Second\n";
        let report = import_text(&mut store, ResourceType::Parts, text, ImportOptions::default());
        assert_eq!(report.inserted, 2);
        assert_eq!(report.skipped, 1);
        assert!(report.errors.is_empty());
        assert!(report.success);
    }

    #[test]
    fn blank_required_value_fails_only_that_row() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "sku,name\nP-1,First\nP-2,Second\nP-3,\n";
        let report = import_text(&mut store, ResourceType::Parts, text, ImportOptions::default());
        assert_eq!(report.inserted, 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].row, 4);
        assert_eq!(report.errors[0].field.as_deref(), Some("name"));
        assert!(!report.success);
        assert_eq!(store.list_parts().unwrap().len(), 2);
    }

    #[test]
    fn duplicate_strategy_error_reports_the_row() {
        let mut store = Store::open_in_memory().unwrap();
        import_text(
            &mut store,
            ResourceType::Parts,
            "sku,name\nP-1,First\n",
            ImportOptions::default(),
        );

        let options = ImportOptions {
            duplicate_strategy: DuplicateStrategy::Error,
            validate_only: false,
        };
        let report = import_text(&mut store, ResourceType::Parts, "sku,name\nP-1,Again\n", options);
        assert_eq!(report.inserted, 0);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("already exists"));
        assert_eq!(report.errors[0].value.as_deref(), Some("P-1"));
    }

    #[test]
    fn duplicate_strategy_update_overwrites() {
        let mut store = Store::open_in_memory().unwrap();
        import_text(
            &mut store,
            ResourceType::Parts,
            "sku,name,qty\nP-1,First,5\n",
            ImportOptions::default(),
        );

        let options = ImportOptions {
            duplicate_strategy: DuplicateStrategy::Update,
            validate_only: false,
        };
        let report = import_text(
            &mut store,
            ResourceType::Parts,
            "sku,name,qty\nP-1,Renamed,9\n",
            options,
        );
        assert_eq!(report.updated, 1);
        assert_eq!(report.inserted, 0);

        let parts = store.list_parts().unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "Renamed");
        assert_eq!(parts[0].quantity, 9.0);
    }

    #[test]
    fn validate_only_commits_nothing() {
        let mut store = Store::open_in_memory().unwrap();
        let options = ImportOptions {
            duplicate_strategy: DuplicateStrategy::Skip,
            validate_only: true,
        };
        let report = import_text(&mut store, ResourceType::Parts, "sku,name\nP-1,First\n", options);
        assert_eq!(report.inserted, 1);
        assert!(store.list_parts().unwrap().is_empty());
    }

    #[test]
    fn part_with_unknown_location_errors() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "sku,name,location\nP-1,Bearing,Narnia\n";
        let report = import_text(&mut store, ResourceType::Parts, text, ImportOptions::default());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].message, "Location \"Narnia\" not found");
    }

    #[test]
    fn part_location_matches_by_name_or_code() {
        let mut store = Store::open_in_memory().unwrap();
        seed_location(&mut store, "WH-1");
        let text = "sku,name,location\nP-1,Bearing,wh-1\nP-2,Seal,WH-1 name\n";
        let report = import_text(&mut store, ResourceType::Parts, text, ImportOptions::default());
        assert!(report.success, "errors: {:?}", report.errors);
        assert_eq!(report.inserted, 2);
    }

    #[test]
    fn negative_quantity_is_a_row_error() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "sku,name,qty\nP-1,Bearing,-3\n";
        let report = import_text(&mut store, ResourceType::Parts, text, ImportOptions::default());
        assert_eq!(
            report.errors[0].message,
            "Quantity must be a non-negative number"
        );
    }

    #[test]
    fn equipment_requires_known_location() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "code,name,location_code\nEQ-1,Lathe,PLANT-X\n";
        let report =
            import_text(&mut store, ResourceType::Equipment, text, ImportOptions::default());
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].field.as_deref(), Some("location_code"));
        assert_eq!(report.errors[0].value.as_deref(), Some("PLANT-X"));
    }

    #[test]
    fn equipment_code_is_uppercased_and_status_defaults() {
        let mut store = Store::open_in_memory().unwrap();
        seed_location(&mut store, "PLANT-A");
        let text = "code,name,location_code\neq-1,Lathe,plant-a\n";
        let report =
            import_text(&mut store, ResourceType::Equipment, text, ImportOptions::default());
        assert!(report.success, "errors: {:?}", report.errors);

        let listed = store.list_equipment().unwrap();
        assert_eq!(listed[0].code, "EQ-1");
        assert_eq!(listed[0].status, "operational");
    }

    #[test]
    fn equipment_rejects_unknown_status() {
        let mut store = Store::open_in_memory().unwrap();
        seed_location(&mut store, "PLANT-A");
        let text = "code,name,location_code,status\nEQ-1,Lathe,PLANT-A,broken\n";
        let report =
            import_text(&mut store, ResourceType::Equipment, text, ImportOptions::default());
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].message.contains("Invalid status"));
    }

    #[test]
    fn location_with_unknown_parent_warns_but_imports() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "code,name,parent_code\nPLANT-B,Plant B,MISSING\n";
        let report =
            import_text(&mut store, ResourceType::Locations, text, ImportOptions::default());
        assert!(report.success);
        assert_eq!(report.inserted, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(
            report.warnings[0].message,
            "Parent \"MISSING\" not found, will be left empty"
        );
    }

    #[test]
    fn location_parent_earlier_in_file_resolves_without_warning() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "code,name,parent_code\nPLANT-A,Plant A,\nPLANT-A-L1,Line 1,PLANT-A\n";
        let report =
            import_text(&mut store, ResourceType::Locations, text, ImportOptions::default());
        assert!(report.warnings.is_empty());
        let listed = store.list_locations().unwrap();
        let child = listed.iter().find(|l| l.code == "PLANT-A-L1").unwrap();
        assert_eq!(child.parent_code.as_deref(), Some("PLANT-A"));
    }

    #[test]
    fn user_pin_and_role_are_validated() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "employee_id,name,pin,role_name\n\
                    T-1,Ada,12,tech\n\
                    T-2,Bob,12ab,tech\n\
                    T-3,Cyd,1234,wizard\n\
                    T-4,Dan,1234,tech\n";
        let report = import_text(&mut store, ResourceType::Users, text, ImportOptions::default());
        assert_eq!(report.inserted, 1);
        assert_eq!(report.errors.len(), 3);
        assert_eq!(report.errors[0].message, "PIN must be at least 4 digits");
        assert_eq!(report.errors[1].message, "PIN must contain only digits");
        assert_eq!(report.errors[2].message, "Role \"wizard\" not found");
    }

    #[test]
    fn user_email_is_optional_but_checked() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "employee_id,name,email,pin,role_name\n\
                    T-1,Ada,,1234,tech\n\
                    T-2,Bob,not-an-email,1234,tech\n";
        let report = import_text(&mut store, ResourceType::Users, text, ImportOptions::default());
        assert_eq!(report.inserted, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].message, "Invalid email address");
    }

    #[test]
    fn user_hourly_rate_must_be_positive_when_present() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "employee_id,name,pin,role_name,rate\n\
                    T-1,Ada,1234,tech,0\n\
                    T-2,Bob,1234,tech,-5\n\
                    T-3,Cyd,1234,tech,12.5\n\
                    T-4,Dan,1234,tech,\n";
        let report = import_text(&mut store, ResourceType::Users, text, ImportOptions::default());
        assert_eq!(report.inserted, 2);
        assert_eq!(report.errors.len(), 2);
        for error in &report.errors {
            assert_eq!(error.field.as_deref(), Some("hourly_rate"));
            assert_eq!(error.message, "Hourly rate must be a positive number");
        }
        assert_eq!(report.errors[0].row, 2);
        assert_eq!(report.errors[1].row, 3);
    }

    #[test]
    fn over_length_code_and_name_are_rejected() {
        let mut store = Store::open_in_memory().unwrap();
        let long_code = "X".repeat(21);
        let long_name = "N".repeat(101);
        let text = format!(
            "code,name\n{},Plant\nOK-1,{}\nOK-2,Fits\n",
            long_code, long_name
        );
        let report =
            import_text(&mut store, ResourceType::Locations, &text, ImportOptions::default());
        assert_eq!(report.inserted, 1);
        assert_eq!(report.errors.len(), 2);
        assert_eq!(report.errors[0].message, "Code must be 20 characters or fewer");
        assert_eq!(report.errors[1].message, "Name must be 100 characters or fewer");
    }

    #[test]
    fn multiple_problems_in_one_row_all_reported() {
        let mut store = Store::open_in_memory().unwrap();
        let text = "employee_id,name,pin,role_name\nT-1,,999,ghost\n";
        let report = import_text(&mut store, ResourceType::Users, text, ImportOptions::default());
        let fields: Vec<_> = report
            .errors
            .iter()
            .filter_map(|e| e.field.as_deref())
            .collect();
        assert!(fields.contains(&"name"));
        assert!(fields.contains(&"pin"));
        assert!(fields.contains(&"role_name"));
        assert!(report.errors.iter().all(|e| e.row == 2));
    }
}
