//! Store lookups, writes and listings
//!
//! Key maps are loaded once per import and matched lowercased, mirroring
//! the duplicate detection of the original importer. Writes for a whole
//! import batch happen inside one transaction.

use std::collections::HashMap;

use chrono::Utc;
use rusqlite::{params, OptionalExtension, Transaction};

use super::types::parse_created;
use super::{
    EquipmentRecord, LocationRecord, NewEquipment, NewLocation, NewPart, NewUser, PartRecord,
    Store, StoreError, UserRecord,
};

impl Store {
    /// Role name (lowercased) to id
    pub fn role_map(&self) -> Result<HashMap<String, i64>, StoreError> {
        self.key_map("SELECT name, id FROM roles")
    }

    /// Location code (lowercased) to id
    pub fn location_code_map(&self) -> Result<HashMap<String, i64>, StoreError> {
        self.key_map("SELECT code, id FROM locations")
    }

    /// Location code or name (lowercased) to id.
    ///
    /// The parts importer historically accepted either spelling in the
    /// `location` column.
    pub fn location_lookup_map(&self) -> Result<HashMap<String, i64>, StoreError> {
        let mut map = self.key_map("SELECT name, id FROM locations")?;
        map.extend(self.key_map("SELECT code, id FROM locations")?);
        Ok(map)
    }

    /// Part number (lowercased) to id
    pub fn part_keys(&self) -> Result<HashMap<String, i64>, StoreError> {
        self.key_map("SELECT part_number, id FROM parts")
    }

    /// Equipment code (lowercased) to id
    pub fn equipment_keys(&self) -> Result<HashMap<String, i64>, StoreError> {
        self.key_map("SELECT code, id FROM equipment")
    }

    /// Employee id (lowercased) to id
    pub fn user_keys(&self) -> Result<HashMap<String, i64>, StoreError> {
        self.key_map("SELECT employee_id, id FROM users")
    }

    fn key_map(&self, sql: &str) -> Result<HashMap<String, i64>, StoreError> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?.to_lowercase(), row.get::<_, i64>(1)?))
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    /// Write a parts import batch in one transaction
    pub fn apply_parts(
        &mut self,
        inserts: &[NewPart],
        updates: &[(i64, NewPart)],
    ) -> Result<(usize, usize), StoreError> {
        let created = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for part in inserts {
            tx.execute(
                "INSERT INTO parts (part_number, name, description, quantity, min_stock, unit_cost, location_id, manufacturer, created)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    part.part_number,
                    part.name,
                    part.description,
                    part.quantity,
                    part.min_stock,
                    part.unit_cost,
                    part.location_id,
                    part.manufacturer,
                    created,
                ],
            )?;
        }

        for (id, part) in updates {
            tx.execute(
                "UPDATE parts SET name = ?1, description = ?2, quantity = ?3, min_stock = ?4, unit_cost = ?5, location_id = ?6, manufacturer = ?7
                 WHERE id = ?8",
                params![
                    part.name,
                    part.description,
                    part.quantity,
                    part.min_stock,
                    part.unit_cost,
                    part.location_id,
                    part.manufacturer,
                    id,
                ],
            )?;
        }

        tx.commit()?;
        Ok((inserts.len(), updates.len()))
    }

    /// Write an equipment import batch in one transaction
    pub fn apply_equipment(
        &mut self,
        inserts: &[NewEquipment],
        updates: &[(i64, NewEquipment)],
    ) -> Result<(usize, usize), StoreError> {
        let created = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for eq in inserts {
            tx.execute(
                "INSERT INTO equipment (code, name, location_id, model_name, type_code, owner_employee_id, status, created)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    eq.code,
                    eq.name,
                    eq.location_id,
                    eq.model_name,
                    eq.type_code,
                    eq.owner_employee_id,
                    eq.status.as_str(),
                    created,
                ],
            )?;
        }

        for (id, eq) in updates {
            tx.execute(
                "UPDATE equipment SET name = ?1, location_id = ?2, model_name = ?3, type_code = ?4, owner_employee_id = ?5, status = ?6
                 WHERE id = ?7",
                params![
                    eq.name,
                    eq.location_id,
                    eq.model_name,
                    eq.type_code,
                    eq.owner_employee_id,
                    eq.status.as_str(),
                    id,
                ],
            )?;
        }

        tx.commit()?;
        Ok((inserts.len(), updates.len()))
    }

    /// Write a locations import batch in one transaction.
    ///
    /// Parent codes are resolved inside the transaction, in file order,
    /// so a parent defined earlier in the same file is found. Unknown
    /// parents were already downgraded to warnings by the importer and
    /// simply stay unset.
    pub fn apply_locations(
        &mut self,
        inserts: &[NewLocation],
        updates: &[(i64, NewLocation)],
    ) -> Result<(usize, usize), StoreError> {
        let created = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for loc in inserts {
            let parent_id = resolve_parent(&tx, loc.parent_code.as_deref())?;
            tx.execute(
                "INSERT INTO locations (code, name, description, parent_id, created)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![loc.code, loc.name, loc.description, parent_id, created],
            )?;
        }

        for (id, loc) in updates {
            let parent_id = resolve_parent(&tx, loc.parent_code.as_deref())?;
            tx.execute(
                "UPDATE locations SET name = ?1, description = ?2, parent_id = ?3 WHERE id = ?4",
                params![loc.name, loc.description, parent_id, id],
            )?;
        }

        tx.commit()?;
        Ok((inserts.len(), updates.len()))
    }

    /// Write a users import batch in one transaction
    pub fn apply_users(
        &mut self,
        inserts: &[NewUser],
        updates: &[(i64, NewUser)],
    ) -> Result<(usize, usize), StoreError> {
        let created = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;

        for user in inserts {
            tx.execute(
                "INSERT INTO users (employee_id, name, email, pin, role_id, hourly_rate, created)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    user.employee_id,
                    user.name,
                    user.email,
                    user.pin,
                    user.role_id,
                    user.hourly_rate,
                    created,
                ],
            )?;
        }

        for (id, user) in updates {
            tx.execute(
                "UPDATE users SET name = ?1, email = ?2, pin = ?3, role_id = ?4, hourly_rate = ?5
                 WHERE id = ?6",
                params![
                    user.name,
                    user.email,
                    user.pin,
                    user.role_id,
                    user.hourly_rate,
                    id,
                ],
            )?;
        }

        tx.commit()?;
        Ok((inserts.len(), updates.len()))
    }

    pub fn list_parts(&self) -> Result<Vec<PartRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT p.id, p.part_number, p.name, p.description, p.quantity, p.min_stock,
                    p.unit_cost, l.name, p.manufacturer, p.created
             FROM parts p
             LEFT JOIN locations l ON p.location_id = l.id
             ORDER BY p.part_number",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(PartRecord {
                id: row.get(0)?,
                part_number: row.get(1)?,
                name: row.get(2)?,
                description: row.get(3)?,
                quantity: row.get(4)?,
                min_stock: row.get(5)?,
                unit_cost: row.get(6)?,
                location: row.get(7)?,
                manufacturer: row.get(8)?,
                created: parse_created(row.get::<_, String>(9)?),
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub fn list_equipment(&self) -> Result<Vec<EquipmentRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT e.id, e.code, e.name, l.code, e.model_name, e.type_code,
                    e.owner_employee_id, e.status, e.created
             FROM equipment e
             JOIN locations l ON e.location_id = l.id
             ORDER BY e.code",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(EquipmentRecord {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
                location_code: row.get(3)?,
                model_name: row.get(4)?,
                type_code: row.get(5)?,
                owner_employee_id: row.get(6)?,
                status: row.get(7)?,
                created: parse_created(row.get::<_, String>(8)?),
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub fn list_locations(&self) -> Result<Vec<LocationRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT l.id, l.code, l.name, l.description, p.code, l.created
             FROM locations l
             LEFT JOIN locations p ON l.parent_id = p.id
             ORDER BY l.code",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(LocationRecord {
                id: row.get(0)?,
                code: row.get(1)?,
                name: row.get(2)?,
                description: row.get(3)?,
                parent_code: row.get(4)?,
                created: parse_created(row.get::<_, String>(5)?),
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    pub fn list_users(&self) -> Result<Vec<UserRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT u.id, u.employee_id, u.name, u.email, u.pin, r.name, u.hourly_rate, u.created
             FROM users u
             JOIN roles r ON u.role_id = r.id
             ORDER BY u.employee_id",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(UserRecord {
                id: row.get(0)?,
                employee_id: row.get(1)?,
                name: row.get(2)?,
                email: row.get(3)?,
                pin: row.get(4)?,
                role_name: row.get(5)?,
                hourly_rate: row.get(6)?,
                created: parse_created(row.get::<_, String>(7)?),
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }
}

fn resolve_parent(tx: &Transaction<'_>, parent_code: Option<&str>) -> Result<Option<i64>, StoreError> {
    let Some(code) = parent_code else {
        return Ok(None);
    };
    let id = tx
        .query_row(
            "SELECT id FROM locations WHERE code = ?1 COLLATE NOCASE",
            params![code],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::EquipmentStatus;

    fn store() -> Store {
        Store::open_in_memory().unwrap()
    }

    fn location(code: &str, parent: Option<&str>) -> NewLocation {
        NewLocation {
            code: code.to_string(),
            name: format!("{} name", code),
            description: None,
            parent_code: parent.map(String::from),
        }
    }

    #[test]
    fn seed_roles_are_present() {
        let store = store();
        let roles = store.role_map().unwrap();
        assert!(roles.contains_key("admin"));
        assert!(roles.contains_key("tech"));
        assert!(roles.contains_key("operator"));
    }

    #[test]
    fn key_maps_are_lowercased() {
        let mut store = store();
        store
            .apply_locations(&[location("PLANT-A", None)], &[])
            .unwrap();
        let keys = store.location_code_map().unwrap();
        assert!(keys.contains_key("plant-a"));
    }

    #[test]
    fn parent_earlier_in_same_batch_resolves() {
        let mut store = store();
        store
            .apply_locations(
                &[location("PLANT-A", None), location("PLANT-A-L1", Some("PLANT-A"))],
                &[],
            )
            .unwrap();
        let listed = store.list_locations().unwrap();
        let child = listed.iter().find(|l| l.code == "PLANT-A-L1").unwrap();
        assert_eq!(child.parent_code.as_deref(), Some("PLANT-A"));
    }

    #[test]
    fn unknown_parent_is_left_empty() {
        let mut store = store();
        store
            .apply_locations(&[location("PLANT-B", Some("NOPE"))], &[])
            .unwrap();
        let listed = store.list_locations().unwrap();
        assert!(listed[0].parent_code.is_none());
    }

    #[test]
    fn part_listing_joins_location_name() {
        let mut store = store();
        store
            .apply_locations(&[location("WH-1", None)], &[])
            .unwrap();
        let loc_id = store.location_code_map().unwrap()["wh-1"];
        store
            .apply_parts(
                &[NewPart {
                    part_number: "P-1".into(),
                    name: "Bearing".into(),
                    description: None,
                    quantity: 5.0,
                    min_stock: 0.0,
                    unit_cost: Some(12.5),
                    location_id: Some(loc_id),
                    manufacturer: None,
                }],
                &[],
            )
            .unwrap();
        let parts = store.list_parts().unwrap();
        assert_eq!(parts[0].location.as_deref(), Some("WH-1 name"));
    }

    #[test]
    fn equipment_update_changes_status() {
        let mut store = store();
        store
            .apply_locations(&[location("PLANT-A", None)], &[])
            .unwrap();
        let loc_id = store.location_code_map().unwrap()["plant-a"];
        let eq = NewEquipment {
            code: "EQ-001".into(),
            name: "Lathe".into(),
            location_id: loc_id,
            model_name: None,
            type_code: None,
            owner_employee_id: None,
            status: EquipmentStatus::Operational,
        };
        store.apply_equipment(&[eq.clone()], &[]).unwrap();
        let id = store.equipment_keys().unwrap()["eq-001"];

        let mut changed = eq;
        changed.status = EquipmentStatus::Down;
        store.apply_equipment(&[], &[(id, changed)]).unwrap();

        let listed = store.list_equipment().unwrap();
        assert_eq!(listed[0].status, "down");
    }
}
