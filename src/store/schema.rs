//! Store schema initialization

use super::{Store, StoreError};

impl Store {
    pub(super) fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            -- Access roles referenced by users
            CREATE TABLE IF NOT EXISTS roles (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL UNIQUE COLLATE NOCASE
            );

            -- Physical locations, optionally nested
            CREATE TABLE IF NOT EXISTS locations (
                id INTEGER PRIMARY KEY,
                code TEXT NOT NULL UNIQUE COLLATE NOCASE,
                name TEXT NOT NULL,
                description TEXT,
                parent_id INTEGER REFERENCES locations(id),
                created TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_locations_parent ON locations(parent_id);

            -- Spare parts inventory
            CREATE TABLE IF NOT EXISTS parts (
                id INTEGER PRIMARY KEY,
                part_number TEXT NOT NULL UNIQUE COLLATE NOCASE,
                name TEXT NOT NULL,
                description TEXT,
                quantity REAL NOT NULL DEFAULT 0,
                min_stock REAL NOT NULL DEFAULT 0,
                unit_cost REAL,
                location_id INTEGER REFERENCES locations(id),
                manufacturer TEXT,
                created TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_parts_location ON parts(location_id);

            -- Tracked equipment
            CREATE TABLE IF NOT EXISTS equipment (
                id INTEGER PRIMARY KEY,
                code TEXT NOT NULL UNIQUE COLLATE NOCASE,
                name TEXT NOT NULL,
                location_id INTEGER NOT NULL REFERENCES locations(id),
                model_name TEXT,
                type_code TEXT,
                owner_employee_id TEXT,
                status TEXT NOT NULL DEFAULT 'operational',
                created TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_equipment_location ON equipment(location_id);
            CREATE INDEX IF NOT EXISTS idx_equipment_status ON equipment(status);

            -- User accounts
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY,
                employee_id TEXT NOT NULL UNIQUE COLLATE NOCASE,
                name TEXT NOT NULL,
                email TEXT,
                pin TEXT NOT NULL,
                role_id INTEGER NOT NULL REFERENCES roles(id),
                hourly_rate REAL,
                created TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_users_role ON users(role_id);

            -- Seed roles; imports reference them by name
            INSERT OR IGNORE INTO roles (name) VALUES ('admin'), ('tech'), ('operator');
            "#,
        )?;
        Ok(())
    }
}
