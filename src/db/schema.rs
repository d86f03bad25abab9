// src/db/schema.rs

//! Database schema definitions and migrations for recetario
//!
//! Defines the SQLite schema for the three core tables and provides a
//! migration system to evolve it over time. Column names follow the
//! original business vocabulary (Spanish) since the schema is shared
//! with existing data.

use rusqlite::Connection;
use tracing::{debug, info};

use crate::error::Result;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize the schema version tracking table
fn init_schema_version(conn: &Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
        )",
        [],
    )?;
    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> Result<i32> {
    init_schema_version(conn)?;

    let version = conn
        .query_row(
            "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);

    Ok(version)
}

/// Set the schema version
fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

/// Apply all pending migrations to bring the database up to date
pub fn migrate(conn: &Connection) -> Result<()> {
    let current_version = get_schema_version(conn)?;
    debug!("Current schema version: {}", current_version);

    if current_version >= SCHEMA_VERSION {
        debug!("Schema is up to date");
        return Ok(());
    }

    for version in (current_version + 1)..=SCHEMA_VERSION {
        info!("Applying migration to version {}", version);
        apply_migration(conn, version)?;
        set_schema_version(conn, version)?;
    }

    info!(
        "Schema migration complete. Now at version {}",
        SCHEMA_VERSION
    );
    Ok(())
}

/// Apply a specific migration version
fn apply_migration(conn: &Connection, version: i32) -> Result<()> {
    match version {
        1 => migrate_v1(conn),
        _ => Err(crate::Error::InvalidRecord(format!(
            "unknown migration version: {}",
            version
        ))),
    }
}

/// Initial schema - Version 1
///
/// Creates the three core tables:
/// - ingredientes: raw materials with per-gram pricing
/// - receta: recipes with markup and packaging parameters
/// - cant_ing: append-only ingredient quantities per recipe
fn migrate_v1(conn: &Connection) -> Result<()> {
    debug!("Creating schema version 1");

    conn.execute_batch(
        "
        -- Ingredients: precio holds the derived per-gram unit price
        CREATE TABLE ingredientes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            nombre TEXT NOT NULL,
            cantidad REAL,
            kg_gr TEXT NOT NULL,
            precio REAL
        );

        CREATE INDEX idx_ingredientes_nombre ON ingredientes(nombre);

        -- Recipes: costo_receta stays NULL until quantities are attached
        CREATE TABLE receta (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            nombre TEXT NOT NULL UNIQUE,
            porcentaje_venta REAL,
            precio_venta REAL,
            unidades_x_receta INTEGER,
            cantidad_Receta REAL,
            cant_x_paquete REAL,
            costo_receta REAL
        );

        -- Ingredient quantities per recipe: append-only, superseded rows
        -- are kept until cascade delete of the parent
        CREATE TABLE cant_ing (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            updated_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            id_ingrediente INTEGER,
            id_receta INTEGER,
            cantidad REAL,
            precio REAL,
            FOREIGN KEY (id_ingrediente) REFERENCES ingredientes (id) ON DELETE CASCADE,
            FOREIGN KEY (id_receta) REFERENCES receta (id) ON DELETE CASCADE
        );

        CREATE INDEX idx_cant_ing_receta ON cant_ing(id_receta);
        CREATE INDEX idx_cant_ing_ingrediente ON cant_ing(id_ingrediente, created_at);
        ",
    )?;

    debug!("Schema version 1 created");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    fn create_test_db() -> (NamedTempFile, Connection) {
        let temp_file = NamedTempFile::new().unwrap();
        let conn = Connection::open(temp_file.path()).unwrap();
        (temp_file, conn)
    }

    #[test]
    fn test_schema_version_tracking() {
        let (_temp, conn) = create_test_db();

        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 0);

        set_schema_version(&conn, 1).unwrap();
        let version = get_schema_version(&conn).unwrap();
        assert_eq!(version, 1);
    }

    #[test]
    fn test_migrate_creates_all_tables() {
        let (_temp, conn) = create_test_db();

        migrate(&conn).unwrap();

        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"ingredientes".to_string()));
        assert!(tables.contains(&"receta".to_string()));
        assert!(tables.contains(&"cant_ing".to_string()));
        assert!(tables.contains(&"schema_version".to_string()));
    }

    #[test]
    fn test_migrate_is_idempotent() {
        let (_temp, conn) = create_test_db();

        migrate(&conn).unwrap();
        let version1 = get_schema_version(&conn).unwrap();

        migrate(&conn).unwrap();
        let version2 = get_schema_version(&conn).unwrap();

        assert_eq!(version1, version2);
        assert_eq!(version1, SCHEMA_VERSION);
    }

    #[test]
    fn test_receta_nombre_unique_constraint() {
        let (_temp, conn) = create_test_db();
        migrate(&conn).unwrap();

        conn.execute("INSERT INTO receta (nombre) VALUES (?1)", ["brownies"])
            .unwrap();

        let result = conn.execute("INSERT INTO receta (nombre) VALUES (?1)", ["brownies"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cascade_delete_from_ingredientes() {
        let (_temp, conn) = create_test_db();
        conn.execute("PRAGMA foreign_keys = ON", []).unwrap();
        migrate(&conn).unwrap();

        conn.execute(
            "INSERT INTO ingredientes (nombre, cantidad, kg_gr, precio) VALUES ('harina', 1000.0, 'gr', 0.002)",
            [],
        )
        .unwrap();
        conn.execute("INSERT INTO receta (nombre) VALUES ('pan')", [])
            .unwrap();
        conn.execute(
            "INSERT INTO cant_ing (id_ingrediente, id_receta, cantidad, precio) VALUES (1, 1, 500.0, 1.0)",
            [],
        )
        .unwrap();

        conn.execute("DELETE FROM ingredientes WHERE id = 1", [])
            .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM cant_ing", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
