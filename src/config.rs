// src/config.rs

//! Database location configuration
//!
//! The database path comes from (in order): an explicit CLI override,
//! the `RECETARIO_DB` environment variable, or a per-user data
//! directory. A `.env` file in the working directory is honored via
//! `dotenvy` at process start.

use std::env;
use std::path::PathBuf;

/// Environment variable naming the database file
pub const DB_PATH_ENV: &str = "RECETARIO_DB";

/// Default database path: `$RECETARIO_DB`, or `<data dir>/recetario/recetario.db`
pub fn default_db_path() -> PathBuf {
    if let Ok(path) = env::var(DB_PATH_ENV) {
        return PathBuf::from(path);
    }

    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("recetario")
        .join("recetario.db")
}

/// Resolve the database path from an optional CLI override
pub fn resolve_db_path(cli_override: Option<&str>) -> PathBuf {
    match cli_override {
        Some(path) => PathBuf::from(path),
        None => default_db_path(),
    }
}
