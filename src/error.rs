// src/error.rs

//! Error types for recetario
//!
//! One tagged error type for the whole crate. Entity methods convert
//! every failure into a variant here; nothing panics outside of tests.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Underlying SQLite failure (connectivity, constraint, SQL error)
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Lookup by id and name matched no row
    #[error("no {table} row matching id {id} and name '{name}'")]
    NotFound {
        table: &'static str,
        id: i64,
        name: String,
    },

    /// Unit string other than "kg" or "gr"
    #[error("unit '{0}' is not supported (expected 'kg' or 'gr')")]
    UnsupportedUnit(String),

    /// Record is in a state the operation cannot use (e.g. missing id)
    #[error("invalid record: {0}")]
    InvalidRecord(String),
}
