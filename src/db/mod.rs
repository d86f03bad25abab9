// src/db/mod.rs

//! Database access for recetario
//!
//! One injected SQLite connection with explicit lifecycle: `init` creates
//! the database (parent directories included) and applies migrations,
//! `open` connects to an existing database, and `transaction` scopes a
//! unit of work. Foreign keys are enabled on every connection so that
//! deleting an ingredient or recipe cascades into its quantity rows.

pub mod models;
pub mod schema;

use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::Result;

/// Create the database file (and parent directories) and apply migrations
pub fn init(db_path: &str) -> Result<()> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let conn = open(db_path)?;
    schema::migrate(&conn)?;
    Ok(())
}

/// Open a connection with foreign key enforcement enabled
pub fn open(db_path: &str) -> Result<Connection> {
    debug!("Opening database at {}", db_path);
    let conn = Connection::open(db_path)?;
    conn.execute("PRAGMA foreign_keys = ON", [])?;
    Ok(conn)
}

/// Run a closure inside a transaction, committing on success
pub fn transaction<T, F>(conn: &mut Connection, f: F) -> Result<T>
where
    F: FnOnce(&Connection) -> Result<T>,
{
    let tx = conn.transaction()?;
    let result = f(&tx)?;
    tx.commit()?;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_commits_on_ok() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (x INTEGER)", []).unwrap();

        transaction(&mut conn, |tx| {
            tx.execute("INSERT INTO t (x) VALUES (1)", [])?;
            Ok(())
        })
        .unwrap();

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE t (x INTEGER)", []).unwrap();

        let result: Result<()> = transaction(&mut conn, |tx| {
            tx.execute("INSERT INTO t (x) VALUES (1)", [])?;
            Err(crate::Error::InvalidRecord("forced failure".to_string()))
        });
        assert!(result.is_err());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM t", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, 0);
    }
}
