// src/db/models/ingredient.rs

//! Ingredient model - raw materials with per-gram pricing

use std::str::FromStr;

use rusqlite::{Connection, OptionalExtension, Row, ToSql, params};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Purchase unit for an ingredient
///
/// Closed enumeration with an explicit grams-per-unit factor; anything
/// other than "kg" or "gr" is rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    Gr,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::Gr => "gr",
        }
    }

    /// Grams contained in one unit
    pub fn grams(&self) -> f64 {
        match self {
            Unit::Kg => 1000.0,
            Unit::Gr => 1.0,
        }
    }
}

impl FromStr for Unit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "kg" => Ok(Unit::Kg),
            "gr" => Ok(Unit::Gr),
            _ => Err(Error::UnsupportedUnit(s.to_string())),
        }
    }
}

/// An Ingredient is a purchased raw material
///
/// `price` is the price paid for `quantity` of `unit` as entered by the
/// user; `insert` serializes the derived per-gram unit price into the
/// `precio` column, so rows loaded back from the database carry the
/// per-gram price in this field.
#[derive(Debug, Clone, Serialize)]
pub struct Ingredient {
    pub id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub name: String,
    pub quantity: f64,
    pub unit: Unit,
    pub price: f64,
}

/// Partial update payload for an ingredient
///
/// Only the `Some` fields are written; the SET clause is built from the
/// provided keys.
#[derive(Debug, Clone, Default)]
pub struct IngredientChanges {
    pub name: Option<String>,
    pub quantity: Option<f64>,
    pub unit: Option<Unit>,
    pub price: Option<f64>,
}

impl Ingredient {
    /// Create a new Ingredient from user-entered values
    pub fn new(name: String, quantity: f64, unit: Unit, price: f64) -> Self {
        Self {
            id: None,
            created_at: None,
            updated_at: None,
            name,
            quantity,
            unit,
            price,
        }
    }

    /// Price normalized to a per-gram basis
    pub fn unit_price(&self) -> f64 {
        self.price / (self.quantity * self.unit.grams())
    }

    /// Insert this ingredient, skipping silently if the name already exists
    ///
    /// Returns the new row id, or `None` when a row with the same name is
    /// already present (the duplicate submission is dropped, not an error).
    pub fn insert(&mut self, conn: &Connection) -> Result<Option<i64>> {
        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM ingredientes WHERE nombre = ?1",
            [&self.name],
            |row| row.get(0),
        )?;
        if exists > 0 {
            debug!("Ingredient '{}' already exists, skipping insert", self.name);
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO ingredientes (nombre, cantidad, kg_gr, precio)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                &self.name,
                self.quantity,
                self.unit.as_str(),
                self.unit_price(),
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(Some(id))
    }

    /// Update the row matching `id` with the provided fields
    ///
    /// Returns the number of rows changed (0 when `changes` is empty or no
    /// row matches).
    pub fn update(conn: &Connection, id: i64, changes: &IngredientChanges) -> Result<usize> {
        let mut sets: Vec<&str> = Vec::new();
        let mut values: Vec<Box<dyn ToSql>> = Vec::new();

        if let Some(name) = &changes.name {
            sets.push("nombre = ?");
            values.push(Box::new(name.clone()));
        }
        if let Some(quantity) = changes.quantity {
            sets.push("cantidad = ?");
            values.push(Box::new(quantity));
        }
        if let Some(unit) = changes.unit {
            sets.push("kg_gr = ?");
            values.push(Box::new(unit.as_str()));
        }
        if let Some(price) = changes.price {
            sets.push("precio = ?");
            values.push(Box::new(price));
        }

        if sets.is_empty() {
            return Ok(0);
        }
        sets.push("updated_at = CURRENT_TIMESTAMP");

        let sql = format!("UPDATE ingredientes SET {} WHERE id = ?", sets.join(", "));
        values.push(Box::new(id));

        let refs: Vec<&dyn ToSql> = values.iter().map(|v| v.as_ref()).collect();
        let changed = conn.execute(&sql, refs.as_slice())?;
        Ok(changed)
    }

    /// Find the ingredient matching both id and name
    pub fn find_by_id_and_name(conn: &Connection, id: i64, name: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, updated_at, nombre, cantidad, kg_gr, precio
             FROM ingredientes WHERE id = ?1 AND nombre = ?2",
        )?;

        let ingredient = stmt
            .query_row(params![id, name], Self::from_row)
            .optional()?;

        Ok(ingredient)
    }

    /// Find an ingredient by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, updated_at, nombre, cantidad, kg_gr, precio
             FROM ingredientes WHERE id = ?1",
        )?;

        let ingredient = stmt.query_row([id], Self::from_row).optional()?;

        Ok(ingredient)
    }

    /// Find an ingredient by name
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, updated_at, nombre, cantidad, kg_gr, precio
             FROM ingredientes WHERE nombre = ?1",
        )?;

        let ingredient = stmt.query_row([name], Self::from_row).optional()?;

        Ok(ingredient)
    }

    /// List all ingredients
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, updated_at, nombre, cantidad, kg_gr, precio
             FROM ingredientes ORDER BY nombre",
        )?;

        let ingredients = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(ingredients)
    }

    /// Delete the row matching both id and name
    ///
    /// Looks the row up first; if no row matches both values the delete
    /// is reported as a not-found error.
    pub fn delete(conn: &Connection, id: i64, name: &str) -> Result<()> {
        match Self::find_by_id_and_name(conn, id, name)? {
            Some(_) => {
                conn.execute("DELETE FROM ingredientes WHERE id = ?1", [id])?;
                Ok(())
            }
            None => Err(Error::NotFound {
                table: "ingredientes",
                id,
                name: name.to_string(),
            }),
        }
    }

    /// Convert a database row to an Ingredient
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let unit_str: String = row.get(5)?;
        let unit = unit_str.parse::<Unit>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                5,
                rusqlite::types::Type::Text,
                Box::new(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    e.to_string(),
                )),
            )
        })?;

        Ok(Self {
            id: Some(row.get(0)?),
            created_at: row.get(1)?,
            updated_at: row.get(2)?,
            name: row.get(3)?,
            quantity: row.get(4)?,
            unit,
            price: row.get(6)?,
        })
    }
}
