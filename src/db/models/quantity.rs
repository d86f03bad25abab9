// src/db/models/quantity.rs

//! Ingredient quantity model - append-only junction between ingredients
//! and recipes
//!
//! Rows are never updated in place. Re-saving a recipe's ingredient list
//! inserts fresh rows, and the ranked read returns only the most recent
//! row per ingredient. Superseded rows persist until the parent
//! ingredient or recipe is deleted (cascade).

use rusqlite::{Connection, Row, params};
use serde::Serialize;

use crate::error::Result;

/// One ingredient amount used by a recipe
///
/// `cost` is the line cost: the ingredient's per-gram price times the
/// quantity used.
#[derive(Debug, Clone, Serialize)]
pub struct IngredientQuantity {
    pub id: Option<i64>,
    pub created_at: Option<String>,
    pub ingredient_id: i64,
    pub recipe_id: i64,
    pub quantity: f64,
    pub cost: f64,
}

impl IngredientQuantity {
    /// Create a new quantity row
    pub fn new(ingredient_id: i64, recipe_id: i64, quantity: f64, cost: f64) -> Self {
        Self {
            id: None,
            created_at: None,
            ingredient_id,
            recipe_id,
            quantity,
            cost,
        }
    }

    /// Insert this quantity row (no uniqueness check; duplicates supersede)
    pub fn insert(&mut self, conn: &Connection) -> Result<i64> {
        conn.execute(
            "INSERT INTO cant_ing (id_ingrediente, id_receta, cantidad, precio)
             VALUES (?1, ?2, ?3, ?4)",
            params![self.ingredient_id, self.recipe_id, self.quantity, self.cost],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(id)
    }

    /// The current (most recently created) row per ingredient for a recipe
    ///
    /// Partitions the junction table by ingredient, orders by creation
    /// time descending, and keeps the top row of each partition. Row id
    /// breaks ties between rows created within the same second.
    pub fn current_for_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "WITH ranked AS (
                SELECT id, created_at, id_ingrediente, id_receta, cantidad, precio,
                       ROW_NUMBER() OVER (
                           PARTITION BY id_ingrediente
                           ORDER BY created_at DESC, id DESC
                       ) AS rn
                FROM cant_ing
                WHERE id_receta = ?1
            )
            SELECT id, created_at, id_ingrediente, id_receta, cantidad, precio
            FROM ranked WHERE rn = 1
            ORDER BY id_ingrediente",
        )?;

        let rows = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// All rows for a recipe, superseded ones included (audit view)
    pub fn history_for_recipe(conn: &Connection, recipe_id: i64) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, id_ingrediente, id_receta, cantidad, precio
             FROM cant_ing WHERE id_receta = ?1 ORDER BY created_at, id",
        )?;

        let rows = stmt
            .query_map([recipe_id], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(rows)
    }

    /// Convert a database row to an IngredientQuantity
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            created_at: row.get(1)?,
            ingredient_id: row.get(2)?,
            recipe_id: row.get(3)?,
            quantity: row.get(4)?,
            cost: row.get(5)?,
        })
    }
}
