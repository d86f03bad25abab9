// src/db/models/recipe.rs

//! Recipe model - recipes with markup and packaging parameters

use rusqlite::{Connection, OptionalExtension, Row, params};
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

/// A Recipe produces a batch of units sold in packages
///
/// `cost` (the stored packaged cost) is `None` until ingredient
/// quantities have been attached and the cost explicitly computed.
#[derive(Debug, Clone, Serialize)]
pub struct Recipe {
    pub id: Option<i64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub name: String,
    /// Sale markup percentage (porcentaje_venta)
    pub markup_percent: f64,
    pub sale_price: f64,
    /// Units produced per batch (unidades_x_receta)
    pub units_per_batch: i64,
    /// Total quantity produced per batch (cantidad_Receta)
    pub batch_quantity: f64,
    /// Units sold per package (cant_x_paquete)
    pub units_per_package: f64,
    /// Stored packaged cost (costo_receta), NULL until computed
    pub cost: Option<f64>,
}

impl Recipe {
    /// Create a new Recipe from user-entered values
    pub fn new(
        name: String,
        markup_percent: f64,
        sale_price: f64,
        units_per_batch: i64,
        batch_quantity: f64,
        units_per_package: f64,
    ) -> Self {
        Self {
            id: None,
            created_at: None,
            updated_at: None,
            name,
            markup_percent,
            sale_price,
            units_per_batch,
            batch_quantity,
            units_per_package,
            cost: None,
        }
    }

    /// Insert this recipe, skipping silently if the name already exists
    ///
    /// Returns the new row id, or `None` when a recipe with the same name
    /// is already present.
    pub fn insert(&mut self, conn: &Connection) -> Result<Option<i64>> {
        let exists: i64 = conn.query_row(
            "SELECT COUNT(*) FROM receta WHERE nombre = ?1",
            [&self.name],
            |row| row.get(0),
        )?;
        if exists > 0 {
            debug!("Recipe '{}' already exists, skipping insert", self.name);
            return Ok(None);
        }

        conn.execute(
            "INSERT INTO receta (nombre, porcentaje_venta, precio_venta, unidades_x_receta,
                                 cantidad_Receta, cant_x_paquete, costo_receta)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                &self.name,
                self.markup_percent,
                self.sale_price,
                self.units_per_batch,
                self.batch_quantity,
                self.units_per_package,
                self.cost,
            ],
        )?;

        let id = conn.last_insert_rowid();
        self.id = Some(id);
        Ok(Some(id))
    }

    /// Write the computed packaged cost for the row matching `id`
    ///
    /// This is the only column a recipe update ever touches.
    pub fn update_cost(conn: &Connection, id: i64, cost: f64) -> Result<usize> {
        let changed = conn.execute(
            "UPDATE receta SET costo_receta = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
            params![cost, id],
        )?;
        Ok(changed)
    }

    /// Find a recipe by name
    pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, updated_at, nombre, porcentaje_venta, precio_venta,
                    unidades_x_receta, cantidad_Receta, cant_x_paquete, costo_receta
             FROM receta WHERE nombre = ?1",
        )?;

        let recipe = stmt.query_row([name], Self::from_row).optional()?;

        Ok(recipe)
    }

    /// Find a recipe by ID
    pub fn find_by_id(conn: &Connection, id: i64) -> Result<Option<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, updated_at, nombre, porcentaje_venta, precio_venta,
                    unidades_x_receta, cantidad_Receta, cant_x_paquete, costo_receta
             FROM receta WHERE id = ?1",
        )?;

        let recipe = stmt.query_row([id], Self::from_row).optional()?;

        Ok(recipe)
    }

    /// List all recipes
    pub fn list_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt = conn.prepare(
            "SELECT id, created_at, updated_at, nombre, porcentaje_venta, precio_venta,
                    unidades_x_receta, cantidad_Receta, cant_x_paquete, costo_receta
             FROM receta ORDER BY nombre",
        )?;

        let recipes = stmt
            .query_map([], Self::from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(recipes)
    }

    /// Delete the row matching both id and name
    pub fn delete(conn: &Connection, id: i64, name: &str) -> Result<()> {
        let found: Option<i64> = conn
            .query_row(
                "SELECT id FROM receta WHERE id = ?1 AND nombre = ?2",
                params![id, name],
                |row| row.get(0),
            )
            .optional()?;

        match found {
            Some(_) => {
                conn.execute("DELETE FROM receta WHERE id = ?1", [id])?;
                Ok(())
            }
            None => Err(Error::NotFound {
                table: "receta",
                id,
                name: name.to_string(),
            }),
        }
    }

    /// Convert a database row to a Recipe
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            created_at: row.get(1)?,
            updated_at: row.get(2)?,
            name: row.get(3)?,
            markup_percent: row.get(4)?,
            sale_price: row.get(5)?,
            units_per_batch: row.get(6)?,
            batch_quantity: row.get(7)?,
            units_per_package: row.get(8)?,
            cost: row.get(9)?,
        })
    }
}
