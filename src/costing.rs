// src/costing.rs

//! Cost arithmetic: recipe totals, markup, and packaged-cost computation
//!
//! All money values are plain f64 in the business's currency. The raw
//! recipe cost is the sum of current quantity-line costs; the packaged
//! cost scales that to one package and adds fixed packaging overhead
//! plus a percentage surcharge.

use rusqlite::Connection;
use tracing::debug;

use crate::db;
use crate::db::models::{Ingredient, IngredientQuantity, Recipe};
use crate::error::{Error, Result};

/// Default cost of the label sticker on one package
pub const DEFAULT_STICKER_COST: f64 = 0.03;

/// Default cost of the packaging material for one package
pub const DEFAULT_PACKAGING_COST: f64 = 0.01;

/// Surcharge applied on top of the packaged subtotal
pub const PACKAGE_OVERHEAD_PERCENT: f64 = 15.0;

/// Minimum distinct ingredient selections before a recipe's quantity
/// list may be saved (interface-layer rule, not a data constraint)
pub const MIN_INGREDIENTS: usize = 3;

/// Fixed per-package overhead costs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PackagingCosts {
    pub sticker: f64,
    pub material: f64,
}

impl Default for PackagingCosts {
    fn default() -> Self {
        Self {
            sticker: DEFAULT_STICKER_COST,
            material: DEFAULT_PACKAGING_COST,
        }
    }
}

/// Raw recipe cost together with the markup amount derived from it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeCost {
    /// Sum of current quantity-line costs
    pub raw: f64,
    /// `markup_percent / 100 × raw`
    pub markup: f64,
}

impl Recipe {
    /// Raw cost of one batch plus the markup amount
    ///
    /// Looks the recipe up by name, reads the current quantity rows
    /// (most recent per ingredient), and sums their line costs.
    pub fn total_cost(&self, conn: &Connection) -> Result<RecipeCost> {
        let stored = Recipe::find_by_name(conn, &self.name)?.ok_or_else(|| Error::NotFound {
            table: "receta",
            id: self.id.unwrap_or(0),
            name: self.name.clone(),
        })?;
        let recipe_id = stored
            .id
            .ok_or_else(|| Error::InvalidRecord(format!("recipe '{}' has no id", self.name)))?;

        let rows = IngredientQuantity::current_for_recipe(conn, recipe_id)?;
        let raw: f64 = rows.iter().map(|row| row.cost).sum();
        let markup = self.markup_percent / 100.0 * raw;

        debug!(
            "Recipe '{}': raw cost {:.4} over {} lines, markup {:.4}",
            self.name,
            raw,
            rows.len(),
            markup
        );
        Ok(RecipeCost { raw, markup })
    }

    /// Suggested cost of one package
    ///
    /// Scales the raw batch cost to a single unit, multiplies by the
    /// units in a package, adds sticker and packaging material, then a
    /// further 15% on the packaged subtotal.
    pub fn packaged_cost(&self, raw_cost: f64, packaging: &PackagingCosts) -> f64 {
        let unit_cost = raw_cost / self.units_per_batch as f64;
        let package = unit_cost * self.units_per_package + packaging.material + packaging.sticker;
        package + package * PACKAGE_OVERHEAD_PERCENT / 100.0
    }
}

/// In-memory list of quantity lines for one recipe, built from the
/// user's (ingredient, quantity) selections before anything is persisted
#[derive(Debug)]
pub struct QuantityBasket {
    recipe_id: i64,
    lines: Vec<IngredientQuantity>,
}

impl QuantityBasket {
    /// Create an empty basket for a recipe
    pub fn new(recipe_id: i64) -> Self {
        Self {
            recipe_id,
            lines: Vec::new(),
        }
    }

    /// Add a quantity line for a stored ingredient
    ///
    /// The line cost is the ingredient's stored per-gram price times the
    /// quantity. Selecting the same ingredient again replaces the
    /// earlier line, so lines stay distinct per ingredient.
    pub fn add(&mut self, ingredient: &Ingredient, quantity: f64) -> Result<()> {
        let ingredient_id = ingredient.id.ok_or_else(|| {
            Error::InvalidRecord(format!("ingredient '{}' has no id", ingredient.name))
        })?;

        let cost = ingredient.price * quantity;
        let line = IngredientQuantity::new(ingredient_id, self.recipe_id, quantity, cost);

        match self
            .lines
            .iter_mut()
            .find(|l| l.ingredient_id == ingredient_id)
        {
            Some(existing) => *existing = line,
            None => self.lines.push(line),
        }
        Ok(())
    }

    /// Number of distinct ingredient selections
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether enough distinct ingredients are selected to save
    pub fn ready(&self) -> bool {
        self.lines.len() >= MIN_INGREDIENTS
    }

    /// Total of the in-memory line costs (available before saving)
    pub fn total_cost(&self) -> f64 {
        self.lines.iter().map(|line| line.cost).sum()
    }

    /// Lines built so far
    pub fn lines(&self) -> &[IngredientQuantity] {
        &self.lines
    }

    /// Bulk-insert all lines inside one transaction
    ///
    /// Returns the number of rows written.
    pub fn save(&self, conn: &mut Connection) -> Result<usize> {
        db::transaction(conn, |tx| {
            for line in &self.lines {
                let mut row = line.clone();
                row.insert(tx)?;
            }
            Ok(self.lines.len())
        })
    }
}
