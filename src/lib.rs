// src/lib.rs

//! Recetario
//!
//! Ingredient and recipe costing for a small food business. Records
//! ingredients (name, quantity, unit, price), composes recipes from
//! ingredient quantities, and computes per-package costs and suggested
//! sale prices with a markup percentage.
//!
//! # Architecture
//!
//! - Database-first: all state lives in SQLite, one injected connection
//! - Entity models: typed structs with insert/find/delete over the schema
//! - Append-only quantities: ingredient amounts per recipe are never
//!   updated in place; a new row supersedes the old one and a ranked
//!   read selects the current row per ingredient
//! - Costing: per-gram unit prices, raw recipe totals, markup and
//!   packaged-cost arithmetic

pub mod config;
pub mod costing;
pub mod db;
mod error;

pub use costing::{MIN_INGREDIENTS, PackagingCosts, QuantityBasket, RecipeCost};
pub use db::models::{Ingredient, IngredientChanges, IngredientQuantity, Recipe, Unit};
pub use error::{Error, Result};
