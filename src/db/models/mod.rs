// src/db/models/mod.rs

//! Data models for recetario database entities
//!
//! Rust structs corresponding to the database tables, with methods for
//! creating, reading, updating, and deleting records.

mod ingredient;
mod quantity;
mod recipe;

pub use ingredient::{Ingredient, IngredientChanges, Unit};
pub use quantity::IngredientQuantity;
pub use recipe::Recipe;
