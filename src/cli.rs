// src/cli.rs

//! CLI definitions for recetario
//!
//! This module contains all command-line interface definitions using
//! clap. The actual command implementations are in the `commands`
//! module.

use clap::{Parser, Subcommand};
use recetario::costing;

#[derive(Parser)]
#[command(name = "recetario")]
#[command(version)]
#[command(about = "Ingredient and recipe costing for a small food business", long_about = None)]
pub struct Cli {
    /// Path to the database file (overrides RECETARIO_DB)
    #[arg(short = 'd', long, global = true)]
    pub db_path: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the recetario database
    Init,

    /// Manage ingredients
    Ingredient {
        #[command(subcommand)]
        command: IngredientCommands,
    },

    /// Manage recipes
    Recipe {
        #[command(subcommand)]
        command: RecipeCommands,
    },

    /// Manage ingredient quantities per recipe
    Quantities {
        #[command(subcommand)]
        command: QuantityCommands,
    },
}

#[derive(Subcommand)]
pub enum IngredientCommands {
    /// Record a new ingredient
    Add {
        /// Ingredient name (must not already exist)
        name: String,

        /// Quantity purchased
        quantity: f64,

        /// Purchase unit: kg or gr
        unit: String,

        /// Price paid for that quantity
        price: f64,
    },

    /// List all ingredients
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Update fields of an ingredient
    Update {
        /// Ingredient id
        id: i64,

        /// New name
        #[arg(long)]
        name: Option<String>,

        /// New quantity
        #[arg(long)]
        quantity: Option<f64>,

        /// New unit: kg or gr
        #[arg(long)]
        unit: Option<String>,

        /// New price
        #[arg(long)]
        price: Option<f64>,
    },

    /// Remove an ingredient (id and name must both match)
    Remove {
        /// Ingredient id
        id: i64,

        /// Ingredient name
        name: String,
    },
}

#[derive(Subcommand)]
pub enum RecipeCommands {
    /// Record a new recipe
    Add {
        /// Recipe name (must not already exist)
        name: String,

        /// Sale markup percentage
        #[arg(long)]
        markup: f64,

        /// Sale price per unit
        #[arg(long)]
        sale_price: f64,

        /// Units produced per batch
        #[arg(long)]
        units: i64,

        /// Total quantity produced per batch
        #[arg(long)]
        batch_quantity: f64,

        /// Units sold per package
        #[arg(long)]
        per_package: f64,
    },

    /// List all recipes
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove a recipe (id and name must both match)
    Remove {
        /// Recipe id
        id: i64,

        /// Recipe name
        name: String,
    },

    /// Compute and store the packaged cost of a recipe
    Cost {
        /// Recipe name
        name: String,

        /// Sticker cost per package
        #[arg(long, default_value_t = costing::DEFAULT_STICKER_COST)]
        sticker: f64,

        /// Packaging material cost per package
        #[arg(long, default_value_t = costing::DEFAULT_PACKAGING_COST)]
        packaging: f64,

        /// Show the computation without storing the cost
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Subcommand)]
pub enum QuantityCommands {
    /// Save the ingredient quantities for a recipe and recompute its cost
    Set {
        /// Recipe name
        recipe: String,

        /// ingredient=quantity pairs (at least 3 distinct ingredients)
        #[arg(required = true, num_args = 1..)]
        pairs: Vec<String>,
    },

    /// Show the current ingredient quantities for a recipe
    Show {
        /// Recipe name
        recipe: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
