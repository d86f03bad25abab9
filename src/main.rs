// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands, IngredientCommands, QuantityCommands, RecipeCommands};
use recetario::config;

fn main() -> Result<()> {
    // .env is optional; the environment itself wins on conflicts
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let db_path = config::resolve_db_path(cli.db_path.as_deref());
    let db_path = db_path.to_string_lossy().to_string();

    match cli.command {
        Some(Commands::Init) => commands::cmd_init(&db_path),
        Some(Commands::Ingredient { command }) => match command {
            IngredientCommands::Add {
                name,
                quantity,
                unit,
                price,
            } => commands::cmd_ingredient_add(&db_path, &name, quantity, &unit, price),
            IngredientCommands::List { json } => commands::cmd_ingredient_list(&db_path, json),
            IngredientCommands::Update {
                id,
                name,
                quantity,
                unit,
                price,
            } => commands::cmd_ingredient_update(&db_path, id, name, quantity, unit, price),
            IngredientCommands::Remove { id, name } => {
                commands::cmd_ingredient_remove(&db_path, id, &name)
            }
        },
        Some(Commands::Recipe { command }) => match command {
            RecipeCommands::Add {
                name,
                markup,
                sale_price,
                units,
                batch_quantity,
                per_package,
            } => commands::cmd_recipe_add(
                &db_path,
                &name,
                markup,
                sale_price,
                units,
                batch_quantity,
                per_package,
            ),
            RecipeCommands::List { json } => commands::cmd_recipe_list(&db_path, json),
            RecipeCommands::Remove { id, name } => {
                commands::cmd_recipe_remove(&db_path, id, &name)
            }
            RecipeCommands::Cost {
                name,
                sticker,
                packaging,
                dry_run,
            } => commands::cmd_recipe_cost(&db_path, &name, sticker, packaging, dry_run),
        },
        Some(Commands::Quantities { command }) => match command {
            QuantityCommands::Set { recipe, pairs } => {
                commands::cmd_quantities_set(&db_path, &recipe, &pairs)
            }
            QuantityCommands::Show { recipe, json } => {
                commands::cmd_quantities_show(&db_path, &recipe, json)
            }
        },
        None => {
            println!("recetario v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'recetario --help' for usage information");
            Ok(())
        }
    }
}
