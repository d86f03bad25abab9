// src/commands.rs

//! Command handlers for the recetario CLI

use anyhow::{Result, bail};
use tracing::info;

use recetario::costing::{MIN_INGREDIENTS, PackagingCosts};
use recetario::db::models::{Ingredient, IngredientChanges, IngredientQuantity, Recipe, Unit};
use recetario::{QuantityBasket, db};

/// Initialize the database, creating parent directories as needed
pub fn cmd_init(db_path: &str) -> Result<()> {
    info!("Initializing recetario database at: {}", db_path);
    db::init(db_path)?;
    println!("Database initialized at: {}", db_path);
    Ok(())
}

/// Record a new ingredient
pub fn cmd_ingredient_add(
    db_path: &str,
    name: &str,
    quantity: f64,
    unit: &str,
    price: f64,
) -> Result<()> {
    let unit: Unit = unit.parse()?;
    let conn = db::open(db_path)?;

    let mut ingredient = Ingredient::new(name.to_string(), quantity, unit, price);
    match ingredient.insert(&conn)? {
        Some(id) => {
            println!(
                "Recorded ingredient '{}' (id {}): {} {} for {:.2}, {:.6}/gr",
                name,
                id,
                quantity,
                unit.as_str(),
                price,
                ingredient.unit_price()
            );
        }
        None => {
            println!("Ingredient '{}' already exists; nothing inserted.", name);
        }
    }
    Ok(())
}

/// List all ingredients
pub fn cmd_ingredient_list(db_path: &str, json: bool) -> Result<()> {
    let conn = db::open(db_path)?;
    let ingredients = Ingredient::list_all(&conn)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ingredients)?);
        return Ok(());
    }

    if ingredients.is_empty() {
        println!("No ingredients recorded.");
        return Ok(());
    }

    println!(
        "{:<5} {:<24} {:>10} {:<4} {:>12}",
        "ID", "NAME", "QUANTITY", "UNIT", "PRICE/GR"
    );
    for ing in &ingredients {
        println!(
            "{:<5} {:<24} {:>10} {:<4} {:>12.6}",
            ing.id.unwrap_or(0),
            ing.name,
            ing.quantity,
            ing.unit.as_str(),
            ing.price
        );
    }
    Ok(())
}

/// Update fields of an ingredient
pub fn cmd_ingredient_update(
    db_path: &str,
    id: i64,
    name: Option<String>,
    quantity: Option<f64>,
    unit: Option<String>,
    price: Option<f64>,
) -> Result<()> {
    let unit = match unit {
        Some(u) => Some(u.parse::<Unit>()?),
        None => None,
    };

    let changes = IngredientChanges {
        name,
        quantity,
        unit,
        price,
    };
    if changes.name.is_none()
        && changes.quantity.is_none()
        && changes.unit.is_none()
        && changes.price.is_none()
    {
        bail!("nothing to update: pass at least one of --name, --quantity, --unit, --price");
    }

    let conn = db::open(db_path)?;
    let changed = Ingredient::update(&conn, id, &changes)?;
    if changed == 0 {
        bail!("no ingredient with id {}", id);
    }

    println!("Updated ingredient {}.", id);
    Ok(())
}

/// Remove an ingredient by id and name
pub fn cmd_ingredient_remove(db_path: &str, id: i64, name: &str) -> Result<()> {
    let conn = db::open(db_path)?;
    Ingredient::delete(&conn, id, name)?;
    println!("Removed ingredient '{}' (id {}).", name, id);
    Ok(())
}

/// Record a new recipe
#[allow(clippy::too_many_arguments)]
pub fn cmd_recipe_add(
    db_path: &str,
    name: &str,
    markup: f64,
    sale_price: f64,
    units: i64,
    batch_quantity: f64,
    per_package: f64,
) -> Result<()> {
    let conn = db::open(db_path)?;

    let mut recipe = Recipe::new(
        name.to_string(),
        markup,
        sale_price,
        units,
        batch_quantity,
        per_package,
    );
    match recipe.insert(&conn)? {
        Some(id) => println!("Recorded recipe '{}' (id {}).", name, id),
        None => println!("Recipe '{}' already exists; nothing inserted.", name),
    }
    Ok(())
}

/// List all recipes
pub fn cmd_recipe_list(db_path: &str, json: bool) -> Result<()> {
    let conn = db::open(db_path)?;
    let recipes = Recipe::list_all(&conn)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&recipes)?);
        return Ok(());
    }

    if recipes.is_empty() {
        println!("No recipes recorded.");
        return Ok(());
    }

    println!(
        "{:<5} {:<24} {:>8} {:>10} {:>7} {:>12} {:>12}",
        "ID", "NAME", "MARKUP%", "SALE", "UNITS", "PER-PACKAGE", "COST"
    );
    for recipe in &recipes {
        let cost = recipe
            .cost
            .map(|c| format!("{:.3}", c))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<5} {:<24} {:>8} {:>10.2} {:>7} {:>12} {:>12}",
            recipe.id.unwrap_or(0),
            recipe.name,
            recipe.markup_percent,
            recipe.sale_price,
            recipe.units_per_batch,
            recipe.units_per_package,
            cost
        );
    }
    Ok(())
}

/// Remove a recipe by id and name
pub fn cmd_recipe_remove(db_path: &str, id: i64, name: &str) -> Result<()> {
    let conn = db::open(db_path)?;
    Recipe::delete(&conn, id, name)?;
    println!("Removed recipe '{}' (id {}).", name, id);
    Ok(())
}

/// Compute the raw, markup, and packaged costs for a recipe, storing the
/// packaged cost unless --dry-run is given
pub fn cmd_recipe_cost(
    db_path: &str,
    name: &str,
    sticker: f64,
    packaging: f64,
    dry_run: bool,
) -> Result<()> {
    let conn = db::open(db_path)?;

    let recipe = match Recipe::find_by_name(&conn, name)? {
        Some(recipe) => recipe,
        None => bail!("no recipe named '{}'", name),
    };
    let recipe_id = recipe
        .id
        .ok_or_else(|| anyhow::anyhow!("stored recipe '{}' has no id", name))?;

    let totals = recipe.total_cost(&conn)?;
    let packaged = recipe.packaged_cost(
        totals.raw,
        &PackagingCosts {
            sticker,
            material: packaging,
        },
    );

    println!("Recipe '{}':", name);
    println!("  Raw batch cost:      {:.4}", totals.raw);
    println!(
        "  Markup ({}%):        {:.4}",
        recipe.markup_percent, totals.markup
    );
    println!("  Suggested package:   {:.4}", packaged);

    if dry_run {
        println!("Dry run: cost not stored.");
    } else {
        Recipe::update_cost(&conn, recipe_id, packaged)?;
        println!("Stored packaged cost for '{}'.", name);
    }
    Ok(())
}

/// Save ingredient quantities for a recipe and recompute its stored cost
pub fn cmd_quantities_set(db_path: &str, recipe_name: &str, pairs: &[String]) -> Result<()> {
    let mut conn = db::open(db_path)?;

    let recipe = match Recipe::find_by_name(&conn, recipe_name)? {
        Some(recipe) => recipe,
        None => bail!("no recipe named '{}'", recipe_name),
    };
    let recipe_id = recipe
        .id
        .ok_or_else(|| anyhow::anyhow!("stored recipe '{}' has no id", recipe_name))?;

    let mut basket = QuantityBasket::new(recipe_id);
    for pair in pairs {
        let Some((name, quantity)) = pair.split_once('=') else {
            bail!("invalid pair '{}': expected ingredient=quantity", pair);
        };
        let quantity: f64 = quantity
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid quantity in '{}'", pair))?;

        let ingredient = match Ingredient::find_by_name(&conn, name)? {
            Some(ingredient) => ingredient,
            None => bail!("no ingredient named '{}'", name),
        };
        basket.add(&ingredient, quantity)?;
    }

    if !basket.ready() {
        bail!(
            "at least {} distinct ingredients are required, got {}",
            MIN_INGREDIENTS,
            basket.len()
        );
    }

    let written = basket.save(&mut conn)?;
    info!(
        "Saved {} quantity rows for recipe '{}'",
        written, recipe_name
    );

    // Mirror the save flow of the original form: recompute the recipe's
    // packaged cost from the freshly current rows and store it.
    let totals = recipe.total_cost(&conn)?;
    let packaged = recipe.packaged_cost(totals.raw, &PackagingCosts::default());
    Recipe::update_cost(&conn, recipe_id, packaged)?;

    println!(
        "Saved {} ingredient quantities for '{}' (raw cost {:.4}, packaged cost {:.4} stored).",
        written, recipe_name, totals.raw, packaged
    );
    Ok(())
}

/// Show the current ingredient quantities for a recipe
pub fn cmd_quantities_show(db_path: &str, recipe_name: &str, json: bool) -> Result<()> {
    let conn = db::open(db_path)?;

    let recipe = match Recipe::find_by_name(&conn, recipe_name)? {
        Some(recipe) => recipe,
        None => bail!("no recipe named '{}'", recipe_name),
    };
    let recipe_id = recipe
        .id
        .ok_or_else(|| anyhow::anyhow!("stored recipe '{}' has no id", recipe_name))?;

    let rows = IngredientQuantity::current_for_recipe(&conn, recipe_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No quantities recorded for '{}'.", recipe_name);
        return Ok(());
    }

    println!(
        "{:<5} {:<24} {:>10} {:>12}",
        "ID", "INGREDIENT", "QUANTITY", "LINE COST"
    );
    let mut total = 0.0;
    for row in &rows {
        let name = Ingredient::find_by_id(&conn, row.ingredient_id)?
            .map(|ing| ing.name)
            .unwrap_or_else(|| format!("#{}", row.ingredient_id));
        println!(
            "{:<5} {:<24} {:>10} {:>12.4}",
            row.id.unwrap_or(0),
            name,
            row.quantity,
            row.cost
        );
        total += row.cost;
    }
    println!("Total raw cost: {:.4}", total);
    Ok(())
}
