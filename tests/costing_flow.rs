// tests/costing_flow.rs

//! End-to-end costing flow: record ingredients, compose a recipe,
//! save quantities, and verify the stored packaged cost.

use recetario::db;
use recetario::db::models::{Ingredient, IngredientQuantity, Recipe, Unit};
use recetario::{PackagingCosts, QuantityBasket};
use tempfile::NamedTempFile;

fn open_test_db() -> (String, rusqlite::Connection) {
    let temp_file = NamedTempFile::new().unwrap();
    let db_path = temp_file.path().to_str().unwrap().to_string();
    drop(temp_file);

    db::init(&db_path).unwrap();
    let conn = db::open(&db_path).unwrap();
    (db_path, conn)
}

fn record_ingredient(
    conn: &rusqlite::Connection,
    name: &str,
    quantity: f64,
    unit: Unit,
    price: f64,
) -> Ingredient {
    let mut ing = Ingredient::new(name.to_string(), quantity, unit, price);
    ing.insert(conn).unwrap().unwrap();
    // Re-read so the price field carries the stored per-gram value
    Ingredient::find_by_name(conn, name).unwrap().unwrap()
}

#[test]
fn test_full_recipe_costing_flow() {
    let (db_path, conn) = open_test_db();
    let mut conn = conn;

    // Ingredients entered as purchased: 2 kg flour for 3.0, 1 kg sugar
    // for 1.5, 500 gr cocoa for 4.0
    let flour = record_ingredient(&conn, "harina", 2.0, Unit::Kg, 3.0);
    let sugar = record_ingredient(&conn, "azucar", 1.0, Unit::Kg, 1.5);
    let cocoa = record_ingredient(&conn, "cacao", 500.0, Unit::Gr, 4.0);

    assert!((flour.price - 0.0015).abs() < 1e-12);
    assert!((sugar.price - 0.0015).abs() < 1e-12);
    assert!((cocoa.price - 0.008).abs() < 1e-12);

    // A batch of 12 brownies sold in packages of 2, 30% markup
    let mut brownies = Recipe::new("brownies".to_string(), 30.0, 5.0, 12, 900.0, 2.0);
    let recipe_id = brownies.insert(&conn).unwrap().unwrap();

    // The cost is NULL until quantities are attached
    let stored = Recipe::find_by_name(&conn, "brownies").unwrap().unwrap();
    assert!(stored.cost.is_none());

    // Select quantities: 500 gr flour, 400 gr sugar, 100 gr cocoa
    let mut basket = QuantityBasket::new(recipe_id);
    basket.add(&flour, 500.0).unwrap(); // 0.75
    basket.add(&sugar, 400.0).unwrap(); // 0.60
    basket.add(&cocoa, 100.0).unwrap(); // 0.80
    assert!(basket.ready());

    let expected_raw = 0.75 + 0.60 + 0.80;
    assert!((basket.total_cost() - expected_raw).abs() < 1e-9);

    basket.save(&mut conn).unwrap();

    // Store-side totals agree with the in-memory basket
    let totals = brownies.total_cost(&conn).unwrap();
    assert!((totals.raw - expected_raw).abs() < 1e-9);
    assert!((totals.markup - expected_raw * 0.30).abs() < 1e-9);

    // Packaged cost: (raw / 12) * 2 + 0.01 + 0.03, plus 15%
    let packaged = brownies.packaged_cost(totals.raw, &PackagingCosts::default());
    let subtotal = expected_raw / 12.0 * 2.0 + 0.01 + 0.03;
    assert!((packaged - subtotal * 1.15).abs() < 1e-9);

    Recipe::update_cost(&conn, recipe_id, packaged).unwrap();
    let stored = Recipe::find_by_name(&conn, "brownies").unwrap().unwrap();
    assert!((stored.cost.unwrap() - packaged).abs() < 1e-9);

    // Reopening the database sees the same state
    drop(conn);
    let conn = db::open(&db_path).unwrap();
    let reread = Recipe::find_by_name(&conn, "brownies").unwrap().unwrap();
    assert!((reread.cost.unwrap() - packaged).abs() < 1e-9);
}

#[test]
fn test_resaving_quantities_supersedes_previous_ones() {
    let (_db_path, conn) = open_test_db();
    let mut conn = conn;

    let flour = record_ingredient(&conn, "harina", 1000.0, Unit::Gr, 2.0);
    let sugar = record_ingredient(&conn, "azucar", 1000.0, Unit::Gr, 1.5);
    let cocoa = record_ingredient(&conn, "cacao", 500.0, Unit::Gr, 4.0);

    let mut cake = Recipe::new("torta".to_string(), 40.0, 8.0, 8, 1000.0, 1.0);
    let recipe_id = cake.insert(&conn).unwrap().unwrap();

    let mut first = QuantityBasket::new(recipe_id);
    first.add(&flour, 500.0).unwrap();
    first.add(&sugar, 300.0).unwrap();
    first.add(&cocoa, 50.0).unwrap();
    first.save(&mut conn).unwrap();

    let mut second = QuantityBasket::new(recipe_id);
    second.add(&flour, 250.0).unwrap();
    second.add(&sugar, 150.0).unwrap();
    second.add(&cocoa, 25.0).unwrap();
    second.save(&mut conn).unwrap();

    // Current view: one row per ingredient, from the second save
    let current = IngredientQuantity::current_for_recipe(&conn, recipe_id).unwrap();
    assert_eq!(current.len(), 3);
    let total: f64 = current.iter().map(|row| row.cost).sum();
    assert!((total - second.total_cost()).abs() < 1e-9);

    // The first save's rows are still in the table
    let history = IngredientQuantity::history_for_recipe(&conn, recipe_id).unwrap();
    assert_eq!(history.len(), 6);

    // And the recipe total follows the current view only
    let totals = cake.total_cost(&conn).unwrap();
    assert!((totals.raw - second.total_cost()).abs() < 1e-9);
}

#[test]
fn test_deleting_ingredient_cascades_into_quantities() {
    let (_db_path, conn) = open_test_db();
    let mut conn = conn;

    let flour = record_ingredient(&conn, "harina", 1000.0, Unit::Gr, 2.0);
    let sugar = record_ingredient(&conn, "azucar", 1000.0, Unit::Gr, 1.5);
    let cocoa = record_ingredient(&conn, "cacao", 500.0, Unit::Gr, 4.0);

    let mut cake = Recipe::new("torta".to_string(), 40.0, 8.0, 8, 1000.0, 1.0);
    let recipe_id = cake.insert(&conn).unwrap().unwrap();

    let mut basket = QuantityBasket::new(recipe_id);
    basket.add(&flour, 500.0).unwrap();
    basket.add(&sugar, 300.0).unwrap();
    basket.add(&cocoa, 50.0).unwrap();
    basket.save(&mut conn).unwrap();

    Ingredient::delete(&conn, flour.id.unwrap(), "harina").unwrap();

    let current = IngredientQuantity::current_for_recipe(&conn, recipe_id).unwrap();
    assert_eq!(current.len(), 2);
    assert!(current.iter().all(|row| row.ingredient_id != flour.id.unwrap()));
}
