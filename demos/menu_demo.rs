//! Build a small menu from inline stock and recipes.
//!
//! Run with `cargo run --example menu_demo`; set `RUST_LOG=debug` to watch
//! catalog resolution and expansion.

use anyhow::Result;
use barmenu::loader::parse_catalog;
use barmenu::menu::{render_liquor_list, render_menu, DisplayOptions};
use barmenu::observability::init_logging;
use barmenu::recipe::OrderedEntries;
use barmenu::{expand, stats, EngineConfig, Recipe, RecipeTemplate, SharedCatalog, Unit};
use chrono::Local;

const STOCK: &str = r#"[
    {"category": "Spirit", "type": "Dry Gin", "product": "Beefeater", "abv_percent": 44, "size_ml": 750, "price_paid": 22.0},
    {"category": "Spirit", "type": "Dry Gin", "product": "Tanqueray", "abv_percent": 47.3, "size_ml": 750, "price_paid": 26.0},
    {"category": "Spirit", "type": "Rye Whiskey", "product": "Bulleit Rye", "abv_percent": 45, "size_ml": 750, "price_paid": 28.96},
    {"category": "Spirit", "type": "White Rum", "product": "Plantation 3 Stars", "abv_percent": 41.2, "size_ml": 750, "price_paid": 21.0, "in_stock": false},
    {"category": "Vermouth", "type": "Sweet Vermouth", "product": "Carpano Antica", "abv_percent": 16.5, "size_ml": 1000, "price_paid": 32.0},
    {"category": "Vermouth", "type": "Dry Vermouth", "product": "Dolin Dry", "abv_percent": 17.5, "size_ml": 750, "price_paid": 13.0},
    {"category": "Bitters", "type": "Aromatic Bitters", "product": "Angostura", "abv_percent": 44.7, "size_ml": 118, "price_paid": 7.95},
    {"category": "Juice", "type": "Lime Juice", "product": "Fresh", "size_ml": 30, "price_paid": 0.5},
    {"category": "Syrup", "type": "Simple Syrup", "product": "House", "size_ml": 1000, "price_paid": 2.0}
]"#;

const RECIPES: &str = r#"{
    "Martini": {
        "info": "The King of Cocktails",
        "ingredients": {"dry gin": 2.5, "dry vermouth": 0.5},
        "optional": {"orange bitters": "dash"},
        "prep": "stir", "ice": "neat", "glass": "martini",
        "garnish": "Lemon twist or olives"
    },
    "Manhattan": {
        "ingredients": {"whiskey": 2, "sweet vermouth": 1, "aromatic bitters": "2 dashes"},
        "prep": "stir", "ice": "neat", "glass": "coupe",
        "garnish": "Brandied cherry"
    },
    "Gimlet": {
        "origin": "House original",
        "ingredients": {"dry gin": 2, "lime juice": [0.75, 1], "simple syrup": 0.75},
        "garnish": "Lime wheel"
    },
    "Daiquiri": {
        "ingredients": {"white rum": 2, "lime juice": 1, "simple syrup": 0.75},
        "glass": "coupe"
    }
}"#;

fn main() -> Result<()> {
    let config = EngineConfig::default();
    init_logging(config.log_format);

    let shared = SharedCatalog::new(parse_catalog(STOCK)?);
    let book: OrderedEntries<RecipeTemplate> = serde_json::from_str(RECIPES)?;

    let snapshot = shared.snapshot();
    let mut recipes = Vec::new();
    for (name, template) in book {
        let mut recipe = Recipe::from_template(&name, &template)?;
        recipe.apply(expand(&recipe, &snapshot)?);
        recipes.push(recipe);
    }

    for recipe in &recipes {
        match stats(recipe) {
            Some(s) => println!(
                "{:<10} {} examples, ${:.2}-${:.2}, avg {:.1}% ABV",
                recipe.name, s.example_count, s.min_cost.cost, s.max_cost.cost, s.avg_abv
            ),
            None => println!("{:<10} cannot be made", recipe.name),
        }
    }
    println!();

    let options = DisplayOptions {
        examples: true,
        stats: true,
        markup: config.markup,
        ..Default::default()
    };
    let makeable: Vec<Recipe> = recipes.iter().filter(|r| r.can_make()).cloned().collect();
    print!("{}", render_menu(&makeable, "@Home Bar", Local::now().date_naive(), &options));
    println!();
    print!("{}", render_liquor_list(snapshot.items()));

    // restocking the rum shows up in the next snapshot only
    shared.set_in_stock("White Rum", "Plantation 3 Stars", true);
    let mut daiquiri = recipes
        .into_iter()
        .find(|r| r.name == "Daiquiri")
        .ok_or_else(|| anyhow::anyhow!("Daiquiri missing from the demo book"))?;
    daiquiri.refresh_examples(&shared.snapshot())?;
    daiquiri.convert(Unit::Ml, true, false)?;
    println!();
    print!("{}", daiquiri);

    Ok(())
}
