use anyhow::{bail, Context, Result};
use barmenu::loader::{load_catalog, load_recipe_book};
use barmenu::menu::{render_menu, DisplayOptions};
use barmenu::observability::init_logging;
use barmenu::{filter_recipes, EngineConfig, FilterOptions, SharedCatalog};
use chrono::Local;
use log::{info, warn};
use std::env;

const USAGE: &str = "usage: barmenu <stock.json> <recipes.json> [more_recipes.json ...]";

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = EngineConfig::from_env().context("Invalid BARMENU_* configuration")?;
    init_logging(config.log_format);

    info!("Starting barmenu");

    let args: Vec<String> = env::args().skip(1).collect();
    if args.len() < 2 {
        bail!(USAGE);
    }

    let catalog = load_catalog(&args[0], config.include_all_stock)?
        .with_rules(config.resolution_rules());
    let shared = SharedCatalog::new(catalog);
    let mut recipes = load_recipe_book(&args[1..])?;

    // one snapshot for the whole menu so every recipe sees the same stock
    let snapshot = shared.snapshot();
    for missing in snapshot.missing_any_spirit_types() {
        warn!("'any spirit' type '{}' has no stock rows", missing);
    }
    for recipe in recipes.iter_mut() {
        let name = recipe.name.clone();
        recipe
            .prepare_for_display(&snapshot, &config)
            .with_context(|| format!("Failed to expand {}", name))?;
    }

    let options = DisplayOptions {
        markup: config.markup,
        stats: true,
        examples: true,
        ..Default::default()
    };
    let (makeable, excluded) = filter_recipes(&recipes, &FilterOptions::default(), false);
    info!(
        "{} recipes can be made, {} cannot",
        makeable.len(),
        excluded.len()
    );

    print!(
        "{}",
        render_menu(&makeable, "Bar Menu", Local::now().date_naive(), &options)
    );
    Ok(())
}
