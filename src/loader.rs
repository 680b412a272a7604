//! # Loader Module
//!
//! Reads stock and recipe book JSON files from disk. The engine itself never
//! touches files; everything here hands back in-memory structures.
//!
//! ## Stock file
//!
//! A JSON array of rows:
//!
//! ```json
//! [{"category": "Spirit", "type": "Dry Gin", "product": "Beefeater",
//!   "abv_percent": 44, "size_ml": 750, "price_paid": 22.0, "in_stock": true}]
//! ```
//!
//! Rows without a type or product are skipped; duplicate (type, product)
//! rows keep the first one seen.
//!
//! ## Recipe book
//!
//! A JSON object from recipe name to template. When several books are
//! loaded, the first book that defines a name wins.

use crate::recipe::{OrderedEntries, Recipe, RecipeTemplate};
use crate::stock::{Category, InMemoryCatalog, StockItem};
use anyhow::{Context, Result};
use log::{debug, error, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Stock row as written in a file; every field may be missing
#[derive(Debug, Deserialize)]
struct StockRow {
    #[serde(default)]
    category: Option<Category>,
    #[serde(default, rename = "type")]
    type_name: Option<String>,
    #[serde(default, rename = "product")]
    product_name: Option<String>,
    #[serde(default)]
    abv_percent: Option<f64>,
    #[serde(default)]
    size_ml: Option<f64>,
    #[serde(default)]
    price_paid: Option<f64>,
    #[serde(default)]
    in_stock: Option<bool>,
}

impl StockRow {
    fn into_item(self) -> Option<StockItem> {
        let type_name = self.type_name.filter(|t| !t.trim().is_empty())?;
        let product_name = self.product_name.filter(|p| !p.trim().is_empty())?;
        let mut item = StockItem::new(
            self.category.unwrap_or(Category::Other),
            type_name.trim(),
            product_name.trim(),
            self.abv_percent.unwrap_or(0.0),
            self.size_ml.unwrap_or(0.0),
            self.price_paid.unwrap_or(0.0),
        );
        item.in_stock = self.in_stock.unwrap_or(true);
        Some(item)
    }
}

/// Parse stock rows from JSON text
pub fn parse_catalog(json: &str) -> Result<InMemoryCatalog> {
    let rows: Vec<StockRow> = serde_json::from_str(json).context("Stock data is not a JSON array of rows")?;
    let total = rows.len();
    let mut catalog = InMemoryCatalog::default();
    for (index, row) in rows.into_iter().enumerate() {
        match row.into_item() {
            Some(item) => {
                catalog.add_item(item);
            }
            None => warn!("Skipping stock row {} with no type or product", index),
        }
    }
    info!("Loaded {} of {} stock rows", catalog.items().len(), total);
    Ok(catalog)
}

/// Load the stock file at `path`
pub fn load_catalog(path: impl AsRef<Path>, include_all: bool) -> Result<InMemoryCatalog> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read stock file {}", path.display()))?;
    let catalog = parse_catalog(&json)
        .with_context(|| format!("Failed to parse stock file {}", path.display()))?;
    Ok(catalog.include_all(include_all))
}

/// Merge recipe books, first book wins on duplicate names
pub fn load_templates<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<(String, RecipeTemplate)>> {
    let mut merged: Vec<(String, RecipeTemplate)> = Vec::new();
    let mut sources: HashMap<String, PathBuf> = HashMap::new();

    for path in paths {
        let path = path.as_ref();
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read recipe file {}", path.display()))?;
        let book: OrderedEntries<RecipeTemplate> = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse recipe file {}", path.display()))?;
        info!("Recipes loaded from {}", path.display());

        for (name, template) in book {
            if let Some(first) = sources.get(&name) {
                debug!(
                    "Keeping {} from {} over {}",
                    name,
                    first.display(),
                    path.display()
                );
                continue;
            }
            sources.insert(name.clone(), path.to_path_buf());
            merged.push((name, template));
        }
    }
    Ok(merged)
}

/// Load recipe books and build every recipe.
///
/// A recipe with a malformed template is logged and left out; the rest of
/// the book still loads.
pub fn load_recipe_book<P: AsRef<Path>>(paths: &[P]) -> Result<Vec<Recipe>> {
    let templates = load_templates(paths)?;
    let mut recipes = Vec::with_capacity(templates.len());
    for (name, template) in &templates {
        match Recipe::from_template(name, template) {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => error!("Skipping recipe: {}", e),
        }
    }
    info!("Built {} of {} recipes", recipes.len(), templates.len());
    Ok(recipes)
}
