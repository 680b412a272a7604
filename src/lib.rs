//! # barmenu
//!
//! Cocktail recipe costing and availability: recipes name ingredients by
//! type, a stock catalog says which bottles are on the shelf, and expansion
//! produces every concrete way each drink can be made with its cost,
//! estimated ABV and standard-drink count.
//!
//! ```rust
//! use barmenu::{expand, InMemoryCatalog, Recipe, RecipeTemplate, StockItem, Category};
//!
//! let template: RecipeTemplate =
//!     serde_json::from_str(r#"{"ingredients": {"dry gin": 2.5, "dry vermouth": 0.5}, "prep": "stir"}"#)?;
//! let mut martini = Recipe::from_template("Martini", &template)?;
//! let catalog = InMemoryCatalog::new(vec![
//!     StockItem::new(Category::Spirit, "Dry Gin", "Beefeater", 44.0, 750.0, 22.0),
//!     StockItem::new(Category::Vermouth, "Dry Vermouth", "Dolin Dry", 17.5, 750.0, 13.0),
//! ]);
//! martini.apply(expand(&martini, &catalog)?);
//! assert!(martini.can_make());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod errors;
pub mod expansion;
pub mod filter;
pub mod ingredient_model;
pub mod ingredient_parser;
pub mod loader;
pub mod menu;
pub mod observability;
pub mod quantity_patterns;
pub mod recipe;
pub mod specifier;
pub mod stats;
pub mod stock;
pub mod units;

pub use config::{EngineConfig, LogFormat};
pub use errors::{
    CatalogError, ConfigError, ConversionError, ExpansionError, RecipeError, SpecifierError,
};
pub use expansion::{expand, Example, ExampleProduct, ExpansionResult};
pub use filter::{filter_recipes, FilterOptions};
pub use ingredient_model::{Amount, IngredientLine, QuantizedIngredient};
pub use recipe::{Recipe, RecipeTemplate};
pub use specifier::IngredientSpecifier;
pub use stats::{recipe_stats, stats, MenuStats, RecipeStats, StatTracker};
pub use stock::{Category, InMemoryCatalog, SharedCatalog, StockCatalog, StockItem};
pub use units::{convert, Unit};
