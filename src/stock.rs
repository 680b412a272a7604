//! # Stock Catalog
//!
//! The bar's inventory of bottles and the single query the engine makes
//! against it: resolve an [`IngredientSpecifier`] to the stock rows that can
//! fill it.
//!
//! ## Resolution rules
//!
//! 1. Broad family terms (rum, whiskey/whisky, tequila, vermouth) match any
//!    type containing the term; both whiskey spellings match "whisk".
//! 2. "any spirit" matches a fixed allow-list of spirit types.
//! 3. "bitters" matches by category rather than type.
//! 4. Anything else must equal the lower-cased type exactly.
//!
//! A pinned product then narrows the rows to that exact product name.

use crate::errors::{CatalogError, ConversionError};
use crate::specifier::IngredientSpecifier;
use crate::units::{convert, Unit};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Inventory category of a stock row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Spirit,
    Liqueur,
    Vermouth,
    Bitters,
    Syrup,
    Juice,
    Mixer,
    Wine,
    Beer,
    Dry,
    Ice,
    #[serde(other)]
    Other,
}

impl Category {
    /// Categories whose products are named in example product lists
    pub const DISPLAYED: [Category; 5] = [
        Category::Spirit,
        Category::Liqueur,
        Category::Bitters,
        Category::Vermouth,
        Category::Wine,
    ];

    pub fn is_displayed(&self) -> bool {
        Self::DISPLAYED.contains(self)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

fn default_in_stock() -> bool {
    true
}

/// One purchasable product on the shelf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockItem {
    pub category: Category,
    /// Ingredient type this product fills, e.g. "Dry Gin"
    #[serde(rename = "type")]
    pub type_name: String,
    /// Concrete product, e.g. "Beefeater"
    #[serde(rename = "product")]
    pub product_name: String,
    #[serde(default)]
    pub abv_percent: f64,
    /// Bottle size in millilitres
    #[serde(default)]
    pub size_ml: f64,
    /// Price paid for the whole bottle
    #[serde(default)]
    pub price_paid: f64,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

impl StockItem {
    pub fn new(
        category: Category,
        type_name: &str,
        product_name: &str,
        abv_percent: f64,
        size_ml: f64,
        price_paid: f64,
    ) -> Self {
        Self {
            category,
            type_name: type_name.to_string(),
            product_name: product_name.to_string(),
            abv_percent,
            size_ml,
            price_paid,
            in_stock: true,
        }
    }

    /// Mark this row as out of stock
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }

    pub fn type_key(&self) -> String {
        self.type_name.to_lowercase()
    }

    /// Price of one `unit` of this product; a bottle with no size costs nothing
    pub fn unit_price(&self, unit: Unit) -> Result<f64, ConversionError> {
        if self.size_ml <= 0.0 {
            warn!(
                "Stock row missing size, pricing at zero: {}:{}",
                self.type_name, self.product_name
            );
            return Ok(0.0);
        }
        let size = convert(self.size_ml, Unit::Ml, unit, false)?;
        Ok(self.price_paid / size)
    }
}

/// The one query the expansion engine makes against inventory
pub trait StockCatalog {
    /// Every stock row able to fill `specifier`; an empty list means unavailable
    fn resolve(&self, specifier: &IngredientSpecifier) -> Result<Vec<StockItem>, CatalogError>;
}

/// Type-matching rules for family and wildcard terms
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionRules {
    /// Terms matched as substrings of the stock type
    pub family_terms: Vec<String>,
    /// Exact types accepted for "any spirit"
    pub any_spirit_types: Vec<String>,
}

impl Default for ResolutionRules {
    fn default() -> Self {
        Self {
            family_terms: ["rum", "whiskey", "whisky", "tequila", "vermouth"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            any_spirit_types: [
                "dry gin",
                "rye whiskey",
                "bourbon whiskey",
                "amber rum",
                "dark rum",
                "white rum",
                "genever",
                "cognac",
                "brandy",
                "aquavit",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl ResolutionRules {
    /// Whether a stock row satisfies the (lower-cased) type query
    pub fn matches(&self, query: &str, item: &StockItem) -> bool {
        let type_key = item.type_key();
        if self.family_terms.iter().any(|t| t == query) {
            let needle = if query.starts_with("whisk") { "whisk" } else { query };
            type_key.contains(needle)
        } else if query == "any spirit" {
            self.any_spirit_types.iter().any(|t| *t == type_key)
        } else if query == "bitters" {
            item.category == Category::Bitters
        } else {
            type_key == query
        }
    }
}

/// Catalog held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    items: Vec<StockItem>,
    rules: ResolutionRules,
    include_all: bool,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<StockItem>) -> Self {
        Self {
            items,
            rules: ResolutionRules::default(),
            include_all: false,
        }
    }

    pub fn with_rules(mut self, rules: ResolutionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Resolve against every row, ignoring the in-stock flag
    pub fn include_all(mut self, include_all: bool) -> Self {
        self.include_all = include_all;
        self
    }

    pub fn items(&self) -> &[StockItem] {
        &self.items
    }

    pub fn rules(&self) -> &ResolutionRules {
        &self.rules
    }

    /// Add a row unless the same (type, product) pair is already present
    pub fn add_item(&mut self, item: StockItem) -> bool {
        let duplicate = self.items.iter().any(|existing| {
            existing.type_key() == item.type_key() && existing.product_name == item.product_name
        });
        if duplicate {
            debug!(
                "Skipping duplicate stock row {}:{}",
                item.type_name, item.product_name
            );
            return false;
        }
        self.items.push(item);
        true
    }

    /// Toggle availability of one product; returns whether a row changed
    pub fn set_in_stock(&mut self, type_name: &str, product_name: &str, in_stock: bool) -> bool {
        let type_key = type_name.to_lowercase();
        let mut changed = false;
        for item in self
            .items
            .iter_mut()
            .filter(|i| i.type_key() == type_key && i.product_name == product_name)
        {
            item.in_stock = in_stock;
            changed = true;
        }
        changed
    }

    /// Distinct lower-cased types present in stock, for validating allow-lists
    pub fn known_types(&self) -> HashSet<String> {
        self.items.iter().map(StockItem::type_key).collect()
    }

    /// "Any spirit" allow-list entries that no stock row carries
    pub fn missing_any_spirit_types(&self) -> Vec<String> {
        let known = self.known_types();
        self.rules
            .any_spirit_types
            .iter()
            .filter(|t| !known.contains(&t.to_lowercase()))
            .cloned()
            .collect()
    }
}

impl StockCatalog for InMemoryCatalog {
    fn resolve(&self, specifier: &IngredientSpecifier) -> Result<Vec<StockItem>, CatalogError> {
        let query = specifier.normalized_type();
        let matching: Vec<StockItem> = self
            .items
            .iter()
            .filter(|item| self.include_all || item.in_stock)
            .filter(|item| self.rules.matches(&query, item))
            .filter(|item| {
                specifier
                    .product_name
                    .as_ref()
                    .map_or(true, |product| item.product_name == *product)
            })
            .cloned()
            .collect();

        if specifier.is_pinned() && matching.len() > 1 {
            return Err(CatalogError::Integrity {
                specifier: specifier.key(),
                matches: matching.len(),
            });
        }

        debug!("Resolved '{}' to {} stock rows", specifier.key(), matching.len());
        Ok(matching)
    }
}

/// Catalog that may have stock toggled while recipes are being expanded.
///
/// Expansion never runs against the live data: callers take a [`snapshot`]
/// and expand against that, so one pass sees one consistent inventory.
///
/// [`snapshot`]: SharedCatalog::snapshot
#[derive(Debug, Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<InMemoryCatalog>>,
}

impl SharedCatalog {
    pub fn new(catalog: InMemoryCatalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(catalog)),
        }
    }

    /// Owned copy of the catalog as it is right now
    pub fn snapshot(&self) -> InMemoryCatalog {
        match self.inner.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn set_in_stock(&self, type_name: &str, product_name: &str, in_stock: bool) -> bool {
        match self.inner.write() {
            Ok(mut guard) => guard.set_in_stock(type_name, product_name, in_stock),
            Err(poisoned) => poisoned
                .into_inner()
                .set_in_stock(type_name, product_name, in_stock),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(text: &str) -> IngredientSpecifier {
        IngredientSpecifier::parse(text).unwrap()
    }

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            StockItem::new(Category::Spirit, "Rye Whiskey", "Bulleit Rye", 45.0, 750.0, 28.96),
            StockItem::new(Category::Spirit, "Scotch Whisky", "Famous Grouse", 40.0, 750.0, 22.0),
            StockItem::new(Category::Spirit, "Dry Gin", "Beefeater", 44.0, 750.0, 20.0),
            StockItem::new(Category::Spirit, "Dry Gin", "New Amsterdam", 44.0, 1750.0, 25.49)
                .out_of_stock(),
            StockItem::new(Category::Spirit, "White Rum", "Bacardi", 40.0, 750.0, 15.0),
            StockItem::new(Category::Bitters, "Aromatic Bitters", "Angostura", 44.7, 118.0, 7.95),
            StockItem::new(Category::Bitters, "Orange Bitters", "Regans", 45.0, 148.0, 8.50),
            StockItem::new(Category::Juice, "Lemon Juice", "Fresh", 0.0, 45.0, 0.80),
        ])
    }

    #[test]
    fn test_family_terms_use_substring() {
        let cat = catalog();
        let whiskey = cat.resolve(&spec("whiskey")).unwrap();
        let whisky = cat.resolve(&spec("Whisky")).unwrap();
        assert_eq!(whiskey.len(), 2);
        assert_eq!(whiskey, whisky);
        assert_eq!(cat.resolve(&spec("rum")).unwrap().len(), 1);
    }

    #[test]
    fn test_exact_type_match() {
        let cat = catalog();
        let gins = cat.resolve(&spec("dry gin")).unwrap();
        assert_eq!(gins.len(), 1);
        assert_eq!(gins[0].product_name, "Beefeater");
        assert!(cat.resolve(&spec("gin")).unwrap().is_empty());
    }

    #[test]
    fn test_include_all_bypasses_stock_filter() {
        let cat = catalog().include_all(true);
        assert_eq!(cat.resolve(&spec("dry gin")).unwrap().len(), 2);
    }

    #[test]
    fn test_any_spirit_uses_allow_list() {
        let cat = catalog();
        let spirits = cat.resolve(&spec("any spirit")).unwrap();
        let names: Vec<&str> = spirits.iter().map(|s| s.product_name.as_str()).collect();
        assert_eq!(names, vec!["Bulleit Rye", "Beefeater", "Bacardi"]);
    }

    #[test]
    fn test_missing_any_spirit_types() {
        let cat = catalog();
        assert_eq!(
            cat.missing_any_spirit_types(),
            vec!["bourbon whiskey", "amber rum", "dark rum", "genever", "cognac", "brandy", "aquavit"]
        );

        let rules = ResolutionRules {
            any_spirit_types: vec!["Dry Gin".to_string(), "mezcal".to_string()],
            ..Default::default()
        };
        assert_eq!(catalog().with_rules(rules).missing_any_spirit_types(), vec!["mezcal"]);
    }

    #[test]
    fn test_bitters_match_by_category() {
        let cat = catalog();
        assert_eq!(cat.resolve(&spec("bitters")).unwrap().len(), 2);
        assert_eq!(cat.resolve(&spec("orange bitters")).unwrap().len(), 1);
    }

    #[test]
    fn test_pinned_product() {
        let cat = catalog();
        let rows = cat.resolve(&spec("whiskey:Bulleit Rye")).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(cat.resolve(&spec("dry gin:Tanqueray")).unwrap().is_empty());
    }

    #[test]
    fn test_ambiguous_pin_is_integrity_error() {
        let mut cat = catalog();
        cat.add_item(StockItem::new(
            Category::Spirit,
            "Bourbon Whiskey",
            "Bulleit Rye",
            45.0,
            750.0,
            30.0,
        ));
        let err = cat.resolve(&spec("whiskey:Bulleit Rye")).unwrap_err();
        assert_eq!(
            err,
            CatalogError::Integrity {
                specifier: "whiskey:Bulleit Rye".to_string(),
                matches: 2
            }
        );
    }

    #[test]
    fn test_duplicate_rows_keep_first() {
        let mut cat = catalog();
        let added = cat.add_item(StockItem::new(
            Category::Spirit,
            "dry gin",
            "Beefeater",
            40.0,
            1000.0,
            99.0,
        ));
        assert!(!added);
        assert_eq!(cat.items().len(), 8);
    }

    #[test]
    fn test_unit_price() {
        let item = StockItem::new(Category::Spirit, "Dry Gin", "Beefeater", 44.0, 750.0, 30.0);
        assert!((item.unit_price(Unit::Ml).unwrap() - 0.04).abs() < 1e-12);
        assert!((item.unit_price(Unit::Cl).unwrap() - 0.4).abs() < 1e-12);
        let per_oz = 30.0 / (750.0 / 29.5735);
        assert!((item.unit_price(Unit::Oz).unwrap() - per_oz).abs() < 1e-12);

        let sizeless = StockItem::new(Category::Other, "Lemon Peel", "Fresh", 0.0, 0.0, 3.0);
        assert_eq!(sizeless.unit_price(Unit::Oz).unwrap(), 0.0);
    }

    #[test]
    fn test_shared_catalog_snapshot_is_isolated() {
        let shared = SharedCatalog::new(catalog());
        let before = shared.snapshot();
        assert!(shared.set_in_stock("Dry Gin", "Beefeater", false));
        let after = shared.snapshot();

        assert_eq!(before.resolve(&spec("dry gin")).unwrap().len(), 1);
        assert!(after.resolve(&spec("dry gin")).unwrap().is_empty());
    }

    #[test]
    fn test_category_deserializes_unknown_as_other() {
        let item: StockItem = serde_json::from_str(
            r#"{"category": "Garnish", "type": "Lemon Peel", "product": "Fresh"}"#,
        )
        .unwrap();
        assert_eq!(item.category, Category::Other);
        assert!(item.in_stock);
        assert_eq!(item.size_ml, 0.0);
    }
}
