//! # Catalog Tests
//!
//! Specifier parsing and stock resolution through the `StockCatalog` trait.

use barmenu::stock::ResolutionRules;
use barmenu::{
    CatalogError, Category, InMemoryCatalog, IngredientSpecifier, SharedCatalog, SpecifierError,
    StockCatalog, StockItem,
};

fn spec(text: &str) -> IngredientSpecifier {
    IngredientSpecifier::parse(text).unwrap()
}

fn products(rows: &[StockItem]) -> Vec<&str> {
    rows.iter().map(|r| r.product_name.as_str()).collect()
}

fn bar() -> InMemoryCatalog {
    InMemoryCatalog::new(vec![
        StockItem::new(Category::Spirit, "Rye Whiskey", "Bulleit Rye", 45.0, 750.0, 28.96),
        StockItem::new(Category::Spirit, "Bourbon Whiskey", "Buffalo Trace", 45.0, 750.0, 26.0),
        StockItem::new(Category::Spirit, "Scotch Whisky", "Famous Grouse", 40.0, 750.0, 22.0),
        StockItem::new(Category::Spirit, "Blanco Tequila", "Espolon", 40.0, 750.0, 25.0),
        StockItem::new(Category::Spirit, "Mezcal", "Del Maguey Vida", 42.0, 750.0, 34.0),
        StockItem::new(Category::Spirit, "Dark Rum", "Goslings", 40.0, 750.0, 20.0),
        StockItem::new(Category::Vermouth, "Sweet Vermouth", "Carpano Antica", 16.5, 1000.0, 32.0),
        StockItem::new(Category::Vermouth, "Dry Vermouth", "Dolin Dry", 17.5, 750.0, 13.0)
            .out_of_stock(),
        StockItem::new(Category::Bitters, "Aromatic Bitters", "Angostura", 44.7, 118.0, 7.95),
        StockItem::new(Category::Liqueur, "Orange Liqueur", "Cointreau", 40.0, 750.0, 35.0),
    ])
}

/// Catalog backend that counts how often it is queried
struct CountingCatalog {
    inner: InMemoryCatalog,
    calls: std::cell::Cell<usize>,
}

impl StockCatalog for CountingCatalog {
    fn resolve(&self, specifier: &IngredientSpecifier) -> Result<Vec<StockItem>, CatalogError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.resolve(specifier)
    }
}

#[test]
fn test_specifier_grammar() {
    let plain = spec("dry gin");
    assert_eq!(plain.type_query, "dry gin");
    assert!(!plain.is_pinned());

    let pinned = spec("whiskey:Bulleit Rye");
    assert_eq!(pinned.type_query, "whiskey");
    assert_eq!(pinned.product_name.as_deref(), Some("Bulleit Rye"));

    assert_eq!(
        IngredientSpecifier::parse("rum:a:b").unwrap_err(),
        SpecifierError::TooManySeparators("rum:a:b".to_string())
    );
    assert!(matches!(
        IngredientSpecifier::parse(":Beefeater"),
        Err(SpecifierError::EmptyType(_))
    ));
}

#[test]
fn test_qualifier_is_display_only() {
    let qualified = spec("sweet vermouth (Italian)");
    assert_eq!(qualified.normalized_type(), "sweet vermouth");
    assert_eq!(qualified.to_string(), "sweet vermouth (Italian)");
    assert_eq!(products(&bar().resolve(&qualified).unwrap()), vec!["Carpano Antica"]);
}

#[test]
fn test_family_precedence() {
    let cat = bar();
    assert_eq!(
        products(&cat.resolve(&spec("whisky")).unwrap()),
        vec!["Bulleit Rye", "Buffalo Trace", "Famous Grouse"]
    );
    assert_eq!(products(&cat.resolve(&spec("tequila")).unwrap()), vec!["Espolon"]);
    // the out-of-stock dry vermouth is filtered before matching
    assert_eq!(products(&cat.resolve(&spec("vermouth")).unwrap()), vec!["Carpano Antica"]);
    assert_eq!(products(&cat.resolve(&spec("Bitters")).unwrap()), vec!["Angostura"]);
}

#[test]
fn test_any_spirit_is_not_substring() {
    let cat = bar();
    assert_eq!(
        products(&cat.resolve(&spec("any spirit")).unwrap()),
        vec!["Bulleit Rye", "Buffalo Trace", "Goslings"]
    );

    let mut rules = ResolutionRules::default();
    rules.any_spirit_types.push("mezcal".to_string());
    let cat = bar().with_rules(rules);
    assert!(products(&cat.resolve(&spec("any spirit")).unwrap()).contains(&"Del Maguey Vida"));
}

#[test]
fn test_pinned_whiskey_scenario() {
    let cat = bar();
    let rows = cat.resolve(&spec("whiskey:Bulleit Rye")).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].type_name.to_lowercase().contains("whisk"));
    assert_eq!(rows[0].product_name, "Bulleit Rye");

    // pinned product of the wrong type is simply unavailable
    assert!(cat.resolve(&spec("tequila:Bulleit Rye")).unwrap().is_empty());

    let mut doubled = bar();
    doubled.add_item(StockItem::new(
        Category::Spirit,
        "Canadian Whisky",
        "Bulleit Rye",
        40.0,
        750.0,
        20.0,
    ));
    assert_eq!(
        doubled.resolve(&spec("whiskey:Bulleit Rye")).unwrap_err(),
        CatalogError::Integrity {
            specifier: "whiskey:Bulleit Rye".to_string(),
            matches: 2,
        }
    );
}

#[test]
fn test_unknown_type_is_unavailable_not_error() {
    assert!(bar().resolve(&spec("yellow chartreuse")).unwrap().is_empty());
}

#[test]
fn test_trait_object_backend() {
    let backend: Box<dyn StockCatalog> = Box::new(bar());
    assert_eq!(backend.resolve(&spec("dark rum")).unwrap().len(), 1);
}

#[test]
fn test_expansion_queries_each_ingredient_once() {
    let catalog = CountingCatalog {
        inner: bar(),
        calls: std::cell::Cell::new(0),
    };
    let template: barmenu::RecipeTemplate = serde_json::from_str(
        r#"{"ingredients": {"whiskey": 2, "sweet vermouth": 1, "aromatic bitters": "2 dashes"}}"#,
    )
    .unwrap();
    let manhattan = barmenu::Recipe::from_template("Manhattan", &template).unwrap();
    let result = barmenu::expand(&manhattan, &catalog).unwrap();
    assert_eq!(result.examples.len(), 3);
    assert_eq!(catalog.calls.get(), 3);
}

#[test]
fn test_shared_catalog_toggle() {
    let shared = SharedCatalog::new(bar());
    let dry = spec("dry vermouth");
    assert!(shared.snapshot().resolve(&dry).unwrap().is_empty());
    assert!(shared.set_in_stock("dry vermouth", "Dolin Dry", true));
    assert_eq!(shared.snapshot().resolve(&dry).unwrap().len(), 1);
    assert!(!shared.set_in_stock("dry vermouth", "Noilly Prat", true));
}
