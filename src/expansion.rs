//! # Recipe Expansion Engine
//!
//! Given a recipe that names ingredients by type and a catalog of what is on
//! the shelf, produce every concrete way the drink can be assembled, with its
//! cost, estimated ABV and standard-drink count.
//!
//! Every ingredient is resolved against the catalog exactly once, up front,
//! and the assemblies are the cartesian product of those match lists: an
//! N-ingredient recipe with k1..kN matches yields k1 x ... x kN examples, in
//! the order where the first ingredient varies slowest. Bar inventories are
//! small, so the product is not bounded here; callers that need a bound should
//! cap the stock they hand in.
//!
//! Expansion is pure: the recipe and catalog are read-only and the result is
//! returned for the caller to store (see [`Recipe::apply`]).

use crate::errors::ExpansionError;
use crate::recipe::Recipe;
use crate::stock::{Category, StockCatalog, StockItem};
use crate::units::{estimate_abv, standard_drinks};
use log::debug;
use serde::{Deserialize, Serialize};
use tracing::debug_span;

/// Water added by each preparation method, as a volume multiplier
pub fn dilution_factor(prep: &str) -> f64 {
    match prep.trim().to_lowercase().as_str() {
        "shake" => 1.65,
        "stir" => 1.3,
        "build" => 1.0,
        _ => 1.0,
    }
}

/// One product used in an example assembly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleProduct {
    pub type_name: String,
    pub product_name: String,
    pub category: Category,
}

/// One concrete assembly of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    /// One product per expanded ingredient, in recipe order
    pub products: Vec<ExampleProduct>,
    pub cost: f64,
    /// Estimated ABV in percent, after dilution
    pub abv: f64,
    pub std_drinks: f64,
    /// Finished volume in the recipe unit, after dilution
    pub volume: f64,
}

impl Example {
    /// Product names worth listing on a menu (spirits, liqueurs, bitters, vermouth, wine)
    pub fn display_products(&self) -> Vec<&str> {
        self.products
            .iter()
            .filter(|p| p.category.is_displayed())
            .map(|p| p.product_name.as_str())
            .collect()
    }

    /// Every product name, including juices, syrups and mixers
    pub fn all_products(&self) -> Vec<&str> {
        self.products.iter().map(|p| p.product_name.as_str()).collect()
    }

    /// Comma-separated product list for display
    pub fn bottles(&self, all_ingredients: bool) -> String {
        if all_ingredients {
            self.all_products().join(", ")
        } else {
            self.display_products().join(", ")
        }
    }
}

/// Outcome of one expansion pass
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpansionResult {
    pub examples: Vec<Example>,
    /// Highest example cost; zero when nothing can be made
    pub max_cost: f64,
}

impl ExpansionResult {
    pub fn can_make(&self) -> bool {
        !self.examples.is_empty()
    }
}

/// Per-product contribution of one ingredient line
struct Candidate {
    product: ExampleProduct,
    cost: f64,
    std_drinks: f64,
}

/// Expand `recipe` against `catalog`.
///
/// Zero expandable ingredients, or any ingredient without a match, yields an
/// empty result rather than an error. Catalog integrity and conversion errors
/// propagate unchanged.
pub fn expand<C: StockCatalog + ?Sized>(
    recipe: &Recipe,
    catalog: &C,
) -> Result<ExpansionResult, ExpansionError> {
    let span = debug_span!("expand", recipe = %recipe.name);
    let _enter = span.enter();

    let ingredients = recipe.expandable_ingredients();
    if ingredients.is_empty() {
        debug!("Recipe '{}' has no expandable ingredients", recipe.name);
        return Ok(ExpansionResult::default());
    }

    let mut base_volume = 0.0;
    let mut candidates: Vec<Vec<Candidate>> = Vec::with_capacity(ingredients.len());
    for ingredient in &ingredients {
        let matches = catalog.resolve(ingredient.specifier())?;
        if matches.is_empty() {
            debug!(
                "Recipe '{}' cannot be made: nothing in stock for '{}'",
                recipe.name,
                ingredient.specifier()
            );
            return Ok(ExpansionResult::default());
        }

        let amount = ingredient
            .single_amount_as(recipe.unit, false)?
            .unwrap_or(0.0);
        base_volume += amount;

        let per_product = matches
            .iter()
            .map(|item| candidate(item, amount, recipe))
            .collect::<Result<Vec<_>, ExpansionError>>()?;
        candidates.push(per_product);
    }

    let volume = base_volume * dilution_factor(&recipe.prep);
    let total: usize = candidates.iter().map(Vec::len).product();
    debug!(
        "Expanding '{}' into {} examples across {} ingredients",
        recipe.name,
        total,
        candidates.len()
    );

    let mut examples = Vec::with_capacity(total);
    let mut max_cost: f64 = 0.0;
    let mut indices = vec![0usize; candidates.len()];
    loop {
        let mut example = Example {
            products: Vec::with_capacity(candidates.len()),
            cost: 0.0,
            abv: 0.0,
            std_drinks: 0.0,
            volume,
        };
        for (choices, &index) in candidates.iter().zip(&indices) {
            let chosen = &choices[index];
            example.cost += chosen.cost;
            example.std_drinks += chosen.std_drinks;
            example.products.push(chosen.product.clone());
        }
        example.abv = estimate_abv(example.std_drinks, volume, recipe.unit)?;
        max_cost = max_cost.max(example.cost);
        examples.push(example);

        if !advance(&mut indices, &candidates) {
            break;
        }
    }

    Ok(ExpansionResult { examples, max_cost })
}

fn candidate(item: &StockItem, amount: f64, recipe: &Recipe) -> Result<Candidate, ExpansionError> {
    Ok(Candidate {
        product: ExampleProduct {
            type_name: item.type_name.clone(),
            product_name: item.product_name.clone(),
            category: item.category,
        },
        cost: amount * item.unit_price(recipe.unit)?,
        std_drinks: standard_drinks(item.abv_percent, amount, recipe.unit)?,
    })
}

/// Step the odometer, last position fastest; false once every tuple is visited
fn advance(indices: &mut [usize], candidates: &[Vec<Candidate>]) -> bool {
    for position in (0..indices.len()).rev() {
        indices[position] += 1;
        if indices[position] < candidates[position].len() {
            return true;
        }
        indices[position] = 0;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingredient_parser::RawQuantity;
    use crate::recipe::RecipeTemplate;
    use crate::stock::InMemoryCatalog;
    use crate::units::{convert, Unit};

    const EPSILON: f64 = 1e-9;

    fn catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            StockItem::new(Category::Spirit, "Dry Gin", "Beefeater", 44.0, 750.0, 22.0),
            StockItem::new(Category::Spirit, "Dry Gin", "Tanqueray", 47.3, 750.0, 26.0),
            StockItem::new(Category::Vermouth, "Dry Vermouth", "Noilly Prat", 18.0, 375.0, 7.0),
            StockItem::new(Category::Juice, "Lime Juice", "Fresh", 0.0, 30.0, 0.5),
            StockItem::new(Category::Syrup, "Simple Syrup", "House", 0.0, 1000.0, 2.0),
        ])
    }

    fn recipe(ingredients: Vec<(&str, RawQuantity)>, prep: &str) -> Recipe {
        let mut template = RecipeTemplate::new(ingredients);
        template.prep = prep.to_string();
        Recipe::from_template("Test", &template).unwrap()
    }

    #[test]
    fn test_dilution_factor() {
        assert_eq!(dilution_factor("shake"), 1.65);
        assert_eq!(dilution_factor("Stir"), 1.3);
        assert_eq!(dilution_factor("build"), 1.0);
        assert_eq!(dilution_factor("blend"), 1.0);
    }

    #[test]
    fn test_single_example_math() {
        let r = recipe(vec![("dry gin:Beefeater", RawQuantity::from(1.5))], "build");
        let result = expand(&r, &catalog()).unwrap();
        assert_eq!(result.examples.len(), 1);

        let example = &result.examples[0];
        let per_oz = 22.0 / convert(750.0, Unit::Ml, Unit::Oz, false).unwrap();
        assert!((example.cost - 1.5 * per_oz).abs() < EPSILON);
        assert!((example.std_drinks - 44.0 / 40.0).abs() < EPSILON);
        assert!((example.volume - 1.5).abs() < EPSILON);
        // undiluted single spirit keeps its own ABV
        assert!((example.abv - 44.0).abs() < 1e-6);
        assert_eq!(result.max_cost, example.cost);
    }

    #[test]
    fn test_dilution_lowers_abv() {
        let r = recipe(vec![("dry gin:Beefeater", RawQuantity::from(2.0))], "shake");
        let example = &expand(&r, &catalog()).unwrap().examples[0];
        assert!((example.volume - 2.0 * 1.65).abs() < EPSILON);
        assert!((example.abv - 44.0 / 1.65).abs() < 1e-6);
    }

    #[test]
    fn test_cartesian_order_first_varies_slowest() {
        let r = recipe(
            vec![
                ("dry gin", RawQuantity::from(2.0)),
                ("lime juice", RawQuantity::from(0.75)),
                ("dry vermouth", RawQuantity::from(0.5)),
            ],
            "shake",
        );
        let mut cat = catalog();
        cat.add_item(StockItem::new(
            Category::Vermouth,
            "Dry Vermouth",
            "Dolin Dry",
            17.5,
            750.0,
            13.0,
        ));
        let result = expand(&r, &cat).unwrap();
        let combos: Vec<Vec<&str>> = result.examples.iter().map(|e| e.all_products()).collect();
        assert_eq!(
            combos,
            vec![
                vec!["Beefeater", "Fresh", "Noilly Prat"],
                vec!["Beefeater", "Fresh", "Dolin Dry"],
                vec!["Tanqueray", "Fresh", "Noilly Prat"],
                vec!["Tanqueray", "Fresh", "Dolin Dry"],
            ]
        );
    }

    #[test]
    fn test_display_products_skip_juice() {
        let r = recipe(
            vec![
                ("dry gin:Beefeater", RawQuantity::from(2.0)),
                ("lime juice", RawQuantity::from(1.0)),
                ("simple syrup", RawQuantity::from(0.5)),
            ],
            "shake",
        );
        let example = &expand(&r, &catalog()).unwrap().examples[0];
        assert_eq!(example.products.len(), 3);
        assert_eq!(example.display_products(), vec!["Beefeater"]);
        assert_eq!(example.bottles(true), "Beefeater, Fresh, House");
        // juice and syrup still cost money
        let gin_only = expand(
            &recipe(vec![("dry gin:Beefeater", RawQuantity::from(2.0))], "shake"),
            &catalog(),
        )
        .unwrap();
        assert!(example.cost > gin_only.examples[0].cost);
    }

    #[test]
    fn test_missing_ingredient_cannot_make() {
        let r = recipe(
            vec![
                ("dry gin", RawQuantity::from(2.0)),
                ("green chartreuse", RawQuantity::from(0.75)),
            ],
            "shake",
        );
        let result = expand(&r, &catalog()).unwrap();
        assert!(!result.can_make());
        assert_eq!(result.max_cost, 0.0);
    }

    #[test]
    fn test_literal_only_recipe_is_empty() {
        let r = recipe(vec![("egg white", RawQuantity::from("one"))], "shake");
        assert!(expand(&r, &catalog()).unwrap().examples.is_empty());
    }

    #[test]
    fn test_abv_independent_of_recipe_unit() {
        let mut r = recipe(
            vec![
                ("dry gin", RawQuantity::from(2.0)),
                ("dry vermouth", RawQuantity::from(1.0)),
            ],
            "stir",
        );
        let in_oz = expand(&r, &catalog()).unwrap();
        r.convert(Unit::Ml, false, false).unwrap();
        let in_ml = expand(&r, &catalog()).unwrap();
        for (a, b) in in_oz.examples.iter().zip(&in_ml.examples) {
            assert!((a.abv - b.abv).abs() < 1e-9);
            assert!((a.std_drinks - b.std_drinks).abs() < 1e-9);
            assert!((a.cost - b.cost).abs() < 1e-9);
        }
    }

    #[test]
    fn test_advance_visits_every_tuple() {
        let make = |n: usize| -> Vec<Candidate> {
            (0..n)
                .map(|i| Candidate {
                    product: ExampleProduct {
                        type_name: String::new(),
                        product_name: i.to_string(),
                        category: Category::Spirit,
                    },
                    cost: 0.0,
                    std_drinks: 0.0,
                })
                .collect()
        };
        let candidates = vec![make(2), make(3), make(4)];
        let mut indices = vec![0; 3];
        let mut seen = 1;
        while advance(&mut indices, &candidates) {
            seen += 1;
        }
        assert_eq!(seen, 24);
        assert_eq!(indices, vec![0, 0, 0]);
    }
}
