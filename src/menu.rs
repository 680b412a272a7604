//! # Menu Rendering
//!
//! Plain-text menu output built from expanded recipes. Every function here
//! returns a `String`; choosing where it goes (terminal, file, another
//! renderer) is up to the caller.

use crate::expansion::Example;
use crate::recipe::Recipe;
use crate::stats::MenuStats;
use crate::stock::{Category, StockItem};
use chrono::NaiveDate;

/// Origin text that marks a recipe as a house original
pub const HOUSE_ORIGINAL: &str = "house original";

/// What to show for each recipe
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    pub prices: bool,
    pub stats: bool,
    pub examples: bool,
    /// List every product in example lines, not only spirits and the like
    pub all_ingredients: bool,
    pub markup: f64,
    pub prep_line: bool,
    pub origin: bool,
    pub info: bool,
    pub variants: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            prices: true,
            stats: false,
            examples: false,
            all_ingredients: false,
            markup: 1.2,
            prep_line: true,
            origin: true,
            info: true,
            variants: true,
        }
    }
}

/// Menu price for a drink costing `cost` in ingredients
pub fn calculate_price(cost: f64, markup: f64) -> i64 {
    ((cost + 1.0) * markup + 1.0).floor() as i64
}

/// One example as "$cost | abv% | std drinks | products"
pub fn render_example(example: &Example, all_ingredients: bool) -> String {
    format!(
        "${:.2} | {:.2}% | {:.2} | {}",
        example.cost,
        example.abv,
        example.std_drinks,
        example.bottles(all_ingredients)
    )
}

/// Whether the recipe's origin marks it as a house original
pub fn is_house_original(recipe: &Recipe) -> bool {
    recipe.origin.to_lowercase().contains(HOUSE_ORIGINAL)
}

/// Full text block for one recipe
pub fn render_recipe(recipe: &Recipe, options: &DisplayOptions) -> String {
    let mut out = String::new();

    let mut name_line = recipe.name.clone();
    if options.origin && is_house_original(recipe) {
        name_line.push('*');
    }
    if options.prices && recipe.max_cost > 0.0 {
        name_line.push_str(&format!(" ... ${}", calculate_price(recipe.max_cost, options.markup)));
    }
    out.push_str(&name_line);
    out.push('\n');

    if options.prep_line {
        out.push_str(&recipe.prep_line(true, false));
        out.push('\n');
    }
    if options.info && !recipe.info.is_empty() {
        out.push_str(&recipe.info);
        out.push('\n');
    }
    for line in &recipe.ingredients {
        out.push_str(&line.render());
        out.push('\n');
    }
    if options.variants {
        for variant in &recipe.variants {
            out.push_str(&format!("\t{}\n", variant));
        }
    }
    if options.examples {
        for example in &recipe.examples {
            out.push_str(&format!("\t{}\n", render_example(example, options.all_ingredients)));
        }
    }
    out
}

/// Title, tagline and date lines that open a menu
pub fn render_menu_header(
    title: &str,
    tagline: Option<&str>,
    date: NaiveDate,
    options: &DisplayOptions,
) -> String {
    let tagline = tagline.unwrap_or(if options.prices {
        "Tips never required, always appreciated"
    } else {
        "Drinks made with the good stuff"
    });
    let mut out = String::new();
    out.push_str(&format!("{}\n{}\n{}\n", title, tagline, date.format("%b %d, %Y")));
    if options.origin {
        out.push_str("* House original\n");
    }
    if options.prices {
        out.push_str("$ amount shown is calculated from cost of ingredients\n");
    }
    out
}

/// "Included Ingredients" listing of the spirits, vermouths and liqueurs in stock
pub fn render_liquor_list(items: &[StockItem]) -> String {
    let listed: Vec<&StockItem> = items
        .iter()
        .filter(|i| i.in_stock)
        .filter(|i| matches!(i.category, Category::Spirit | Category::Vermouth | Category::Liqueur))
        .collect();
    let width = listed
        .iter()
        .map(|i| i.product_name.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::from("Included Ingredients\n");
    for item in listed {
        out.push_str(&format!(
            "{:>width$}  {}\n",
            item.product_name,
            item.type_name,
            width = width
        ));
    }
    out
}

/// Aligned table of menu-wide superlatives
pub fn render_stats_report(stats: &MenuStats) -> String {
    let title_width = stats
        .trackers
        .iter()
        .map(|t| t.title.chars().count())
        .max()
        .unwrap_or(0)
        + 1;
    let name_width = stats
        .trackers
        .iter()
        .filter_map(|t| t.recipe_name())
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(0)
        + 1;

    let mut out = String::new();
    for tracker in &stats.trackers {
        let (Some(name), Some(example)) = (tracker.recipe_name(), tracker.example()) else {
            continue;
        };
        out.push_str(&format!(
            "{:<tw$} | {:<nw$} | ${:.2} | {:>5.2}% ABV | {:.2} | {}\n",
            tracker.title,
            name,
            example.cost,
            example.abv,
            example.std_drinks,
            example.bottles(false),
            tw = title_width,
            nw = name_width,
        ));
    }
    out
}

/// Header, every recipe block, then the optional stats report
pub fn render_menu(
    recipes: &[Recipe],
    title: &str,
    date: NaiveDate,
    options: &DisplayOptions,
) -> String {
    let mut out = render_menu_header(title, None, date, options);
    for recipe in recipes {
        out.push('\n');
        out.push_str(&render_recipe(recipe, options));
    }
    if options.stats {
        let stats = MenuStats::from_recipes(recipes);
        if !stats.is_empty() {
            out.push('\n');
            out.push_str(&render_stats_report(&stats));
        }
    }
    out
}
