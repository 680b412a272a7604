//! # Recipe Filtering
//!
//! Narrow a menu down by free-text search, required or forbidden ingredients,
//! and substring matches on display attributes.
//!
//! Each active criterion selects a set of recipes. The sets are intersected
//! by default, or unioned when requested. Criteria left empty are inactive.

use crate::recipe::Recipe;
use log::debug;
use std::collections::BTreeSet;

/// Filtering parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Matched against ingredients and every attribute; stands in for any empty attribute filter
    pub search: String,
    /// Keep recipes that cannot currently be made
    pub all: bool,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    /// Any include term is enough, rather than all of them
    pub include_use_or: bool,
    /// Excluding any one term is enough, rather than needing all absent
    pub exclude_use_or: bool,
    pub style: String,
    pub glass: String,
    pub prep: String,
    pub ice: String,
    pub name: String,
    pub tag: String,
}

/// Attributes available to substring filters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Style,
    Glass,
    Prep,
    Ice,
    Name,
    Tag,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Style,
        Attribute::Glass,
        Attribute::Prep,
        Attribute::Ice,
        Attribute::Name,
        Attribute::Tag,
    ];

    pub fn of<'a>(&self, recipe: &'a Recipe) -> &'a str {
        match self {
            Attribute::Style => &recipe.style,
            Attribute::Glass => &recipe.glass,
            Attribute::Prep => &recipe.prep,
            Attribute::Ice => &recipe.ice,
            Attribute::Name => &recipe.name,
            Attribute::Tag => &recipe.tag,
        }
    }

    fn filter_value<'a>(&self, options: &'a FilterOptions) -> &'a str {
        match self {
            Attribute::Style => &options.style,
            Attribute::Glass => &options.glass,
            Attribute::Prep => &options.prep,
            Attribute::Ice => &options.ice,
            Attribute::Name => &options.name,
            Attribute::Tag => &options.tag,
        }
    }
}

/// Apply `options` to `recipes`.
///
/// Returns the kept recipes in their original order and the sorted names of
/// every recipe that was left out.
pub fn filter_recipes(
    recipes: &[Recipe],
    options: &FilterOptions,
    union: bool,
) -> (Vec<Recipe>, Vec<String>) {
    let candidates: Vec<&Recipe> = recipes
        .iter()
        .filter(|r| options.all || r.can_make())
        .collect();

    let search = options.search.trim().to_lowercase();
    let include: Vec<String> = if search.is_empty() {
        options.include.iter().map(|s| s.to_lowercase()).collect()
    } else {
        vec![search.clone()]
    };

    let mut selections: Vec<Vec<bool>> = Vec::new();

    if !include.is_empty() {
        selections.push(
            candidates
                .iter()
                .map(|recipe| {
                    let mut hits = include.iter().map(|term| recipe.contains_ingredient(term, true));
                    if options.include_use_or {
                        hits.any(|hit| hit)
                    } else {
                        hits.all(|hit| hit)
                    }
                })
                .collect(),
        );
    }

    if !options.exclude.is_empty() {
        selections.push(
            candidates
                .iter()
                .map(|recipe| {
                    let mut absent = options
                        .exclude
                        .iter()
                        .map(|term| !recipe.contains_ingredient(term, false));
                    if options.exclude_use_or {
                        absent.any(|ok| ok)
                    } else {
                        absent.all(|ok| ok)
                    }
                })
                .collect(),
        );
    }

    for attribute in Attribute::ALL {
        let mut value = attribute.filter_value(options).trim().to_lowercase();
        if value.is_empty() {
            value = search.clone();
        }
        if value.is_empty() {
            continue;
        }
        selections.push(
            candidates
                .iter()
                .map(|recipe| attribute.of(recipe).to_lowercase().contains(&value))
                .collect(),
        );
    }

    let kept: Vec<Recipe> = candidates
        .iter()
        .enumerate()
        .filter(|(index, _)| {
            if selections.is_empty() {
                return true;
            }
            let mut votes = selections.iter().map(|selection| selection[*index]);
            if union {
                votes.any(|v| v)
            } else {
                votes.all(|v| v)
            }
        })
        .map(|(_, recipe)| (*recipe).clone())
        .collect();

    let kept_names: BTreeSet<&str> = kept.iter().map(|r| r.name.as_str()).collect();
    let excluded: Vec<String> = recipes
        .iter()
        .map(|r| r.name.as_str())
        .filter(|name| !kept_names.contains(name))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    debug!(
        "Filter kept {} of {} recipes; excluded: {}",
        kept.len(),
        recipes.len(),
        excluded.join(", ")
    );
    (kept, excluded)
}
