//! # Recipe Module
//!
//! A recipe template as authored (JSON-shaped, see [`RecipeTemplate`]) and the
//! [`Recipe`] built from it: ordered ingredient lines plus display metadata,
//! and the examples produced by the latest expansion.

use crate::config::EngineConfig;
use crate::errors::{ConversionError, ExpansionError, RecipeError};
use crate::expansion::{expand, Example, ExpansionResult};
use crate::ingredient_model::{IngredientLine, QuantizedIngredient};
use crate::ingredient_parser::{parse_quantity, RawQuantity};
use crate::specifier::IngredientSpecifier;
use crate::stock::StockCatalog;
use crate::units::{convert, Unit};
use log::{debug, warn};
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::marker::PhantomData;

/// JSON object whose key order is meaningful
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedEntries<T>(pub Vec<(String, T)>);

impl<T> Default for OrderedEntries<T> {
    fn default() -> Self {
        Self(Vec::new())
    }
}

impl<T> OrderedEntries<T> {
    pub fn iter(&self) -> impl Iterator<Item = &(String, T)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T> FromIterator<(String, T)> for OrderedEntries<T> {
    fn from_iter<I: IntoIterator<Item = (String, T)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for OrderedEntries<T> {
    type Item = (String, T);
    type IntoIter = std::vec::IntoIter<(String, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

struct OrderedEntriesVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedEntriesVisitor<T> {
    type Value = OrderedEntries<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, T>()? {
            entries.push((key, value));
        }
        Ok(OrderedEntries(entries))
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedEntries<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedEntriesVisitor(PhantomData))
    }
}

impl<T: Serialize> Serialize for OrderedEntries<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(k, v)| (k, v)))
    }
}

fn default_unit() -> String {
    "oz".to_string()
}

fn default_prep() -> String {
    "shake".to_string()
}

fn default_ice() -> String {
    "cubed".to_string()
}

fn default_glass() -> String {
    "cocktail".to_string()
}

/// Recipe as authored in a recipe book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeTemplate {
    /// Ingredient text to raw quantity, in pour order
    pub ingredients: OrderedEntries<RawQuantity>,
    #[serde(default)]
    pub optional: OrderedEntries<RawQuantity>,
    #[serde(default)]
    pub misc: Option<String>,
    #[serde(default)]
    pub garnish: Option<String>,
    #[serde(default = "default_unit")]
    pub unit: String,
    #[serde(default = "default_prep")]
    pub prep: String,
    #[serde(default = "default_ice")]
    pub ice: String,
    #[serde(default = "default_glass")]
    pub glass: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub info: String,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub tag: String,
}

impl RecipeTemplate {
    /// Template with only required ingredients and default metadata
    pub fn new(ingredients: Vec<(&str, RawQuantity)>) -> Self {
        Self {
            ingredients: ingredients
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            optional: OrderedEntries::default(),
            misc: None,
            garnish: None,
            unit: default_unit(),
            prep: default_prep(),
            ice: default_ice(),
            glass: default_glass(),
            variants: Vec::new(),
            info: String::new(),
            origin: String::new(),
            style: String::new(),
            tag: String::new(),
        }
    }
}

/// A drink recipe ready for expansion and display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recipe {
    pub name: String,
    /// Unit the recipe is costed and displayed in
    pub unit: Unit,
    pub prep: String,
    pub ice: String,
    pub glass: String,
    pub info: String,
    pub origin: String,
    pub style: String,
    pub tag: String,
    pub variants: Vec<String>,
    pub ingredients: Vec<IngredientLine>,
    /// Assemblies from the latest expansion; empty means it cannot be made
    pub examples: Vec<Example>,
    pub max_cost: f64,
}

impl Recipe {
    /// Build a recipe from its template; malformed specifiers stop the recipe
    pub fn from_template(name: &str, template: &RecipeTemplate) -> Result<Self, RecipeError> {
        let unit: Unit = template.unit.parse().map_err(|_| RecipeError::InvalidRecipeUnit {
            recipe: name.to_string(),
            unit: template.unit.clone(),
        })?;
        if !unit.is_recipe_unit() {
            return Err(RecipeError::InvalidRecipeUnit {
                recipe: name.to_string(),
                unit: template.unit.clone(),
            });
        }

        let mut ingredients = Vec::new();
        let required = template.ingredients.iter().map(|entry| (entry, false));
        let optional = template.optional.iter().map(|entry| (entry, true));
        for ((type_text, raw), is_optional) in required.chain(optional) {
            let specifier = IngredientSpecifier::parse(type_text).map_err(|source| {
                RecipeError::Specifier {
                    recipe: name.to_string(),
                    source,
                }
            })?;
            let parsed = parse_quantity(raw, unit)?;
            let mut line = QuantizedIngredient::new(specifier, parsed.amount, parsed.unit);
            if parsed.top_with {
                line = line.topped();
            }
            if is_optional {
                line = line.optional();
            }
            ingredients.push(IngredientLine::Quantized(line));
        }
        if let Some(misc) = &template.misc {
            ingredients.push(IngredientLine::Misc(misc.clone()));
        }
        if let Some(garnish) = &template.garnish {
            ingredients.push(IngredientLine::Garnish(garnish.clone()));
        }

        debug!("Built recipe '{}' with {} lines", name, ingredients.len());

        Ok(Self {
            name: name.to_string(),
            unit,
            prep: template.prep.clone(),
            ice: template.ice.clone(),
            glass: template.glass.clone(),
            info: template.info.clone(),
            origin: template.origin.clone(),
            style: template.style.clone(),
            tag: template.tag.clone(),
            variants: template.variants.clone(),
            ingredients,
            examples: Vec::new(),
            max_cost: 0.0,
        })
    }

    /// Required measured lines that take part in expansion
    pub fn expandable_ingredients(&self) -> Vec<&QuantizedIngredient> {
        self.ingredients
            .iter()
            .filter_map(IngredientLine::as_quantized)
            .filter(|q| !q.is_optional() && !q.is_literal())
            .collect()
    }

    /// Replace the examples and max cost with a fresh expansion result
    pub fn apply(&mut self, result: ExpansionResult) {
        self.examples = result.examples;
        self.max_cost = result.max_cost;
    }

    /// Expand against `catalog` and store the result on this recipe
    pub fn refresh_examples<C: StockCatalog + ?Sized>(
        &mut self,
        catalog: &C,
    ) -> Result<&[Example], ExpansionError> {
        let result = expand(self, catalog)?;
        self.apply(result);
        Ok(&self.examples)
    }

    pub fn can_make(&self) -> bool {
        !self.examples.is_empty()
    }

    /// Expand against `catalog`, then convert the lines for display.
    ///
    /// Costs and std drinks come from the authored amounts, so a rounded
    /// display unit never changes them.
    pub fn prepare_for_display<C: StockCatalog + ?Sized>(
        &mut self,
        catalog: &C,
        config: &EngineConfig,
    ) -> Result<(), ExpansionError> {
        self.refresh_examples(catalog)?;
        if let Err(e) = self.convert(
            config.display_unit,
            config.rounded_display,
            config.convert_nonstandard,
        ) {
            warn!("Leaving {} in {}: {}", self.name, self.unit, e);
        }
        Ok(())
    }

    /// Convert every measured line to `to_unit`.
    ///
    /// Dash and drop lines keep their unit unless `convert_nonstandard` is set.
    /// Example volumes are rescaled exactly; `rounded` only affects the lines.
    pub fn convert(
        &mut self,
        to_unit: Unit,
        rounded: bool,
        convert_nonstandard: bool,
    ) -> Result<(), ConversionError> {
        if !to_unit.is_recipe_unit() {
            return Err(ConversionError::Unsupported {
                from: self.unit.to_string(),
                to: to_unit.to_string(),
            });
        }
        if self.unit == to_unit {
            return Ok(());
        }
        let mut converted = self.ingredients.clone();
        for line in converted.iter_mut() {
            if let IngredientLine::Quantized(q) = line {
                if q.unit().is_nonstandard() && !convert_nonstandard {
                    continue;
                }
                q.convert(to_unit, rounded)?;
            }
        }
        let volumes = self
            .examples
            .iter()
            .map(|e| convert(e.volume, self.unit, to_unit, false))
            .collect::<Result<Vec<f64>, _>>()?;
        for (example, volume) in self.examples.iter_mut().zip(volumes) {
            example.volume = volume;
        }
        self.ingredients = converted;
        self.unit = to_unit;
        Ok(())
    }

    /// Glass, ice and prep on one line
    pub fn prep_line(&self, extended: bool, caps: bool) -> String {
        let line = if extended {
            let ice_word = if self.ice == "neat" { "" } else { " ice" };
            format!("{} glass | {}{} | {}", self.glass, self.ice, ice_word, self.prep)
        } else {
            format!("{} | {} | {}", self.glass, self.ice, self.prep)
        };
        if caps {
            line.to_uppercase()
        } else {
            line.to_lowercase()
        }
    }

    /// Type of the largest required pour, ignoring top-with and literal lines
    pub fn primary_spirit(&self) -> Option<&str> {
        let mut best: Option<(f64, &str)> = None;
        for line in self.expandable_ingredients() {
            if line.is_top_with() {
                continue;
            }
            let Ok(Some(amount)) = line.single_amount_as(self.unit, false) else {
                continue;
            };
            if best.map_or(true, |(max, _)| amount > max) {
                best = Some((amount, line.specifier().type_query.as_str()));
            }
        }
        best.map(|(_, name)| name)
    }

    /// Whether any line mentions `needle`; optional, misc and garnish lines
    /// only count when `include_optional` is set
    pub fn contains_ingredient(&self, needle: &str, include_optional: bool) -> bool {
        self.ingredients.iter().any(|line| {
            let counted = match line {
                IngredientLine::Quantized(q) => include_optional || !q.is_optional(),
                IngredientLine::Misc(_) | IngredientLine::Garnish(_) => include_optional,
            };
            counted && line.mentions(needle)
        })
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        for line in &self.ingredients {
            writeln!(f, "{}", line)?;
        }
        if !self.variants.is_empty() {
            writeln!(f, "\tVariants:")?;
            for variant in &self.variants {
                writeln!(f, "\t{}", variant)?;
            }
        }
        Ok(())
    }
}
