//! # Ingredient and Quantity Data Model
//!
//! This module defines the recipe-side view of an ingredient: what the recipe
//! asks for (an [`IngredientSpecifier`]), how much of it (an [`Amount`] in a
//! [`Unit`]), and how that line reads on a menu.
//!
//! ## Core Concepts
//!
//! - **Amount**: a scalar, an inclusive range, or display-only literal text
//! - **QuantizedIngredient**: one measured recipe line; unit and amount only
//!   ever change together, through conversion
//! - **IngredientLine**: any line of a recipe, including free-text misc and
//!   garnish lines that take no part in costing
//!
//! ## Usage
//!
//! ```rust
//! use barmenu::ingredient_model::{Amount, QuantizedIngredient};
//! use barmenu::specifier::IngredientSpecifier;
//! use barmenu::units::Unit;
//!
//! let gin = QuantizedIngredient::new(
//!     IngredientSpecifier::parse("dry gin")?,
//!     Amount::Scalar(1.5),
//!     Unit::Oz,
//! );
//! assert_eq!(gin.to_string(), "1 1/2 oz dry gin");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::errors::ConversionError;
use crate::specifier::IngredientSpecifier;
use crate::units::{convert, to_fraction, Unit};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How much of an ingredient a line calls for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Amount {
    /// Single measured amount (e.g. 1.5 oz)
    Scalar(f64),

    /// Inclusive range (e.g. "2 to 3 dashes")
    Range(f64, f64),

    /// Display-only text, never converted or costed (e.g. "one", "Splash")
    Literal(String),
}

impl Amount {
    /// Single numeric value; ranges collapse to their arithmetic mean
    pub fn single_value(&self) -> Option<f64> {
        match self {
            Amount::Scalar(value) => Some(*value),
            Amount::Range(low, high) => Some((low + high) / 2.0),
            Amount::Literal(_) => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Amount::Literal(_))
    }

    /// Convert bound-by-bound; literals pass through
    pub fn convert(&self, from: Unit, to: Unit, rounded: bool) -> Result<Amount, ConversionError> {
        Ok(match self {
            Amount::Scalar(value) => Amount::Scalar(convert(*value, from, to, rounded)?),
            Amount::Range(low, high) => Amount::Range(
                convert(*low, from, to, rounded)?,
                convert(*high, from, to, rounded)?,
            ),
            Amount::Literal(text) => Amount::Literal(text.clone()),
        })
    }
}

/// One measured line of a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizedIngredient {
    specifier: IngredientSpecifier,
    amount: Amount,
    unit: Unit,
    is_optional: bool,
    top_with: bool,
}

impl QuantizedIngredient {
    /// Create a required line; a literal amount forces the literal unit
    pub fn new(specifier: IngredientSpecifier, amount: Amount, unit: Unit) -> Self {
        let unit = if amount.is_literal() { Unit::Literal } else { unit };
        let amount = match (amount, unit) {
            (Amount::Scalar(v), Unit::Literal) => Amount::Literal(format_number(v)),
            (Amount::Range(low, high), Unit::Literal) => {
                Amount::Literal(format!("{} to {}", format_number(low), format_number(high)))
            }
            (amount, _) => amount,
        };
        Self {
            specifier,
            amount,
            unit,
            is_optional: false,
            top_with: false,
        }
    }

    /// Mark the line optional
    pub fn optional(mut self) -> Self {
        self.is_optional = true;
        self
    }

    /// Mark the line as a "top with" pour
    pub fn topped(mut self) -> Self {
        self.top_with = true;
        self
    }

    pub fn specifier(&self) -> &IngredientSpecifier {
        &self.specifier
    }

    pub fn amount(&self) -> &Amount {
        &self.amount
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    pub fn is_top_with(&self) -> bool {
        self.top_with
    }

    pub fn is_literal(&self) -> bool {
        self.unit == Unit::Literal
    }

    /// The amount expressed in another unit, without changing this line
    pub fn amount_as(&self, unit: Unit, rounded: bool) -> Result<Amount, ConversionError> {
        self.amount.convert(self.unit, unit, rounded)
    }

    /// Single value in `unit` (ranges averaged); `None` for literal lines
    pub fn single_amount_as(&self, unit: Unit, rounded: bool) -> Result<Option<f64>, ConversionError> {
        if self.is_literal() {
            return Ok(None);
        }
        Ok(self.amount_as(unit, rounded)?.single_value())
    }

    /// Convert in place; amount and unit are replaced together or not at all
    pub fn convert(&mut self, unit: Unit, rounded: bool) -> Result<(), ConversionError> {
        if self.is_literal() {
            return Ok(());
        }
        let amount = self.amount_as(unit, rounded)?;
        self.amount = amount;
        self.unit = unit;
        Ok(())
    }

    /// Menu text for this line, e.g. "2 dashes of Angostura"
    pub fn render(&self) -> String {
        let line = self.render_measure();
        if self.is_optional {
            format!("{} (optional)", line)
        } else {
            line
        }
    }

    fn render_measure(&self) -> String {
        let what = &self.specifier;
        if self.top_with {
            return format!("Top with {}", what);
        }
        match (&self.amount, self.unit) {
            (Amount::Literal(text), _) => format!("{} {}", text, what),
            (amount, Unit::Dash) => render_count(amount, "dash", "dashes", what),
            (amount, Unit::Drop) => render_count(amount, "drop", "drops", what),
            (amount, unit @ (Unit::Oz | Unit::Tsp)) => {
                format!("{} {} {}", render_bounds(amount, to_fraction), unit, what)
            }
            (amount, Unit::Ml) => format!("{} mL {}", render_bounds(amount, format_ml), what),
            (amount, Unit::Cl) => {
                format!("{} cL {}", render_bounds(amount, |v| format!("{:.1}", v)), what)
            }
            (amount, Unit::Literal) => format!("{} {}", render_bounds(amount, format_number), what),
        }
    }
}

impl fmt::Display for QuantizedIngredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Any line of a recipe as it appears on a menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IngredientLine {
    Quantized(QuantizedIngredient),
    /// Free-text instruction ("Muddle the mint")
    Misc(String),
    Garnish(String),
}

impl IngredientLine {
    pub fn as_quantized(&self) -> Option<&QuantizedIngredient> {
        match self {
            IngredientLine::Quantized(q) => Some(q),
            _ => None,
        }
    }

    pub fn render(&self) -> String {
        match self {
            IngredientLine::Quantized(q) => q.render(),
            IngredientLine::Misc(text) => text.clone(),
            IngredientLine::Garnish(text) => format!("{}, for garnish", text),
        }
    }

    /// Case-insensitive substring test against the line's ingredient text
    pub fn mentions(&self, needle: &str) -> bool {
        match self {
            IngredientLine::Quantized(q) => q.specifier.mentions(needle),
            IngredientLine::Misc(text) | IngredientLine::Garnish(text) => {
                text.to_lowercase().contains(&needle.to_lowercase())
            }
        }
    }
}

impl fmt::Display for IngredientLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn render_count(amount: &Amount, singular: &str, plural: &str, what: &IngredientSpecifier) -> String {
    match amount {
        Amount::Scalar(value) if *value == 1.0 => format!("a {} of {}", singular, what),
        Amount::Scalar(value) => format!("{} {} of {}", format_number(*value), plural, what),
        Amount::Range(low, high) => format!(
            "{} to {} {} of {}",
            format_number(*low),
            format_number(*high),
            plural,
            what
        ),
        Amount::Literal(text) => format!("{} {}", text, what),
    }
}

fn render_bounds(amount: &Amount, render: impl Fn(f64) -> String) -> String {
    match amount {
        Amount::Scalar(value) => render(*value),
        Amount::Range(low, high) => format!("{} to {}", render(*low), render(*high)),
        Amount::Literal(text) => text.clone(),
    }
}

/// Whole millilitres from 10 mL up, one decimal below
fn format_ml(value: f64) -> String {
    if value < 10.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.0}", value)
    }
}

/// Shortest plain rendering of a count ("2", "1.5")
pub(crate) fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
