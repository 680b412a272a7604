//! # Ingredient Parser
//!
//! This module turns the raw quantity written in a recipe template into a
//! tagged [`Amount`] and the [`Unit`] it is measured in.
//!
//! ## Features
//!
//! - Numbers are taken as-is in the recipe's declared unit
//! - Two-element arrays are ranges in the recipe's declared unit
//! - "Top with" counts as a 3 oz pour
//! - Dashes and drops: "dash", "a dash", "2 dashes", "2 to 3 dashes"
//! - Teaspoons with decimals or fractions: "1/2 tsp", "1 1/2 tsp"
//! - Spelled-out counts ("two") and anything unrecognized become literal text
//!
//! Unrecognized text never fails: the line degrades to a display-only literal.
//!
//! ## Usage
//!
//! ```rust
//! use barmenu::ingredient_parser::{parse_quantity, RawQuantity};
//! use barmenu::ingredient_model::Amount;
//! use barmenu::units::Unit;
//!
//! let parsed = parse_quantity(&RawQuantity::Text("2 dashes".to_string()), Unit::Oz)?;
//! assert_eq!(parsed.unit, Unit::Dash);
//! assert_eq!(parsed.amount, Amount::Scalar(2.0));
//! # Ok::<(), barmenu::errors::ConversionError>(())
//! ```

use crate::errors::ConversionError;
use crate::ingredient_model::Amount;
use crate::quantity_patterns::{DASH_REGEX, DROP_REGEX, SPELLED_COUNTS, TOP_WITH_REGEX, TSP_REGEX};
use crate::units::{convert, Unit};
use log::{debug, warn};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

/// Ounces a "Top with" pour is assumed to add
pub const TOP_WITH_OZ: f64 = 3.0;

/// Quantity exactly as it appears in a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(f64),
    Range(f64, f64),
    Text(String),
}

impl From<f64> for RawQuantity {
    fn from(value: f64) -> Self {
        RawQuantity::Number(value)
    }
}

impl From<&str> for RawQuantity {
    fn from(text: &str) -> Self {
        RawQuantity::Text(text.to_string())
    }
}

/// Result of interpreting one raw quantity
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuantity {
    pub amount: Amount,
    pub unit: Unit,
    pub top_with: bool,
}

impl ParsedQuantity {
    fn measured(amount: Amount, unit: Unit) -> Self {
        Self {
            amount,
            unit,
            top_with: false,
        }
    }

    fn literal(text: &str) -> Self {
        Self::measured(Amount::Literal(text.to_string()), Unit::Literal)
    }
}

/// Interpret a raw quantity for a recipe declared in `recipe_unit`
pub fn parse_quantity(raw: &RawQuantity, recipe_unit: Unit) -> Result<ParsedQuantity, ConversionError> {
    match raw {
        RawQuantity::Number(value) => Ok(ParsedQuantity::measured(Amount::Scalar(*value), recipe_unit)),
        RawQuantity::Range(low, high) => {
            Ok(ParsedQuantity::measured(Amount::Range(*low, *high), recipe_unit))
        }
        RawQuantity::Text(text) => parse_quantity_text(text, recipe_unit),
    }
}

/// Classify quantity text by keyword, in priority order
pub fn parse_quantity_text(text: &str, recipe_unit: Unit) -> Result<ParsedQuantity, ConversionError> {
    let text = text.trim();
    let lower = text.to_lowercase();

    if TOP_WITH_REGEX.is_match(text) {
        let amount = convert(TOP_WITH_OZ, Unit::Oz, recipe_unit, true)?;
        return Ok(ParsedQuantity {
            amount: Amount::Scalar(amount),
            unit: recipe_unit,
            top_with: true,
        });
    }

    let parsed = if lower.contains("dash") {
        parse_count(&DASH_REGEX, text, Unit::Dash)
    } else if lower.contains("tsp") || lower.contains("teaspoon") {
        parse_teaspoons(text)
    } else if lower.contains("drop") {
        parse_count(&DROP_REGEX, text, Unit::Drop)
    } else if SPELLED_COUNTS.contains(&lower.as_str()) {
        debug!("Spelled-out quantity '{}' kept as literal", text);
        Some(ParsedQuantity::literal(text))
    } else {
        None
    };

    Ok(parsed.unwrap_or_else(|| {
        warn!("Unrecognized quantity '{}', keeping it as display text", text);
        ParsedQuantity::literal(text)
    }))
}

fn parse_count(pattern: &Regex, text: &str, unit: Unit) -> Option<ParsedQuantity> {
    let captures = pattern.captures(text)?;
    let amount = match (number(&captures, "low"), number(&captures, "high"), number(&captures, "count")) {
        (Some(low), Some(high), _) => Amount::Range(low, high),
        (_, _, Some(count)) => Amount::Scalar(count),
        _ => Amount::Scalar(1.0),
    };
    Some(ParsedQuantity::measured(amount, unit))
}

fn parse_teaspoons(text: &str) -> Option<ParsedQuantity> {
    let captures = TSP_REGEX.captures(text)?;
    let amount = parse_decimal_or_fraction(captures.name("qty")?.as_str())?;
    Some(ParsedQuantity::measured(Amount::Scalar(amount), Unit::Tsp))
}

fn number(captures: &Captures, name: &str) -> Option<f64> {
    captures.name(name).and_then(|m| m.as_str().parse().ok())
}

/// Parse "0.5", ".5", "1/2" or "1 1/2"
pub fn parse_decimal_or_fraction(text: &str) -> Option<f64> {
    let text = text.trim();
    if let Ok(value) = text.parse::<f64>() {
        return Some(value);
    }

    let (whole, fraction) = match text.split_once(char::is_whitespace) {
        Some((whole, rest)) if rest.contains('/') => (whole.trim().parse::<f64>().ok()?, rest),
        _ => (0.0, text),
    };
    let (numerator, denominator) = fraction.split_once('/')?;
    let numerator: f64 = numerator.trim().parse().ok()?;
    let denominator: f64 = denominator.trim().parse().ok()?;
    if denominator == 0.0 {
        return None;
    }
    Some(whole + numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(raw: &str) -> ParsedQuantity {
        parse_quantity(&RawQuantity::from(raw), Unit::Oz).unwrap()
    }

    #[test]
    fn test_numeric_uses_recipe_unit() {
        let parsed = parse_quantity(&RawQuantity::from(2.5), Unit::Ml).unwrap();
        assert_eq!(parsed.amount, Amount::Scalar(2.5));
        assert_eq!(parsed.unit, Unit::Ml);

        let parsed = parse_quantity(&RawQuantity::Range(0.5, 0.75), Unit::Oz).unwrap();
        assert_eq!(parsed.amount, Amount::Range(0.5, 0.75));
    }

    #[test]
    fn test_top_with() {
        let parsed = text("Top with");
        assert!(parsed.top_with);
        assert_eq!(parsed.amount, Amount::Scalar(3.0));
        assert_eq!(parsed.unit, Unit::Oz);

        let parsed = parse_quantity(&RawQuantity::from("Top with"), Unit::Ml).unwrap();
        assert_eq!(parsed.amount, Amount::Scalar(90.0));
        assert_eq!(parsed.unit, Unit::Ml);
    }

    #[test]
    fn test_dashes() {
        assert_eq!(text("dash").amount, Amount::Scalar(1.0));
        assert_eq!(text("a dash").amount, Amount::Scalar(1.0));
        let two = text("2 dashes");
        assert_eq!(two.unit, Unit::Dash);
        assert_eq!(two.amount, Amount::Scalar(2.0));
        assert_eq!(text("2 to 3 dashes").amount, Amount::Range(2.0, 3.0));
    }

    #[test]
    fn test_drops() {
        let drops = text("3 drops");
        assert_eq!(drops.unit, Unit::Drop);
        assert_eq!(drops.amount, Amount::Scalar(3.0));
        assert_eq!(text("drop").amount, Amount::Scalar(1.0));
    }

    #[test]
    fn test_teaspoons() {
        let tsp = text("1/2 tsp");
        assert_eq!(tsp.unit, Unit::Tsp);
        assert_eq!(tsp.amount, Amount::Scalar(0.5));
        assert_eq!(text("1 1/2 tsp").amount, Amount::Scalar(1.5));
        assert_eq!(text("0.25 tsp").amount, Amount::Scalar(0.25));
    }

    #[test]
    fn test_spelled_counts_are_literal() {
        let two = text("two");
        assert_eq!(two.unit, Unit::Literal);
        assert_eq!(two.amount, Amount::Literal("two".to_string()));
    }

    #[test]
    fn test_unrecognized_degrades_to_literal() {
        for raw in ["Splash", "several dashes", "heaping tsp", "1/0 tsp", "to taste"] {
            let parsed = text(raw);
            assert_eq!(parsed.unit, Unit::Literal, "{}", raw);
            assert_eq!(parsed.amount, Amount::Literal(raw.to_string()));
            assert!(!parsed.top_with);
        }
    }

    #[test]
    fn test_dash_wins_over_tsp() {
        // keyword priority: dash is checked before tsp
        let parsed = text("dash tsp");
        assert_eq!(parsed.unit, Unit::Literal);
    }

    #[test]
    fn test_parse_decimal_or_fraction() {
        assert_eq!(parse_decimal_or_fraction(".5"), Some(0.5));
        assert_eq!(parse_decimal_or_fraction("3/4"), Some(0.75));
        assert_eq!(parse_decimal_or_fraction("2 1/4"), Some(2.25));
        assert_eq!(parse_decimal_or_fraction("1/0"), None);
        assert_eq!(parse_decimal_or_fraction("abc"), None);
    }

    #[test]
    fn test_raw_quantity_deserialization() {
        let raw: Vec<RawQuantity> = serde_json::from_str(r#"[2, [1, 2], "dash"]"#).unwrap();
        assert_eq!(
            raw,
            vec![
                RawQuantity::Number(2.0),
                RawQuantity::Range(1.0, 2.0),
                RawQuantity::Text("dash".to_string()),
            ]
        );
    }
}
