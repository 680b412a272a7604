//! # Units Module
//!
//! Volume and dose units used by bar recipes, and the pure conversion
//! arithmetic between them.
//!
//! All conversions route through millilitres. Ounces and teaspoons have two
//! constant sets: the precise ones used for cost and alcohol math, and the
//! rounded ones (30 mL/oz, 5 mL/tsp) that read better on a printed menu.
//!
//! ```rust
//! use barmenu::units::{convert, Unit};
//!
//! let ml = convert(1.0, Unit::Oz, Unit::Ml, false)?;
//! assert!((ml - 29.5735).abs() < 1e-9);
//! assert_eq!(convert(1.0, Unit::Oz, Unit::Ml, true)?, 30.0);
//! # Ok::<(), barmenu::errors::ConversionError>(())
//! ```

use crate::errors::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const ML_PER_OZ: f64 = 29.5735;
pub const ML_PER_OZ_ROUNDED: f64 = 30.0;
pub const ML_PER_TSP: f64 = 4.92892;
pub const ML_PER_TSP_ROUNDED: f64 = 5.0;
pub const ML_PER_DASH: f64 = 0.92;
pub const ML_PER_DROP: f64 = 0.12;
pub const ML_PER_CL: f64 = 10.0;

/// Ounces of 40% spirit in one US standard drink
pub const OZ_PER_STD_DRINK: f64 = 1.5;

/// Largest denominator used when rendering amounts as fractions
pub const MAX_DISPLAY_DENOMINATOR: i64 = 99;

const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Units a recipe line can be measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "oz")]
    Oz,
    #[serde(rename = "mL")]
    Ml,
    #[serde(rename = "cL")]
    Cl,
    #[serde(rename = "tsp")]
    Tsp,
    #[serde(rename = "ds")]
    Dash,
    #[serde(rename = "drop")]
    Drop,
    /// Display-only amount ("one", "Splash"); passes through conversion untouched
    #[serde(rename = "literal")]
    Literal,
}

impl Unit {
    pub const ALL: [Unit; 7] = [
        Unit::Oz,
        Unit::Ml,
        Unit::Cl,
        Unit::Tsp,
        Unit::Dash,
        Unit::Drop,
        Unit::Literal,
    ];

    /// Canonical short name, as used in templates and rendering
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Oz => "oz",
            Unit::Ml => "mL",
            Unit::Cl => "cL",
            Unit::Tsp => "tsp",
            Unit::Dash => "ds",
            Unit::Drop => "drop",
            Unit::Literal => "literal",
        }
    }

    /// Units a whole recipe may be declared in
    pub fn is_recipe_unit(&self) -> bool {
        matches!(self, Unit::Oz | Unit::Ml | Unit::Cl)
    }

    /// Dashes and drops count discrete additions rather than measured pours
    pub fn is_nonstandard(&self) -> bool {
        matches!(self, Unit::Dash | Unit::Drop)
    }

    fn ml_per_unit(&self, rounded: bool) -> Option<f64> {
        match self {
            Unit::Oz if rounded => Some(ML_PER_OZ_ROUNDED),
            Unit::Oz => Some(ML_PER_OZ),
            Unit::Tsp if rounded => Some(ML_PER_TSP_ROUNDED),
            Unit::Tsp => Some(ML_PER_TSP),
            Unit::Ml => Some(1.0),
            Unit::Cl => Some(ML_PER_CL),
            Unit::Dash => Some(ML_PER_DASH),
            Unit::Drop => Some(ML_PER_DROP),
            Unit::Literal => None,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Unit {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "oz" | "ounce" | "ounces" => Ok(Unit::Oz),
            "ml" => Ok(Unit::Ml),
            "cl" => Ok(Unit::Cl),
            "tsp" | "teaspoon" | "teaspoons" => Ok(Unit::Tsp),
            "ds" | "dash" | "dashes" => Ok(Unit::Dash),
            "drop" | "drops" => Ok(Unit::Drop),
            "literal" => Ok(Unit::Literal),
            other => Err(ConversionError::UnknownUnit(other.to_string())),
        }
    }
}

/// Convert `amount` between two units.
///
/// Identical units return the input unchanged. A literal source passes the
/// amount through untouched; converting a measured amount into a literal has
/// no defined path and fails.
pub fn convert(amount: f64, from: Unit, to: Unit, rounded: bool) -> Result<f64, ConversionError> {
    if from == to || from == Unit::Literal {
        return Ok(amount);
    }
    match (from.ml_per_unit(rounded), to.ml_per_unit(rounded)) {
        (Some(from_ml), Some(to_ml)) => Ok(amount * from_ml / to_ml),
        _ => Err(ConversionError::Unsupported {
            from: from.to_string(),
            to: to.to_string(),
        }),
    }
}

/// US standard drinks in `amount` of a product at `abv_percent`
pub fn standard_drinks(abv_percent: f64, amount: f64, unit: Unit) -> Result<f64, ConversionError> {
    let oz = convert(amount, unit, Unit::Oz, false)?;
    Ok((abv_percent / 40.0) * (oz / OZ_PER_STD_DRINK))
}

/// Estimated ABV of a drink holding `std_drinks` in `volume` of `unit`
pub fn estimate_abv(std_drinks: f64, volume: f64, unit: Unit) -> Result<f64, ConversionError> {
    if volume <= 0.0 {
        return Ok(0.0);
    }
    let per_std_drink = convert(OZ_PER_STD_DRINK, Unit::Oz, unit, false)?;
    Ok(40.0 * (std_drinks * per_std_drink / volume))
}

/// Best rational approximation of `value` with a denominator of at most `max_denominator`
pub fn reduce_fraction(value: f64, max_denominator: i64) -> (i64, i64) {
    if !value.is_finite() {
        return (0, 1);
    }
    let negative = value < 0.0;
    let target = value.abs();
    // past 2^53 every f64 is already whole
    if target >= MAX_EXACT_INTEGER {
        return (value.round() as i64, 1);
    }

    // convergents of the continued fraction
    let (mut p0, mut q0, mut p1, mut q1) = (0i64, 1i64, 1i64, 0i64);
    let mut x = target;
    loop {
        let a = x.floor();
        let a_int = a as i64;
        let Some(q2) = a_int.checked_mul(q1).and_then(|n| n.checked_add(q0)) else {
            break;
        };
        if q2 > max_denominator {
            break;
        }
        let Some(p2) = a_int.checked_mul(p1).and_then(|n| n.checked_add(p0)) else {
            break;
        };
        p0 = p1;
        q0 = q1;
        p1 = p2;
        q1 = q2;
        let frac = x - a;
        if frac < 1e-9 || (p1 as f64 / q1 as f64 - target).abs() < 1e-12 {
            break;
        }
        x = 1.0 / frac;
    }

    let (mut numer, mut denom) = (p1, q1);
    if q1 > 0 {
        // semiconvergent that may sit closer within the bound
        let k = (max_denominator - q0) / q1;
        let semi = k
            .checked_mul(p1)
            .and_then(|n| n.checked_add(p0))
            .zip(k.checked_mul(q1).and_then(|n| n.checked_add(q0)));
        if let Some((sp, sq)) = semi.filter(|&(_, sq)| sq > 0 && sq <= max_denominator) {
            if (sp as f64 / sq as f64 - target).abs() < (p1 as f64 / q1 as f64 - target).abs() {
                numer = sp;
                denom = sq;
            }
        }
    } else {
        numer = target.round() as i64;
        denom = 1;
    }

    if negative {
        (-numer, denom)
    } else {
        (numer, denom)
    }
}

/// Render an amount as a whole number plus a reduced fraction ("1 1/2", "3/4", "2")
pub fn to_fraction(amount: f64) -> String {
    let (numer, denom) = reduce_fraction(amount, MAX_DISPLAY_DENOMINATOR);
    if denom == 1 {
        return numer.to_string();
    }
    let whole = numer / denom;
    let rem = numer % denom;
    if whole > 0 {
        format!("{} {}/{}", whole, rem, denom)
    } else {
        format!("{}/{}", rem, denom)
    }
}
