//! # Error Types Module
//!
//! This module defines the error types used throughout the costing engine.
//! Per-line quantity anomalies are not errors (they degrade to literal lines);
//! everything here is fatal for the call that produced it.

use thiserror::Error;

/// No conversion path exists between two units
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The pair is known but cannot be converted (e.g. a volume into a literal)
    #[error("no conversion from {from} to {to}")]
    Unsupported { from: String, to: String },

    /// The unit name itself is not recognised
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// Malformed ingredient reference in a recipe template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpecifierError {
    /// The type part was empty or missing
    #[error("ingredient specifier has an empty type: '{0}'")]
    EmptyType(String),

    /// More than one ':' separator
    #[error("unknown ingredient specifier (more than one ':'): '{0}'")]
    TooManySeparators(String),
}

/// Catalog data problems that cannot be worked around
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// A fully-qualified specifier matched several stock rows
    #[error("{specifier} has {matches} entries in the stock data")]
    Integrity { specifier: String, matches: usize },
}

/// Failure building a recipe from its template
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecipeError {
    #[error("recipe '{recipe}': {source}")]
    Specifier {
        recipe: String,
        #[source]
        source: SpecifierError,
    },

    #[error("recipe '{recipe}': unit '{unit}' cannot be used as a recipe unit")]
    InvalidRecipeUnit { recipe: String, unit: String },

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Failure during expansion; both causes propagate unmodified
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExpansionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

/// Invalid environment configuration
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}
