//! # Quantity Patterns Module
//!
//! Regex grammar for the free-text quantities found in recipe templates
//! ("2 dashes", "1 to 2 drops", "1/2 tsp", "Top with").

use lazy_static::lazy_static;
use regex::Regex;

// Leading count for dash/drop amounts: an integer range, a plain count, or an article
const COUNT_PREFIX: &str = r"(?:(?P<low>\d+)\s*(?:to|-|–)\s*(?P<high>\d+)|(?P<count>\d+(?:\.\d+)?)|an?|one)?";

pub const TOP_WITH_PATTERN: &str = r"(?i)^top(?:\s+up)?\s+with$";

pub const TSP_PATTERN: &str =
    r"(?i)^(?P<qty>\d+\s+\d+\s*/\s*\d+|\d+\s*/\s*\d+|\d*\.?\d+)\s*(?:tsp|teaspoons?)\.?$";

/// Spelled-out counts accepted as display-only amounts
pub const SPELLED_COUNTS: [&str; 8] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight",
];

lazy_static! {
    pub static ref TOP_WITH_REGEX: Regex =
        Regex::new(TOP_WITH_PATTERN).expect("Top-with pattern should be valid");
    pub static ref DASH_REGEX: Regex =
        Regex::new(&format!(r"(?i)^{}\s*dash(?:es)?$", COUNT_PREFIX))
            .expect("Dash pattern should be valid");
    pub static ref DROP_REGEX: Regex =
        Regex::new(&format!(r"(?i)^{}\s*drops?$", COUNT_PREFIX))
            .expect("Drop pattern should be valid");
    pub static ref TSP_REGEX: Regex =
        Regex::new(TSP_PATTERN).expect("Teaspoon pattern should be valid");
}
