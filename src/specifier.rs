//! # Ingredient Specifier
//!
//! A recipe names its ingredients by type ("dry gin") and may pin one
//! specific product with `type:product` ("aromatic bitters:Angostura").
//! A parenthetical qualifier in the type ("lime juice (fresh)") is kept for
//! display but ignored when matching against stock.

use crate::errors::SpecifierError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parsed reference to an ingredient, optionally pinned to one product
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IngredientSpecifier {
    /// The requested type as written, without any qualifier
    pub type_query: String,
    /// Specific product required by the recipe
    pub product_name: Option<String>,
    /// Parenthetical qualifier, e.g. "(fresh)"
    pub qualifier: Option<String>,
}

impl IngredientSpecifier {
    /// Build a specifier from a type (which may carry a qualifier) and an optional product
    pub fn new(type_text: &str, product_name: Option<&str>) -> Result<Self, SpecifierError> {
        let type_text = type_text.trim();
        let (type_query, qualifier) = match (type_text.find('('), type_text.rfind(')')) {
            (Some(open), Some(close)) if open < close => (
                type_text[..open].trim().to_string(),
                Some(type_text[open..].trim().to_string()),
            ),
            _ => (type_text.to_string(), None),
        };

        if type_query.is_empty() {
            return Err(SpecifierError::EmptyType(type_text.to_string()));
        }

        let product_name = product_name
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);

        Ok(Self {
            type_query,
            product_name,
            qualifier,
        })
    }

    /// Parse `"<type>"` or `"<type>:<product>"`
    pub fn parse(text: &str) -> Result<Self, SpecifierError> {
        let parts: Vec<&str> = text.split(':').collect();
        match parts.as_slice() {
            [type_text] => Self::new(type_text, None),
            [type_text, product] => Self::new(type_text, Some(product)),
            _ => Err(SpecifierError::TooManySeparators(text.to_string())),
        }
    }

    /// Lower-cased type used for catalog matching
    pub fn normalized_type(&self) -> String {
        self.type_query.to_lowercase()
    }

    pub fn is_pinned(&self) -> bool {
        self.product_name.is_some()
    }

    /// Case-insensitive substring test against the type and the pinned product
    pub fn mentions(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.type_query.to_lowercase().contains(&needle)
            || self
                .product_name
                .as_ref()
                .is_some_and(|p| p.to_lowercase().contains(&needle))
    }

    /// Key form `type:product` used in diagnostics
    pub fn key(&self) -> String {
        format!(
            "{}:{}",
            self.type_query,
            self.product_name.as_deref().unwrap_or("")
        )
    }
}

impl fmt::Display for IngredientSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(product) = &self.product_name {
            return write!(f, "{}", product);
        }
        write!(f, "{}", self.type_query)?;
        if let Some(qualifier) = &self.qualifier {
            write!(f, " {}", qualifier)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_only() {
        let spec = IngredientSpecifier::parse("dry gin").unwrap();
        assert_eq!(spec.type_query, "dry gin");
        assert_eq!(spec.product_name, None);
        assert_eq!(spec.to_string(), "dry gin");
    }

    #[test]
    fn test_parse_pinned_product() {
        let spec = IngredientSpecifier::parse("aromatic bitters:Angostura").unwrap();
        assert_eq!(spec.type_query, "aromatic bitters");
        assert_eq!(spec.product_name.as_deref(), Some("Angostura"));
        assert_eq!(spec.to_string(), "Angostura");
        assert_eq!(spec.key(), "aromatic bitters:Angostura");
    }

    #[test]
    fn test_qualifier_kept_for_display_only() {
        let spec = IngredientSpecifier::parse("Lime Juice (fresh)").unwrap();
        assert_eq!(spec.type_query, "Lime Juice");
        assert_eq!(spec.normalized_type(), "lime juice");
        assert_eq!(spec.qualifier.as_deref(), Some("(fresh)"));
        assert_eq!(spec.to_string(), "Lime Juice (fresh)");
    }

    #[test]
    fn test_malformed_specifiers() {
        assert_eq!(
            IngredientSpecifier::parse("gin:a:b"),
            Err(SpecifierError::TooManySeparators("gin:a:b".to_string()))
        );
        assert!(matches!(
            IngredientSpecifier::parse(""),
            Err(SpecifierError::EmptyType(_))
        ));
        assert!(matches!(
            IngredientSpecifier::parse(":Beefeater"),
            Err(SpecifierError::EmptyType(_))
        ));
        assert!(matches!(
            IngredientSpecifier::parse("(fresh)"),
            Err(SpecifierError::EmptyType(_))
        ));
    }

    #[test]
    fn test_empty_product_is_unpinned() {
        let spec = IngredientSpecifier::parse("dry gin:").unwrap();
        assert!(!spec.is_pinned());
    }

    #[test]
    fn test_mentions() {
        let spec = IngredientSpecifier::parse("rye whiskey:Bulleit Rye").unwrap();
        assert!(spec.mentions("WHISKEY"));
        assert!(spec.mentions("bulleit"));
        assert!(!spec.mentions("gin"));
    }
}
