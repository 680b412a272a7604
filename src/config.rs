//! # Configuration Module
//!
//! Engine settings with sensible defaults, optionally overridden from
//! `BARMENU_*` environment variables (a `.env` file is honoured by the binary).

use crate::errors::ConfigError;
use crate::stock::ResolutionRules;
use crate::units::Unit;
use std::env;
use std::str::FromStr;

pub const DEFAULT_MARKUP: f64 = 1.2;

pub const ENV_UNIT: &str = "BARMENU_UNIT";
pub const ENV_ROUNDED: &str = "BARMENU_ROUNDED";
pub const ENV_CONVERT_NONSTANDARD: &str = "BARMENU_CONVERT_NONSTANDARD";
pub const ENV_INCLUDE_ALL: &str = "BARMENU_INCLUDE_ALL";
pub const ENV_MARKUP: &str = "BARMENU_MARKUP";
pub const ENV_ANY_SPIRIT: &str = "BARMENU_ANY_SPIRIT";
pub const ENV_LOG_FORMAT: &str = "BARMENU_LOG_FORMAT";

/// Log output style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines via env_logger
    #[default]
    Plain,
    /// One JSON object per record via tracing-subscriber
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" | "text" => Ok(LogFormat::Plain),
            "json" => Ok(LogFormat::Json),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_LOG_FORMAT.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Settings for expansion and menu output
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Unit recipes are converted to before display (oz, mL or cL)
    pub display_unit: Unit,
    /// Use 30 mL/oz and 5 mL/tsp when converting for display
    pub rounded_display: bool,
    /// Also convert dash and drop lines to the display unit
    pub convert_nonstandard: bool,
    /// Resolve against out-of-stock rows too
    pub include_all_stock: bool,
    /// Multiplier applied to ingredient cost for menu prices
    pub markup: f64,
    /// Replacement "any spirit" allow-list; `None` keeps the built-in list
    pub any_spirit_types: Option<Vec<String>>,
    pub log_format: LogFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_unit: Unit::Oz,
            rounded_display: true,
            convert_nonstandard: false,
            include_all_stock: false,
            markup: DEFAULT_MARKUP,
            any_spirit_types: None,
            log_format: LogFormat::Plain,
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

impl EngineConfig {
    /// Defaults overridden by any `BARMENU_*` variables that are set
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_UNIT) {
            let unit: Unit = value.parse().map_err(|_| invalid(ENV_UNIT, &value))?;
            if !unit.is_recipe_unit() {
                return Err(invalid(ENV_UNIT, &value));
            }
            config.display_unit = unit;
        }
        if let Some(value) = lookup(ENV_ROUNDED) {
            config.rounded_display = parse_bool(ENV_ROUNDED, &value)?;
        }
        if let Some(value) = lookup(ENV_CONVERT_NONSTANDARD) {
            config.convert_nonstandard = parse_bool(ENV_CONVERT_NONSTANDARD, &value)?;
        }
        if let Some(value) = lookup(ENV_INCLUDE_ALL) {
            config.include_all_stock = parse_bool(ENV_INCLUDE_ALL, &value)?;
        }
        if let Some(value) = lookup(ENV_MARKUP) {
            let markup: f64 = value.trim().parse().map_err(|_| invalid(ENV_MARKUP, &value))?;
            if !markup.is_finite() || markup <= 0.0 {
                return Err(invalid(ENV_MARKUP, &value));
            }
            config.markup = markup;
        }
        if let Some(value) = lookup(ENV_ANY_SPIRIT) {
            let types: Vec<String> = value
                .split(',')
                .map(|t| t.trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect();
            if types.is_empty() {
                return Err(invalid(ENV_ANY_SPIRIT, &value));
            }
            config.any_spirit_types = Some(types);
        }
        if let Some(value) = lookup(ENV_LOG_FORMAT) {
            config.log_format = value.parse()?;
        }

        Ok(config)
    }

    /// Catalog matching rules with any allow-list override applied
    pub fn resolution_rules(&self) -> ResolutionRules {
        let mut rules = ResolutionRules::default();
        if let Some(types) = &self.any_spirit_types {
            rules.any_spirit_types = types.clone();
        }
        rules
    }
}
