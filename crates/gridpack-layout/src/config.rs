#![forbid(unsafe_code)]

//! Grid configuration.
//!
//! [`GridConfig`] carries the knobs a host can set on a packing panel: the
//! target column width, the height substituted when the host offers an
//! unconstrained height, and the fixed number of rows that make up one page
//! for downstream pagination.
//!
//! Values can be overridden from the environment:
//!
//! | Variable                 | Field                  |
//! |--------------------------|------------------------|
//! | `GRIDPACK_COLUMN_WIDTH`  | `desired_column_width` |
//! | `GRIDPACK_MAX_HEIGHT`    | `max_height_fallback`  |
//! | `GRIDPACK_ROWS_PER_PAGE` | `rows_per_page`        |

use std::env;
use std::fmt;

/// Default target column width.
pub const DEFAULT_COLUMN_WIDTH: f64 = 230.0;
/// Default rows per page for pagination consumers.
pub const DEFAULT_ROWS_PER_PAGE: usize = 4;

const ENV_COLUMN_WIDTH: &str = "GRIDPACK_COLUMN_WIDTH";
const ENV_MAX_HEIGHT: &str = "GRIDPACK_MAX_HEIGHT";
const ENV_ROWS_PER_PAGE: &str = "GRIDPACK_ROWS_PER_PAGE";

/// Layout configuration for a [`GridPanel`](crate::GridPanel).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Target width of one column. Must be finite and positive.
    pub desired_column_width: f64,
    /// Height used during sizing when the host passes an available height of 0.
    ///
    /// Serialized as `null` when unbounded (infinite).
    #[cfg_attr(feature = "serde", serde(with = "unbounded_height"))]
    pub max_height_fallback: f64,
    /// Rows per page; pagination sizes pages as `columns * rows_per_page`.
    pub rows_per_page: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            desired_column_width: DEFAULT_COLUMN_WIDTH,
            max_height_fallback: f64::INFINITY,
            rows_per_page: DEFAULT_ROWS_PER_PAGE,
        }
    }
}

/// Infinite fallback heights have no JSON number form; store them as `null`.
#[cfg(feature = "serde")]
mod unbounded_height {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(height: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        let bounded = height.is_finite().then_some(*height);
        bounded.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::INFINITY))
    }
}

/// Configuration parse diagnostics (env + validation).
#[derive(Debug, Clone)]
pub struct GridConfigParse {
    pub config: GridConfig,
    pub errors: Vec<ConfigError>,
}

/// Configuration error with field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: String,
}

impl ConfigError {
    pub(crate) fn new(
        field: &'static str,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl GridConfig {
    /// Set the target column width.
    #[must_use]
    pub fn with_column_width(mut self, width: f64) -> Self {
        self.desired_column_width = width;
        self
    }

    /// Set the fallback height for unconstrained sizing.
    #[must_use]
    pub fn with_max_height_fallback(mut self, height: f64) -> Self {
        self.max_height_fallback = height;
        self
    }

    /// Set the number of rows per page.
    #[must_use]
    pub fn with_rows_per_page(mut self, rows: usize) -> Self {
        self.rows_per_page = rows;
        self
    }

    /// Parse config from environment variables.
    #[must_use]
    pub fn from_env() -> GridConfig {
        Self::from_env_with_diagnostics().config
    }

    /// Parse config from environment variables and return diagnostics.
    #[must_use]
    pub fn from_env_with_diagnostics() -> GridConfigParse {
        from_env_with(|key| env::var(key).ok())
    }

    /// Validate config constraints and return all violations.
    pub fn validate(&self) -> Result<(), Vec<ConfigError>> {
        let mut errors = Vec::new();
        if let Err(err) = check_column_width(self.desired_column_width) {
            errors.push(err);
        }
        if let Err(err) = check_max_height(self.max_height_fallback) {
            errors.push(err);
        }
        if self.rows_per_page == 0 {
            errors.push(ConfigError::new(
                "rows_per_page",
                "0",
                "must be at least 1",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

pub(crate) fn check_column_width(width: f64) -> Result<(), ConfigError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(
            "desired_column_width",
            width.to_string(),
            "must be finite and greater than 0",
        ))
    }
}

pub(crate) fn check_max_height(height: f64) -> Result<(), ConfigError> {
    // Infinity is allowed: it means "no bound" to a measuring item.
    if height > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::new(
            "max_height_fallback",
            height.to_string(),
            "must be greater than 0",
        ))
    }
}

/// Parse config from an arbitrary variable lookup.
///
/// Unparseable values are reported and the default is kept.
pub fn from_env_with<F>(mut get: F) -> GridConfigParse
where
    F: FnMut(&str) -> Option<String>,
{
    let mut config = GridConfig::default();
    let mut errors = Vec::new();

    if let Some(value) = get(ENV_COLUMN_WIDTH) {
        match parse_f64(&value) {
            Some(parsed) => config.desired_column_width = parsed,
            None => errors.push(ConfigError::new(
                "desired_column_width",
                value,
                "expected positive number",
            )),
        }
    }

    if let Some(value) = get(ENV_MAX_HEIGHT) {
        match parse_f64(&value) {
            Some(parsed) => config.max_height_fallback = parsed,
            None => errors.push(ConfigError::new(
                "max_height_fallback",
                value,
                "expected positive number or inf",
            )),
        }
    }

    if let Some(value) = get(ENV_ROWS_PER_PAGE) {
        match value.trim().parse::<usize>() {
            Ok(parsed) => config.rows_per_page = parsed,
            Err(_) => errors.push(ConfigError::new(
                "rows_per_page",
                value,
                "expected positive integer",
            )),
        }
    }

    if let Err(mut invalid) = config.validate() {
        errors.append(&mut invalid);
        config = revert_invalid(config);
    }

    GridConfigParse { config, errors }
}

fn parse_f64(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok()
}

/// Reset every field that fails validation to its default.
fn revert_invalid(mut config: GridConfig) -> GridConfig {
    let defaults = GridConfig::default();
    if check_column_width(config.desired_column_width).is_err() {
        config.desired_column_width = defaults.desired_column_width;
    }
    if check_max_height(config.max_height_fallback).is_err() {
        config.max_height_fallback = defaults.max_height_fallback;
    }
    if config.rows_per_page == 0 {
        config.rows_per_page = defaults.rows_per_page;
    }
    config
}
