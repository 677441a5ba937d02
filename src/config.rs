//! # Unified Application Configuration
//!
//! Settings for the `shopping-list` binary, loaded from environment variables
//! (optionally via a `.env` file) and validated before use.

use crate::errors::{AppError, AppResult};
use crate::observability_config::ObservabilityConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Largest scale factor accepted from configuration
pub const MAX_SCALE_FACTOR: f64 = 100.0;

/// How the shopping list is written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Json,
    #[default]
    Text,
}

impl FromStr for OutputFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "text" => Ok(OutputFormat::Text),
            other => Err(AppError::Config(format!(
                "OUTPUT_FORMAT must be 'json' or 'text', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Text => write!(f, "text"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// JSON file holding the recipes to aggregate
    pub recipes_path: Option<PathBuf>,
    /// Output format for the shopping list
    pub output_format: OutputFormat,
    /// Multiplier applied to every ingredient line before aggregation
    pub scale_factor: f64,
    /// Logging configuration
    pub observability: ObservabilityConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            recipes_path: None,
            output_format: OutputFormat::default(),
            scale_factor: 1.0,
            observability: ObservabilityConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let recipes_path = lookup("RECIPES_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        let output_format = lookup("OUTPUT_FORMAT")
            .unwrap_or_else(|| "text".to_string())
            .parse()?;

        let scale_factor = lookup("SCALE_FACTOR")
            .unwrap_or_else(|| "1.0".to_string())
            .trim()
            .parse()
            .map_err(|_| AppError::Config("SCALE_FACTOR must be a valid number".to_string()))?;

        Ok(Self {
            recipes_path,
            output_format,
            scale_factor,
            observability: ObservabilityConfig::from_lookup(&lookup),
        })
    }

    /// Replace the recipes path, e.g. with a command-line argument
    pub fn with_recipes_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.recipes_path = Some(path.into());
        self
    }

    /// Whether ingredient lines need scaling before aggregation
    pub fn needs_scaling(&self) -> bool {
        (self.scale_factor - 1.0).abs() > f64::EPSILON
    }

    /// Validate all configuration sections
    pub fn validate(&self) -> AppResult<()> {
        match &self.recipes_path {
            None => {
                return Err(AppError::Config(
                    "No recipes file given. Set RECIPES_PATH or pass the path as the first argument"
                        .to_string(),
                ))
            }
            Some(path) if path.as_os_str().is_empty() => {
                return Err(AppError::Config("Recipes path cannot be empty".to_string()))
            }
            Some(_) => {}
        }

        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(AppError::Config(format!(
                "SCALE_FACTOR must be a positive number, got {}",
                self.scale_factor
            )));
        }

        if self.scale_factor > MAX_SCALE_FACTOR {
            return Err(AppError::Config(format!(
                "SCALE_FACTOR cannot be greater than {}",
                MAX_SCALE_FACTOR
            )));
        }

        self.observability.validate()?;
        Ok(())
    }

    /// Get a summary of the current configuration for logging
    pub fn summary(&self) -> String {
        format!(
            "Configuration: recipes_path={}, output_format={}, scale_factor={}, environment={}, log_level={}",
            self.recipes_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<unset>".to_string()),
            self.output_format,
            self.scale_factor,
            self.observability.environment,
            self.observability.log_level
        )
    }
}
