//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::WebsiteConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<WebsiteConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<WebsiteConfig, ConfigError> {
    let config: WebsiteConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load the configuration file if it exists, otherwise fall back to defaults.
pub fn load_config_or_default(path: &Path) -> Result<WebsiteConfig, ConfigError> {
    if path.exists() {
        return load_config(path);
    }

    tracing::warn!(path = %path.display(), "Config file not found, using defaults");
    Ok(WebsiteConfig::default())
}
