//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check cross-field requirements (analytics needs a tracking id)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WebsiteConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use crate::config::schema::WebsiteConfig;

/// Upper bound on the debug bar history.
pub const MAX_DEBUG_BAR_CAPACITY: usize = 10_000;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field}: invalid socket address '{value}'")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },

    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    #[error("{field} must be at most {max}, got {value}")]
    TooLarge { field: &'static str, value: usize, max: usize },

    #[error("logging.format must be 'pretty' or 'json', got '{0}'")]
    LogFormat(String),
}

/// Validate a parsed configuration.
pub fn validate_config(config: &WebsiteConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "server.bind_address",
            value: config.server.bind_address.clone(),
        });
    }
    if config.server.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "server.request_timeout_secs" });
    }
    if config.database.url.is_empty() {
        errors.push(ValidationError::Empty { field: "database.url" });
    }
    if config.database.max_connections == 0 {
        errors.push(ValidationError::Zero { field: "database.max_connections" });
    }
    if config.router.compiled_path.is_empty() {
        errors.push(ValidationError::Empty { field: "router.compiled_path" });
    }
    if config.packages.vendor.is_empty() {
        errors.push(ValidationError::Empty { field: "packages.vendor" });
    }
    if url::Url::parse(&config.packagist.base_url).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: "packagist.base_url",
            value: config.packagist.base_url.clone(),
        });
    }
    if config.packagist.timeout_secs == 0 {
        errors.push(ValidationError::Zero { field: "packagist.timeout_secs" });
    }
    if config.analytics.enabled {
        if config.analytics.tracking_id.is_empty() {
            errors.push(ValidationError::Empty { field: "analytics.tracking_id" });
        }
        if url::Url::parse(&config.analytics.endpoint).is_err() {
            errors.push(ValidationError::InvalidUrl {
                field: "analytics.endpoint",
                value: config.analytics.endpoint.clone(),
            });
        }
    }
    if !matches!(config.logging.format.as_str(), "pretty" | "json") {
        errors.push(ValidationError::LogFormat(config.logging.format.clone()));
    }
    if config.metrics.enabled && config.metrics.address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "metrics.address",
            value: config.metrics.address.clone(),
        });
    }
    if config.debug_bar.capacity == 0 {
        errors.push(ValidationError::Zero { field: "debug_bar.capacity" });
    } else if config.debug_bar.capacity > MAX_DEBUG_BAR_CAPACITY {
        errors.push(ValidationError::TooLarge {
            field: "debug_bar.capacity",
            value: config.debug_bar.capacity,
            max: MAX_DEBUG_BAR_CAPACITY,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
