//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the website.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the website and its CLI.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WebsiteConfig {
    /// Debug mode: verbose error pages and the debug bar.
    pub debug: bool,

    /// HTTP server settings.
    pub server: ServerConfig,

    /// Template renderer settings.
    pub templates: TemplateConfig,

    /// Release database settings.
    pub database: DatabaseConfig,

    /// Compiled router artifact location.
    pub router: RouterConfig,

    /// Package manifest settings.
    pub packages: PackagesConfig,

    /// Packagist API client settings.
    pub packagist: PackagistConfig,

    /// Analytics tracking for the JSON API.
    pub analytics: AnalyticsConfig,

    /// Log output settings.
    pub logging: LoggingConfig,

    /// Metrics exporter settings.
    pub metrics: MetricsConfig,

    #[serde(default)]
    pub debug_bar: DebugBarConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Directory served under `/media`.
    pub media_dir: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
            media_dir: "www/media".to_string(),
        }
    }
}

/// Template renderer configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding the `*.html` templates.
    pub path: String,

    /// Re-read templates from disk before every render.
    pub auto_reload: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            path: "templates".to_string(),
            auto_reload: false,
        }
    }
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite connection URL.
    pub url: String,

    /// Pool size. Keep at 1 for `sqlite::memory:`.
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://website.db".to_string(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Where `router:cache` writes and the server looks for the compiled router.
    pub compiled_path: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            compiled_path: "cache/router.json".to_string(),
        }
    }
}

/// Package manifest configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PackagesConfig {
    /// Path to the TOML package manifest.
    pub manifest: String,

    /// Packagist vendor prefix (e.g., "joomla").
    pub vendor: String,

    /// Base URL the repository name is appended to.
    pub repository_base: String,
}

impl Default for PackagesConfig {
    fn default() -> Self {
        Self {
            manifest: "packages.toml".to_string(),
            vendor: "joomla".to_string(),
            repository_base: "https://github.com/joomla-framework".to_string(),
        }
    }
}

/// Packagist API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PackagistConfig {
    pub base_url: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,

    /// How long download counts stay in the cache pool.
    pub cache_ttl_secs: u64,
}

impl Default for PackagistConfig {
    fn default() -> Self {
        Self {
            base_url: "https://packagist.org".to_string(),
            timeout_secs: 10,
            cache_ttl_secs: 12 * 60 * 60,
        }
    }
}

/// Analytics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Send pageviews for API requests.
    pub enabled: bool,

    /// Property the pageviews are recorded against.
    pub tracking_id: String,

    /// Measurement Protocol collection endpoint.
    pub endpoint: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            tracking_id: String::new(),
            endpoint: "https://www.google-analytics.com/collect".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub level: String,

    /// Output format: "pretty" or "json".
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Metrics configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Enable the Prometheus endpoint.
    pub enabled: bool,

    /// Metrics endpoint bind address.
    pub address: String,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DebugBarConfig {
    /// Number of recent requests kept by the debug bar.
    pub capacity: usize,
}

impl Default for DebugBarConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}
