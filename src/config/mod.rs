//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → WebsiteConfig (validated, immutable)
//!     → registered in the service container, shared via Arc
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_config_or_default, ConfigError};
pub use schema::WebsiteConfig;
pub use schema::{
    AnalyticsConfig, DatabaseConfig, DebugBarConfig, LoggingConfig, MetricsConfig,
    PackagesConfig, PackagistConfig, RouterConfig, ServerConfig, TemplateConfig,
};
