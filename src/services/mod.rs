//! Service wiring.
//!
//! # Data Flow
//! ```text
//! Binary start
//!     → Container::set(WebsiteConfig) (+ CliOptions for the console)
//!     → ApplicationProvider::register (every factory)
//!     → DebugProvider::register        (only when debug is on)
//!     → get::<WebApplication>() / get::<CliApplication>()
//!         builds the object graph lazily, once
//! ```

pub mod container;
pub mod provider;

pub use container::{Container, ContainerError, ServiceProvider};
pub use provider::{bootstrap, ApplicationProvider, DebugProvider};
