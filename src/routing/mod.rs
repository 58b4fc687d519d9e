//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (ordered route lookup)
//!     → pattern.rs (segment matching, variable binding)
//!     → Return: RouteMatch or NotFound / MethodNotAllowed
//!
//! Router Construction (at startup):
//!     compiled.rs: artifact on disk? → load it
//!                  otherwise         → table.rs static routes
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes built at startup, immutable at runtime
//! - No regex in hot path (segment matching only)
//! - Deterministic: same input always matches same route
//! - First match wins (registration order)

pub mod compiled;
pub mod pattern;
pub mod router;
pub mod table;

pub use compiled::CompiledRouterError;
pub use pattern::{PatternError, RoutePattern};
pub use router::{HandlerId, Route, RouteError, RouteMatch, RouteMethod, Router};
pub use table::website_routes;
