//! HTTP surface.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (axum, request id, trace, timeout, /media static files)
//!     → WebApplication::handle
//!     → input.rs (what controllers read from the request)
//! ```

pub mod input;
pub mod server;

pub use input::Input;
pub use server::HttpServer;
