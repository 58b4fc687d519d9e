//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT/SIGTERM → Shutdown::trigger → server drains and exits
//!     SIGHUP         → template cache reset
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
