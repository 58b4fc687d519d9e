//! Framework project website: package status board, static pages and a
//! small JSON API, plus the maintenance console that feeds them.

// Request path
pub mod controller;
pub mod http;
pub mod routing;
pub mod view;
pub mod web;

// Data and integrations
pub mod analytics;
pub mod cache;
pub mod helper;
pub mod model;
pub mod renderer;

// Wiring and console
pub mod cli;
pub mod config;
pub mod services;

// Cross-cutting concerns
pub mod error;
pub mod lifecycle;
pub mod observability;

pub use config::WebsiteConfig;
pub use error::{AppError, AppResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use services::{bootstrap, Container};
pub use web::WebApplication;
