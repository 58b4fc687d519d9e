//! Views: turn model data into HTML (via the renderer) or JSON.

pub mod package;
pub mod status;

pub use package::{PackageHtmlView, PackageJsonView};
pub use status::{PackageStatus, StatusHtmlView, StatusJsonView};
