//! Persistence layer.
//!
//! # Data Flow
//! ```text
//! package:sync    → PackageModel::add_package / update_package
//! packagist:sync  → ReleaseModel::add_release
//! views           → PackageModel::packages / package
//!                 → ReleaseModel::package_history / latest_releases
//! ```

pub mod database;
pub mod package;
pub mod release;

pub use database::Database;
pub use package::{NewPackage, Package, PackageModel};
pub use release::{Release, ReleaseModel};
