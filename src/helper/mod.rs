//! Application helpers.
//!
//! - `PackageHelper`: lookups over the package manifest
//! - `PackagistHelper`: Packagist API client with cached download counts

pub mod packages;
pub mod packagist;

use std::sync::Arc;

pub use packages::{ManifestError, PackageInfo, PackageRegistry};
pub use packagist::{PackagistError, PackagistHelper, PackagistRelease};

/// Answers questions about the framework packages.
#[derive(Debug, Clone)]
pub struct PackageHelper {
    packages: Arc<PackageRegistry>,
    repository_base: String,
}

impl PackageHelper {
    pub fn new(packages: Arc<PackageRegistry>, repository_base: impl Into<String>) -> Self {
        Self {
            packages,
            repository_base: repository_base.into(),
        }
    }

    pub fn packages(&self) -> &PackageRegistry {
        &self.packages
    }

    /// Display name, falling back to the package name.
    pub fn display_name(&self, package: &str) -> String {
        self.packages
            .get(package)
            .map(|info| info.display.clone())
            .unwrap_or_else(|| package.to_string())
    }

    /// Repository name, defaulting to the package name.
    pub fn repository_name(&self, package: &str) -> String {
        self.packages
            .get(package)
            .and_then(|info| info.repo.clone())
            .unwrap_or_else(|| package.to_string())
    }

    pub fn repository_url(&self, package: &str) -> String {
        format!(
            "{}/{}",
            self.repository_base.trim_end_matches('/'),
            self.repository_name(package)
        )
    }

    pub fn is_deprecated(&self, package: &str) -> bool {
        self.packages.get(package).is_some_and(|info| info.deprecated)
    }

    pub fn is_stable(&self, package: &str) -> bool {
        self.packages.get(package).is_some_and(|info| info.stable)
    }
}
