//! Package manifest loading.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read package manifest {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse package manifest {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// One manifest entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    /// Human readable name.
    pub display: String,

    /// Repository name, defaults to the package name.
    #[serde(default)]
    pub repo: Option<String>,

    #[serde(default = "default_stable")]
    pub stable: bool,

    #[serde(default)]
    pub deprecated: bool,
}

fn default_stable() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(default)]
    packages: BTreeMap<String, PackageInfo>,
}

/// The framework packages listed in the manifest, ordered by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRegistry {
    packages: BTreeMap<String, PackageInfo>,
}

impl PackageRegistry {
    pub fn new(packages: BTreeMap<String, PackageInfo>) -> Self {
        Self { packages }
    }

    /// Load the manifest from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let manifest: Manifest = toml::from_str(content)?;
        Ok(Self::new(manifest.packages))
    }

    pub fn get(&self, name: &str) -> Option<&PackageInfo> {
        self.packages.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PackageInfo)> {
        self.packages.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANIFEST: &str = r#"
        [packages.router]
        display = "Router"

        [packages.application]
        display = "Application"
        repo = "application-repo"
        stable = false

        [packages.compat]
        display = "Compat"
        deprecated = true
    "#;

    #[test]
    fn test_parse_manifest() {
        let registry = PackageRegistry::parse(MANIFEST).unwrap();
        assert_eq!(registry.len(), 3);

        let names: Vec<_> = registry.names().collect();
        assert_eq!(names, vec!["application", "compat", "router"]);

        let router = registry.get("router").unwrap();
        assert!(router.stable);
        assert!(!router.deprecated);
        assert_eq!(router.repo, None);

        assert!(registry.get("compat").unwrap().deprecated);
        assert!(!registry.get("application").unwrap().stable);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PackageRegistry::load(&dir.path().join("packages.toml")).unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }

    #[test]
    fn test_empty_manifest() {
        assert!(PackageRegistry::parse("").unwrap().is_empty());
    }
}
