//! Compiled router artifact.
//!
//! # Responsibilities
//! - Persist a route table as a versioned JSON document (`router:cache`)
//! - Load that document in place of building the table at startup
//!
//! # Design Decisions
//! - Two states only: artifact absent → build the static table,
//!   artifact present → load it and skip construction entirely
//! - A present but malformed artifact is fatal; no recovery is attempted
//! - Invalidation is manual: the operator deletes the file

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::routing::router::{Route, RouteError, Router};
use crate::routing::table::website_routes;

/// Artifact format version understood by this build.
pub const ARTIFACT_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum CompiledRouterError {
    #[error("failed to access compiled router at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed compiled router at {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("compiled router at {path} has version {found}, expected {expected}")]
    Version {
        path: PathBuf,
        found: u32,
        expected: u32,
    },

    #[error(transparent)]
    Route(#[from] RouteError),
}

#[derive(Debug, Serialize, Deserialize)]
struct Artifact {
    version: u32,
    routes: Vec<Route>,
}

/// Write `router` to `path`, creating parent directories as needed.
pub fn store(router: &Router, path: &Path) -> Result<(), CompiledRouterError> {
    let io_err = |source| CompiledRouterError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }

    let artifact = Artifact {
        version: ARTIFACT_VERSION,
        routes: router.routes().to_vec(),
    };
    let json = serde_json::to_string_pretty(&artifact).map_err(|source| {
        CompiledRouterError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;

    // Readers never see a half-written artifact.
    let tmp = temp_path(path);
    if let Err(e) = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, path)) {
        let _ = fs::remove_file(&tmp);
        return Err(io_err(e));
    }

    tracing::info!(path = %path.display(), routes = router.len(), "Compiled router written");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Load a compiled router from `path`.
pub fn load(path: &Path) -> Result<Router, CompiledRouterError> {
    let content = fs::read_to_string(path).map_err(|source| CompiledRouterError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let artifact: Artifact =
        serde_json::from_str(&content).map_err(|source| CompiledRouterError::Malformed {
            path: path.to_path_buf(),
            source,
        })?;

    if artifact.version != ARTIFACT_VERSION {
        return Err(CompiledRouterError::Version {
            path: path.to_path_buf(),
            found: artifact.version,
            expected: ARTIFACT_VERSION,
        });
    }

    Ok(Router::from_routes(artifact.routes))
}

/// Use the compiled artifact when present, otherwise build the static table.
pub fn load_or_build(path: &Path) -> Result<Router, CompiledRouterError> {
    if path.exists() {
        let router = load(path)?;
        tracing::debug!(path = %path.display(), routes = router.len(), "Using compiled router");
        return Ok(router);
    }

    Ok(website_routes()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::router::{HandlerId, RouteMethod};

    #[test]
    fn test_store_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cache").join("router.json");

        let router = website_routes().unwrap();
        store(&router, &path).unwrap();

        let loaded = load(&path).unwrap();
        assert_eq!(loaded, router);
    }

    #[test]
    fn test_store_replaces_existing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.json");
        fs::write(&path, "stale, not json").unwrap();

        let router = website_routes().unwrap();
        store(&router, &path).unwrap();

        assert_eq!(load(&path).unwrap(), router);
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("router.json")]);
    }

    #[test]
    fn test_store_failure_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A directory in the way makes the final rename fail.
        let path = dir.path().join("router.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "").unwrap();

        let err = store(&website_routes().unwrap(), &path).unwrap_err();
        assert!(matches!(err, CompiledRouterError::Io { .. }));
        assert!(!dir.path().join("router.json.tmp").exists());
    }

    #[test]
    fn test_absent_artifact_builds_static_table() {
        let dir = tempfile::tempdir().unwrap();
        let router = load_or_build(&dir.path().join("router.json")).unwrap();
        assert_eq!(router, website_routes().unwrap());
    }

    #[test]
    fn test_present_artifact_short_circuits_construction() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.json");
        fs::write(
            &path,
            r#"{"version":1,"routes":[{"method":"GET","pattern":"/only","handler":"homepage"}]}"#,
        )
        .unwrap();

        let router = load_or_build(&path).unwrap();
        assert_eq!(router.len(), 1);
        assert_eq!(
            router.parse_route(RouteMethod::Get, "/only").unwrap().handler,
            HandlerId::Homepage
        );
        assert!(router.parse_route(RouteMethod::Get, "/status").is_err());
        assert!(router.parse_route(RouteMethod::Get, "/administrator").is_err());
    }

    #[test]
    fn test_malformed_artifact_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.json");

        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_or_build(&path), Err(CompiledRouterError::Malformed { .. })));

        fs::write(
            &path,
            r#"{"version":1,"routes":[{"method":"GET","pattern":"/x","handler":"nobody"}]}"#,
        )
        .unwrap();
        assert!(matches!(load_or_build(&path), Err(CompiledRouterError::Malformed { .. })));

        fs::write(
            &path,
            r#"{"version":1,"routes":[{"method":"GET","pattern":"/*/x","handler":"page"}]}"#,
        )
        .unwrap();
        assert!(matches!(load_or_build(&path), Err(CompiledRouterError::Malformed { .. })));
    }

    #[test]
    fn test_version_mismatch_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("router.json");
        fs::write(&path, r#"{"version":99,"routes":[]}"#).unwrap();

        assert!(matches!(
            load(&path),
            Err(CompiledRouterError::Version { found: 99, .. })
        ));
    }
}
