//! Package location for essize.
//!
//! Given a file inside a node project, finds the enclosing project root, the
//! installed directory of a named package under `node_modules`, and the
//! package's manifest version. Lookups walk ancestor directories and are
//! bounded by a maximum number of hops.

use log::{debug, trace};
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Ancestor hops tried before giving up on finding a `package.json`.
pub const DEFAULT_MAX_HOPS: usize = 10;

#[derive(Debug, Error)]
pub enum PackageError {
    #[error("could not find a package.json within {max_hops} parent directories of {start}")]
    RootNotFound { start: PathBuf, max_hops: usize },

    #[error("could not find package '{name}' in {node_modules}")]
    PackageNotFound { name: String, node_modules: PathBuf },

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid package.json at {path}")]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("package.json at {path} has no version field")]
    MissingVersion { path: PathBuf },
}

/// Find the enclosing project root of `file_path` by walking ancestors until
/// a directory containing a `package.json` is found.
pub fn package_root(file_path: &Path) -> Result<PathBuf, PackageError> {
    package_root_within(file_path, DEFAULT_MAX_HOPS)
}

pub fn package_root_within(file_path: &Path, max_hops: usize) -> Result<PathBuf, PackageError> {
    debug!("Searching for package root from: {}", file_path.display());
    let start = file_path.parent().unwrap_or(file_path);

    let mut current_dir = start;
    for _ in 0..max_hops {
        let manifest = current_dir.join("package.json");
        trace!("Checking for package.json at: {}", manifest.display());
        if manifest.exists() {
            debug!("Found package root at: {}", current_dir.display());
            return Ok(current_dir.to_path_buf());
        }
        match current_dir.parent() {
            Some(parent) => current_dir = parent,
            None => break,
        }
    }

    debug!("No package.json found within {} hops of {}", max_hops, start.display());
    Err(PackageError::RootNotFound { start: start.to_path_buf(), max_hops })
}

/// Locate the installed directory of `name` under the project's
/// `node_modules`, walking the name segment by segment so scoped packages
/// (`@scope/pkg`) resolve to nested directories.
pub fn package_folder(name: &str, file_path: &Path) -> Result<PathBuf, PackageError> {
    let root = package_root(file_path)?;
    let node_modules = root.join("node_modules");
    trace!("Looking up '{}' in {}", name, node_modules.display());

    let mut current_dir = node_modules.clone();
    for part in name.split('/') {
        let candidate = current_dir.join(part);
        if !candidate.exists() {
            debug!("Package '{}' not found under {}", name, node_modules.display());
            return Err(PackageError::PackageNotFound { name: name.to_string(), node_modules });
        }
        current_dir = candidate;
    }

    debug!("Found package '{}' at {}", name, current_dir.display());
    Ok(current_dir)
}

/// Read the `version` field from an installed package's manifest.
pub fn package_version(name: &str, file_path: &Path) -> Result<String, PackageError> {
    let folder = package_folder(name, file_path)?;
    let manifest_path = folder.join("package.json");

    let text = fs::read_to_string(&manifest_path)
        .map_err(|source| PackageError::Io { path: manifest_path.clone(), source })?;
    let manifest: serde_json::Value = serde_json::from_str(&text)
        .map_err(|source| PackageError::Manifest { path: manifest_path.clone(), source })?;

    manifest
        .get("version")
        .and_then(|v| v.as_str())
        .map(|v| v.to_string())
        .ok_or(PackageError::MissingVersion { path: manifest_path })
}
