use serde::Deserialize;
use serde_yaml::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Manifest file expected at the project root
pub const MANIFEST_FILE: &str = "pubspec.yaml";

/// Errors raised while reading a project manifest
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("pubspec.yaml not found at {}", .path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// The two dependency sections of `pubspec.yaml`.
///
/// Only the keys matter here; version constraints and descriptor blocks
/// (git, path, sdk) deserialize as raw YAML values. A section that is
/// present but not a mapping is a parse error.
#[derive(Debug, Deserialize)]
struct Pubspec {
    #[serde(default)]
    dependencies: BTreeMap<String, Value>,
    #[serde(default)]
    dev_dependencies: BTreeMap<String, Value>,
}

/// Read the declared dependency names from a pubspec manifest.
///
/// Returns the union of the `dependencies` and `dev_dependencies` keys,
/// each section defaulting to empty when absent. Names are kept verbatim,
/// case-sensitive, no normalization.
pub fn read_declared_dependencies(manifest_path: &Path) -> Result<BTreeSet<String>, ManifestError> {
    if !manifest_path.exists() {
        return Err(ManifestError::NotFound {
            path: manifest_path.to_path_buf(),
        });
    }

    let contents =
        std::fs::read_to_string(manifest_path).map_err(|source| ManifestError::Io {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let pubspec: Pubspec =
        serde_yaml::from_str(&contents).map_err(|source| ManifestError::Parse {
            path: manifest_path.to_path_buf(),
            source,
        })?;

    let mut names: BTreeSet<String> = pubspec.dependencies.into_keys().collect();
    names.extend(pubspec.dev_dependencies.into_keys());
    Ok(names)
}
