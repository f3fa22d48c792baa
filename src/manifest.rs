//! Discovery of base snaps from the project's snapcraft.yaml.

use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Manifest locations relative to the project directory, in lookup order
const MANIFEST_CANDIDATES: &[&str] = &["snapcraft.yaml", "snap/snapcraft.yaml"];

#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    parts: serde_yaml::Mapping,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(rename = "build-snaps", default)]
    build_snaps: Vec<String>,
}

/// Locate the project's manifest
pub fn find_manifest(project_dir: &Path) -> Option<PathBuf> {
    MANIFEST_CANDIDATES
        .iter()
        .map(|candidate| project_dir.join(candidate))
        .find(|path| path.is_file())
}

/// Unique `build-snaps` names across all parts, in first-seen order.
///
/// Channel suffixes such as `/latest/stable` are dropped, since only the name
/// decides where the snap is mounted.
pub fn snaps_from_manifest(content: &str, path: &Path) -> Result<Vec<String>, ConfigError> {
    let manifest: Manifest =
        serde_yaml::from_str(content).map_err(|source| ConfigError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?;

    let mut names: Vec<String> = Vec::new();
    for (_part_name, part) in manifest.parts {
        // Parts without a body (`part-name:`) are valid and have no build snaps
        let part: Part = if part.is_null() {
            Part::default()
        } else {
            serde_yaml::from_value(part).map_err(|source| ConfigError::ManifestParse {
                path: path.to_path_buf(),
                source,
            })?
        };

        for snap in part.build_snaps {
            let name = snap.split('/').next().unwrap_or_default().trim();
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
    }

    Ok(names)
}

/// Snaps to compare against: the explicit list if given, otherwise the manifest's
pub fn resolve_snap_names(explicit: &[String], project_dir: Option<&Path>) -> Result<Vec<String>> {
    let names = if !explicit.is_empty() {
        explicit.to_vec()
    } else {
        let project_dir = project_dir.ok_or(ConfigError::NoProjectDir)?;
        let path = find_manifest(project_dir).ok_or_else(|| ConfigError::ManifestNotFound {
            project_dir: project_dir.to_path_buf(),
        })?;
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read manifest {}", path.display()))?;
        snaps_from_manifest(&content, &path)?
    };

    if names.is_empty() {
        return Err(ConfigError::NoRoots.into());
    }
    Ok(names)
}
