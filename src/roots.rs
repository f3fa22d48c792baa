//! Reference roots and the path mapping between them and the stage tree.

use crate::error::ConfigError;
use crate::mapping::{normalize_prefix, MappingTable};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

/// A location that already provides files at runtime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Root {
    path: PathBuf,
    mapping_prefix: Option<String>,
}

impl Root {
    /// A root whose layout matches the stage tree
    pub fn unmapped(path: impl Into<PathBuf>) -> Self {
        Root {
            path: path.into(),
            mapping_prefix: None,
        }
    }

    /// A root whose top level corresponds to `prefix` in the stage tree.
    ///
    /// The prefix is normalized to `dir/`; a prefix that reduces to `/` is rejected.
    pub fn mapped(path: impl Into<PathBuf>, prefix: &str) -> Result<Self, ConfigError> {
        let path = path.into();
        let mapping_prefix = normalize_prefix(prefix).ok_or_else(|| ConfigError::MappingToRoot {
            entry: format!("{}:{}", path.display(), prefix),
        })?;
        Ok(Root {
            path,
            mapping_prefix: Some(mapping_prefix),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn mapping_prefix(&self) -> Option<&str> {
        self.mapping_prefix.as_deref()
    }

    /// Path to look up inside this root for a stage-relative path.
    ///
    /// With a prefix `m`, paths under `m` have it stripped; anything else is
    /// looked up unchanged.
    pub fn probe_path<'a>(&self, relative: &'a Path) -> &'a Path {
        let Some(prefix) = self.mapping_prefix.as_deref() else {
            return relative;
        };
        match relative.strip_prefix(prefix.trim_end_matches('/')) {
            // A file named exactly like the prefix directory isn't under it
            Ok(rest) if !rest.as_os_str().is_empty() => rest,
            _ => relative,
        }
    }

    /// Whether this root has an entry for the stage-relative path.
    ///
    /// The last component isn't followed, so a dangling link counts as present.
    pub fn provides(&self, relative: &Path) -> bool {
        fs::symlink_metadata(self.path.join(self.probe_path(relative))).is_ok()
    }
}

/// First root, in order, that provides the stage-relative path
pub fn find_provider<'r>(roots: &'r [Root], relative: &Path) -> Option<&'r Root> {
    roots.iter().find(|root| root.provides(relative))
}

/// Mapped snap names that aren't in the list of snaps to compare against
pub fn unused_mappings<'m>(names: &[String], mapped: &'m [String]) -> Vec<&'m str> {
    mapped
        .iter()
        .filter(|name| !names.contains(*name))
        .map(String::as_str)
        .collect()
}

/// Build the ordered list of roots for a run.
///
/// One root per snap at `<snaps_dir>/<name>/current`, carrying its mapping if
/// there is one, followed by the unmapped stage directory. Names in
/// `user_mapped` that aren't in `names` get a warning.
pub fn build_root_set(
    names: &[String],
    mappings: &MappingTable,
    user_mapped: &[String],
    snaps_dir: &Path,
    stage_dir: &Path,
) -> Result<Vec<Root>, ConfigError> {
    if names.is_empty() {
        return Err(ConfigError::NoRoots);
    }

    for name in unused_mappings(names, user_mapped) {
        eprintln!(
            "{}",
            format!("Warning: mapping for '{name}' ignored, it isn't in the list of snaps").yellow()
        );
    }

    let mut roots = Vec::with_capacity(names.len() + 1);
    for name in names {
        let path = snaps_dir.join(name).join("current");
        let root = match mappings.get(name) {
            Some(prefix) => Root::mapped(path, prefix)?,
            None => Root::unmapped(path),
        };
        roots.push(root);
    }
    roots.push(Root::unmapped(stage_dir));

    Ok(roots)
}
