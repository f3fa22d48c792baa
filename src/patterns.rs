//! Exclusion rules protecting stage paths from removal.

use crate::error::ConfigError;
use globset::{Glob, GlobSet, GlobSetBuilder};
use std::path::Path;

/// Compiled set of exclusion globs.
///
/// Patterns are matched against the whole path relative to the stage root, and
/// `*` crosses directory separators, so `usr/bin/*` protects everything below
/// `usr/bin`.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    patterns: Vec<String>,
    set: GlobSet,
}

impl ExclusionRules {
    /// Compile the built-in patterns together with the user's patterns
    pub fn new<B, U>(builtin: B, user: U) -> Result<Self, ConfigError>
    where
        B: IntoIterator,
        B::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        let patterns: Vec<String> = builtin
            .into_iter()
            .map(Into::into)
            .chain(user.into_iter().map(Into::into))
            .collect();

        let mut builder = GlobSetBuilder::new();
        for pattern in &patterns {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::InvalidExclusion {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|source| ConfigError::InvalidExclusion {
                pattern: patterns.join(", "),
                source,
            })?;

        Ok(ExclusionRules { patterns, set })
    }

    /// Whether the stage-relative path is protected by any rule
    pub fn is_excluded(&self, relative: &Path) -> bool {
        self.set.is_match(relative)
    }

    /// The first pattern that protects the path, for logging
    pub fn matching_pattern(&self, relative: &Path) -> Option<&str> {
        self.set
            .matches(relative)
            .first()
            .map(|&index| self.patterns[index].as_str())
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}
