//! Configuration errors raised before the target tree is touched.

use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong while assembling a run from user input.
///
/// All of these are detected before any file is removed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid mapping '{entry}': expected exactly one ':' between snap name and path")]
    MappingSyntax { entry: String },

    #[error("invalid mapping '{entry}': snap name is empty")]
    MappingEmptyName { entry: String },

    #[error("invalid mapping '{entry}': path can't be '/'")]
    MappingToRoot { entry: String },

    #[error("invalid exclusion pattern '{pattern}': {source}")]
    InvalidExclusion {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("no snaps given and no project directory set (use --project-dir or CRAFT_PROJECT_DIR)")]
    NoProjectDir,

    #[error("can't find snapcraft.yaml in {}", .project_dir.display())]
    ManifestNotFound { project_dir: PathBuf },

    #[error("failed to parse manifest {}: {source}", .path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("no base snaps to compare against")]
    NoRoots,

    #[error("failed to parse built-in defaults: {0}")]
    Defaults(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::ConfigError;
    use globset::Glob;
    use std::error::Error as _;

    #[test]
    fn invalid_exclusion_keeps_pattern_and_source() {
        let glob_err = Glob::new("usr/[").unwrap_err();
        let error = ConfigError::InvalidExclusion {
            pattern: "usr/[".into(),
            source: glob_err.clone(),
        };

        assert!(error.to_string().contains("usr/["));
        assert_eq!(error.source().unwrap().to_string(), glob_err.to_string());
    }

    #[test]
    fn mapping_messages_quote_the_entry() {
        let error = ConfigError::MappingToRoot {
            entry: "snap1:/".into(),
        };
        assert_eq!(
            error.to_string(),
            "invalid mapping 'snap1:/': path can't be '/'"
        );
    }
}
