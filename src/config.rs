//! Built-in defaults loaded from the embedded defaults.toml.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::PathBuf;

// Embed the TOML file directly in the binary at compile time
const DEFAULTS_TOML: &str = include_str!("../defaults.toml");

/// Settings that apply when nothing on the command line overrides them
#[derive(Debug, Clone, Deserialize)]
pub struct Defaults {
    pub snaps: SnapsConfig,
    pub exclude: ExcludeConfig,
    pub mappings: MappingsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnapsConfig {
    /// Mount directory holding `<name>/current` for every installed snap
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExcludeConfig {
    #[serde(default)]
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MappingsConfig {
    #[serde(default)]
    pub predefined: Vec<String>,
}

/// Parse the embedded defaults
pub fn load_defaults() -> Result<Defaults, ConfigError> {
    Ok(toml::from_str(DEFAULTS_TOML)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_defaults_parse() {
        let defaults = load_defaults().expect("defaults.toml must parse");

        assert_eq!(defaults.snaps.directory, PathBuf::from("/snap"));
        assert_eq!(
            defaults.exclude.patterns,
            vec!["usr/share/icons/*/index.theme".to_string()]
        );
        assert_eq!(
            defaults.mappings.predefined,
            vec!["gtk-common-themes:usr".to_string()]
        );
    }
}
