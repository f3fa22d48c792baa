//! Parsing of `name:path` mapping strings.
//!
//! A mapping tells the tool that a snap ships, at its top level, content that
//! the stage tree keeps under `path`. For example `gtk-common-themes:usr` means
//! `usr/share/icons/...` in the stage tree corresponds to `share/icons/...`
//! inside the gtk-common-themes snap.

use crate::error::ConfigError;
use std::collections::BTreeMap;

/// A validated `(snap name, prefix)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    pub name: String,
    /// Never starts with `/`, always ends with exactly one `/`, never `/` alone
    pub prefix: String,
}

impl MappingEntry {
    /// Parse and normalize a `name:path` string
    pub fn parse(entry: &str) -> Result<Self, ConfigError> {
        let mut parts = entry.split(':');
        let (name, path) = match (parts.next(), parts.next(), parts.next()) {
            (Some(name), Some(path), None) => (name, path),
            _ => {
                return Err(ConfigError::MappingSyntax {
                    entry: entry.to_string(),
                })
            }
        };

        if name.is_empty() {
            return Err(ConfigError::MappingEmptyName {
                entry: entry.to_string(),
            });
        }

        Ok(MappingEntry {
            name: name.to_string(),
            prefix: normalize_prefix(path).ok_or_else(|| ConfigError::MappingToRoot {
                entry: entry.to_string(),
            })?,
        })
    }
}

/// Strip leading separators and append a trailing one.
///
/// Returns `None` when nothing but separators is left, since that would make
/// the prefix the bare separator.
pub fn normalize_prefix(path: &str) -> Option<String> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{trimmed}/"))
}

/// Snap name to mapping prefix
pub type MappingTable = BTreeMap<String, String>;

/// Build the mapping table from the predefined entries and the user's entries.
///
/// Predefined entries are applied first, so a user entry for the same snap
/// replaces it. Every string is validated; the first invalid one aborts.
pub fn generate_mappings<P, U>(predefined: P, user: U) -> Result<MappingTable, ConfigError>
where
    P: IntoIterator,
    P::Item: AsRef<str>,
    U: IntoIterator,
    U::Item: AsRef<str>,
{
    let mut table = MappingTable::new();
    let entries = predefined
        .into_iter()
        .map(|e| MappingEntry::parse(e.as_ref()))
        .chain(user.into_iter().map(|e| MappingEntry::parse(e.as_ref())));

    for entry in entries {
        let entry = entry?;
        table.insert(entry.name, entry.prefix);
    }

    Ok(table)
}
