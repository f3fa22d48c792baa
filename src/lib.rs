//! stagetrim - Remove files a snap already gets from elsewhere
//!
//! A part's install directory often ends up with files pulled in as
//! dependencies that the snap will find at runtime anyway: they ship in the
//! base snap, in a content snap such as gtk-common-themes, or were already
//! staged by a previous part. stagetrim walks the install directory and
//! removes every file or symlink whose path exists in one of those reference
//! roots.
//!
//! ## Pipeline
//!
//! - `mapping`: parse `name:path` strings telling which stage prefix a snap's
//!   top level corresponds to
//! - `roots`: build the ordered reference roots and map stage paths into them
//! - `patterns`: exclusion globs that protect paths from removal
//! - `scanner`: the walk that decides and removes
//! - `manifest`: read the snap names from snapcraft.yaml when none are given

pub mod config;
pub mod error;
pub mod manifest;
pub mod mapping;
pub mod patterns;
pub mod report;
pub mod roots;
pub mod scanner;

// Re-export commonly used items
pub use config::{load_defaults, Defaults};
pub use error::ConfigError;
pub use manifest::{find_manifest, resolve_snap_names, snaps_from_manifest};
pub use mapping::{generate_mappings, MappingEntry, MappingTable};
pub use patterns::ExclusionRules;
pub use report::DuplicateReport;
pub use roots::{build_root_set, find_provider, Root};
pub use scanner::{classify, eliminate_duplicates, Decision, EliminateOptions};
