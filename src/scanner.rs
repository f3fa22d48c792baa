//! Walk of the stage tree removing files already provided by a reference root.

use crate::patterns::ExclusionRules;
use crate::report::DuplicateReport;
use crate::roots::{find_provider, Root};

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Options controlling a run (runtime flags)
#[derive(Debug, Clone, Copy, Default)]
pub struct EliminateOptions {
    /// Print one line per excluded or removed file
    pub verbose: bool,
    /// Suppress the final summary
    pub quiet: bool,
    /// Decide and account, but don't remove anything
    pub dry_run: bool,
    /// Show a spinner on stderr while walking
    pub progress: bool,
}

/// What happens to a single stage entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision<'a> {
    /// Protected by the given exclusion pattern
    Excluded(&'a str),
    /// Already provided by the given root
    Duplicate(&'a Root),
    Unique,
}

/// Decide the fate of one stage-relative path.
///
/// Depends only on the path, the rules and the roots, never on other entries.
pub fn classify<'a>(relative: &Path, roots: &'a [Root], rules: &'a ExclusionRules) -> Decision<'a> {
    if let Some(pattern) = rules.matching_pattern(relative) {
        return Decision::Excluded(pattern);
    }
    match find_provider(roots, relative) {
        Some(root) => Decision::Duplicate(root),
        None => Decision::Unique,
    }
}

fn spinner(enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let progress = ProgressBar::new_spinner();
    progress.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .context("Invalid progress template")?,
    );
    progress.enable_steady_tick(std::time::Duration::from_millis(100));
    Ok(progress)
}

/// Remove every regular file or symlink under `target_root` that one of
/// `roots` already provides, unless an exclusion rule protects it.
///
/// Directories are descended into but never removed. Any filesystem error
/// aborts the run; entries handled before the error keep their fate.
pub fn eliminate_duplicates(
    target_root: &Path,
    roots: &[Root],
    rules: &ExclusionRules,
    options: EliminateOptions,
) -> Result<DuplicateReport> {
    let metadata = fs::metadata(target_root)
        .with_context(|| format!("Failed to read {}", target_root.display()))?;
    if !metadata.is_dir() {
        bail!("{} is not a directory", target_root.display());
    }

    let mut report = DuplicateReport::new(options.dry_run);
    let progress = spinner(options.progress && !options.verbose && !options.quiet)?;
    let mut checked = 0u64;

    let walker = WalkDir::new(target_root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name();

    for result in walker {
        let entry = result.map_err(|err| {
            let failed = err.path().unwrap_or(target_root).display().to_string();
            anyhow::Error::new(err).context(format!("Failed to walk {}", failed))
        })?;

        // Directories, sockets, devices and fifos are never candidates
        let file_type = entry.file_type();
        if !file_type.is_file() && !file_type.is_symlink() {
            continue;
        }

        let path = entry.path();
        let relative = path
            .strip_prefix(target_root)
            .with_context(|| format!("{} is outside {}", path.display(), target_root.display()))?;

        checked += 1;
        if checked % 100 == 0 {
            progress.set_message(format!("Checked {} files", checked));
        }

        match classify(relative, roots, rules) {
            Decision::Excluded(pattern) => {
                report.record_exclusion();
                if options.verbose {
                    println!(
                        "Keeping excluded file {} (matches {})",
                        relative.display(),
                        pattern
                    );
                }
            }
            Decision::Duplicate(root) => {
                // Links are removed, not followed, so they don't count towards the total
                let size = if file_type.is_file() {
                    entry
                        .metadata()
                        .with_context(|| format!("Could not get metadata for {}", path.display()))?
                        .len()
                } else {
                    0
                };

                if !options.dry_run {
                    fs::remove_file(path)
                        .with_context(|| format!("Failed to remove {}", path.display()))?;
                }
                report.record_removal(size);

                if options.verbose {
                    let verb = if options.dry_run { "Would remove" } else { "Removing" };
                    println!(
                        "{} duplicated file {} (found in {})",
                        verb,
                        relative.display(),
                        root.path().display()
                    );
                }
            }
            Decision::Unique => {}
        }
    }

    progress.finish_and_clear();

    if !options.quiet {
        println!("{}", report.summary().bold());
    }

    Ok(report)
}
