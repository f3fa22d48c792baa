//! Accounting of what a run removed.

use humansize::{format_size, BINARY};

/// Running totals for one pass over the stage tree
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DuplicateReport {
    /// Sum of the sizes, measured before removal, of every removed entry
    pub bytes_removed: u64,
    pub files_removed: u64,
    /// Entries protected by an exclusion rule
    pub files_excluded: u64,
    pub dry_run: bool,
}

impl DuplicateReport {
    pub fn new(dry_run: bool) -> Self {
        DuplicateReport {
            dry_run,
            ..Default::default()
        }
    }

    pub fn record_removal(&mut self, size: u64) {
        self.bytes_removed += size;
        self.files_removed += 1;
    }

    pub fn record_exclusion(&mut self) {
        self.files_excluded += 1;
    }

    /// One-line summary printed at the end of a run
    pub fn summary(&self) -> String {
        let verb = if self.dry_run { "Would remove" } else { "Removed" };
        format!(
            "{} {} bytes ({}) in {} duplicated files",
            verb,
            self.bytes_removed,
            format_size(self.bytes_removed, BINARY),
            self.files_removed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removals_accumulate() {
        let mut report = DuplicateReport::new(false);
        report.record_removal(1024);
        report.record_removal(0);
        report.record_exclusion();

        assert_eq!(report.bytes_removed, 1024);
        assert_eq!(report.files_removed, 2);
        assert_eq!(report.files_excluded, 1);
        let summary = report.summary();
        assert!(summary.starts_with("Removed 1024 bytes ("));
        assert!(summary.contains("KiB"));
        assert!(summary.ends_with(") in 2 duplicated files"));
    }

    #[test]
    fn dry_run_summary() {
        let report = DuplicateReport::new(true);
        assert!(report.summary().starts_with("Would remove 0 bytes"));
    }
}
