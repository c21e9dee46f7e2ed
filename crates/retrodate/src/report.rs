//! Outcome of a synthesis run

use chrono::{DateTime, FixedOffset};
use retrodate_git::{ChangeStatus, CommitId};
use serde::Serialize;

/// Diagnostic for a run whose discovery came back empty
pub const NO_CHANGES: &str = "No changed, deleted, or untracked files found.";

/// A change that was committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommittedEntry {
    /// Path of the change
    pub path: String,
    /// Status it was discovered with
    pub status: ChangeStatus,
    /// Day of the window it landed on
    pub day_offset: u32,
    /// Fabricated author and committer time
    pub timestamp: DateTime<FixedOffset>,
    /// Commit message
    pub message: String,
    /// Id of the new commit
    pub commit: CommitId,
}

/// A change whose staging or commit was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    /// Path of the change
    pub path: String,
    /// Day of the window it was scheduled on
    pub day_offset: u32,
    /// The error reported by git
    pub error: String,
}

/// Everything a run did, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Number of changes discovered
    pub discovered: usize,
    /// Successful commits
    pub committed: Vec<CommittedEntry>,
    /// Commits that were attempted and failed
    pub failed: Vec<FailedEntry>,
    /// Paths with nothing to stage
    pub skipped: Vec<String>,
    /// Paths that did not fit in the window
    pub unscheduled: Vec<String>,
}

impl RunReport {
    /// Number of commits attempted, successful or not
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.committed.len() + self.failed.len()
    }

    /// Whether the run found nothing to do
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attempted() == 0 && self.skipped.is_empty() && self.unscheduled.is_empty()
    }

    /// Whether discovery found nothing to commit at all
    #[must_use]
    pub fn found_no_changes(&self) -> bool {
        self.discovered == 0
    }

    /// One-line human summary
    #[must_use]
    pub fn summary(&self) -> String {
        if self.found_no_changes() {
            return NO_CHANGES.to_string();
        }
        format!(
            "{} committed, {} failed, {} skipped, {} left for a later run",
            self.committed.len(),
            self.failed.len(),
            self.skipped.len(),
            self.unscheduled.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use similar_asserts::assert_eq;

    #[test]
    fn test_default_report_is_empty() {
        let report = RunReport::default();
        assert!(report.is_empty());
        assert_eq!(report.attempted(), 0);
        assert!(report.found_no_changes());
        assert_eq!(report.summary(), NO_CHANGES);
    }

    #[test]
    fn test_summary_counts_each_outcome() {
        let report = RunReport {
            discovered: 3,
            skipped: vec!["ghost.txt".to_string()],
            unscheduled: vec!["late.txt".to_string(), "later.txt".to_string()],
            ..Default::default()
        };
        assert!(!report.found_no_changes());
        assert_eq!(
            report.summary(),
            "0 committed, 0 failed, 1 skipped, 2 left for a later run"
        );
    }

    #[test]
    fn test_attempted_counts_failures() {
        let report = RunReport {
            discovered: 1,
            failed: vec![FailedEntry {
                path: "a.txt".to_string(),
                day_offset: 0,
                error: "Nothing to commit".to_string(),
            }],
            ..Default::default()
        };
        assert_eq!(report.attempted(), 1);
        assert!(!report.is_empty());
    }

    #[test]
    fn test_skips_alone_are_not_empty() {
        let report = RunReport {
            discovered: 1,
            skipped: vec!["ghost.txt".to_string()],
            ..Default::default()
        };
        assert!(!report.is_empty());
    }
}
