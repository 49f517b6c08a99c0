use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::MigratorError;

/// Successful outcome of a single group or project step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// Subgroup created on the target
    Created,
    /// Subgroup already present on the target and reused
    Reused,
    /// Project import triggered on the target
    Imported,
    /// Project creation rejected because it already exists
    AlreadyExists,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Group,
    Project,
    Listing,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Group => "group",
            Self::Project => "project",
            Self::Listing => "listing of",
        };
        f.write_str(label)
    }
}

/// A failure that was logged and skipped instead of aborting the run.
#[derive(Debug, Clone)]
pub struct Failure {
    pub kind: FailureKind,
    pub path: String,
    pub error: String,
}

/// Outcome counts of one migration run.
#[derive(Debug, Clone)]
pub struct MigrationReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub groups_created: usize,
    pub groups_reused: usize,
    pub projects_imported: usize,
    pub projects_skipped: usize,
    pub failures: Vec<Failure>,
}

impl MigrationReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            groups_created: 0,
            groups_reused: 0,
            projects_imported: 0,
            projects_skipped: 0,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ItemOutcome) {
        match outcome {
            ItemOutcome::Created => self.groups_created += 1,
            ItemOutcome::Reused => self.groups_reused += 1,
            ItemOutcome::Imported => self.projects_imported += 1,
            ItemOutcome::AlreadyExists => self.projects_skipped += 1,
        }
    }

    pub fn record_failure(&mut self, kind: FailureKind, path: &str, error: &MigratorError) {
        self.failures.push(Failure {
            kind,
            path: path.to_string(),
            error: error.to_string(),
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    /// Wall-clock duration in seconds, zero while the run is still going.
    #[allow(clippy::cast_precision_loss)]
    pub fn duration_secs(&self) -> f64 {
        self.finished_at
            .map(|end| (end - self.started_at).num_milliseconds() as f64 / 1000.0)
            .unwrap_or(0.0)
    }
}

impl Default for MigrationReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts_each_outcome() {
        let mut report = MigrationReport::new();
        report.record(ItemOutcome::Created);
        report.record(ItemOutcome::Reused);
        report.record(ItemOutcome::Reused);
        report.record(ItemOutcome::Imported);
        report.record(ItemOutcome::AlreadyExists);

        assert_eq!(report.groups_created, 1);
        assert_eq!(report.groups_reused, 2);
        assert_eq!(report.projects_imported, 1);
        assert_eq!(report.projects_skipped, 1);
        assert!(report.failures.is_empty());
    }

    #[test]
    fn test_record_failure_keeps_message() {
        let mut report = MigrationReport::new();
        let error = MigratorError::ApiError {
            status: 403,
            message: "403 Forbidden".to_string(),
        };
        report.record_failure(FailureKind::Project, "teamA/repo0", &error);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].kind, FailureKind::Project);
        assert_eq!(report.failures[0].path, "teamA/repo0");
        assert!(report.failures[0].error.contains("403"));
    }

    #[test]
    fn test_duration_zero_until_finished() {
        let mut report = MigrationReport::new();
        assert_eq!(report.duration_secs(), 0.0);
        report.finish();
        assert!(report.finished_at.is_some());
        assert!(report.duration_secs() >= 0.0);
    }
}
