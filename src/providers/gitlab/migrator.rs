use futures::future::BoxFuture;
use log::{error, info, warn};

use crate::config::ErrorPolicy;
use crate::error::{MigratorError, Result};
use crate::output::MigrationProgress;
use crate::report::{FailureKind, ItemOutcome, MigrationReport};

use super::client::GitLabClient;
use super::types::{Group, Project};

/// Copies a group hierarchy from a source GitLab instance to a target one.
///
/// Subgroups are recreated on the target (or reused when a group with the same
/// path already exists there) and every project is recreated through a
/// server-side import. Requests are issued one at a time, depth first; a parent
/// group always exists on the target before anything below it is touched.
///
/// Re-running against the same target is safe: existing subgroups are reused and
/// projects that already exist are counted as skipped.
pub struct Migrator {
    source: GitLabClient,
    target: GitLabClient,
    policy: ErrorPolicy,
    progress: MigrationProgress,
}

impl Migrator {
    pub fn new(source: GitLabClient, target: GitLabClient, policy: ErrorPolicy) -> Self {
        Self {
            source,
            target,
            policy,
            progress: MigrationProgress::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: MigrationProgress) -> Self {
        self.progress = progress;
        self
    }

    /// Migrates every subgroup and project below `source` into `target`.
    ///
    /// # Errors
    ///
    /// With `ErrorPolicy::Abort` the first failing group, project or listing
    /// ends the run. With `ErrorPolicy::Skip` failures are only recorded in the
    /// returned report.
    pub async fn migrate_group(&self, source: &Group, target: &Group) -> Result<MigrationReport> {
        info!(
            "Migrating {} (ID {}) => {} (ID {}), on error: {}",
            source.full_path, source.id, target.full_path, target.id, self.policy
        );

        // A target nested inside the source tree would otherwise be listed and copied into itself
        let excluded = (self.source.base_url() == self.target.base_url()).then_some(target.id);

        let mut report = MigrationReport::new();
        let result = self
            .migrate_namespace(source, target, excluded, &mut report)
            .await;
        self.progress.finish(result.is_ok());
        result?;

        report.finish();
        Ok(report)
    }

    /// Imports an explicit list of projects, given relative to `source_group`,
    /// straight into `target`. Subgroups are not walked.
    pub async fn migrate_named_projects(
        &self,
        source_group: &str,
        project_paths: &[String],
        target: &Group,
    ) -> Result<MigrationReport> {
        info!(
            "Migrating {} selected projects from {source_group} => {}",
            project_paths.len(),
            target.full_path
        );

        let mut report = MigrationReport::new();
        let result = self
            .migrate_projects_by_path(source_group, project_paths, target, &mut report)
            .await;
        self.progress.finish(result.is_ok());
        result?;

        report.finish();
        Ok(report)
    }

    async fn migrate_projects_by_path(
        &self,
        source_group: &str,
        project_paths: &[String],
        target: &Group,
        report: &mut MigrationReport,
    ) -> Result<()> {
        for relative_path in project_paths {
            let full_path = format!("{source_group}/{relative_path}");
            self.progress.working_on("Project", &full_path);

            match self.source.fetch_project(&full_path).await {
                Ok(project) => self.import(&project, target, report).await?,
                Err(e) => self.tolerate(report, FailureKind::Project, &full_path, e)?,
            }
        }

        Ok(())
    }

    /// Boxed so the walk can recurse into subgroups.
    fn migrate_namespace<'a>(
        &'a self,
        source: &'a Group,
        target: &'a Group,
        excluded: Option<u64>,
        report: &'a mut MigrationReport,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(self.walk_namespace(source, target, excluded, report))
    }

    async fn walk_namespace(
        &self,
        source: &Group,
        target: &Group,
        excluded: Option<u64>,
        report: &mut MigrationReport,
    ) -> Result<()> {
        let subgroups = match self.source.list_subgroups(source.id).await {
            Ok(subgroups) => subgroups,
            Err(e) => {
                self.tolerate(report, FailureKind::Listing, &source.full_path, e)?;
                Vec::new()
            }
        };

        for subgroup in &subgroups {
            if excluded == Some(subgroup.id) {
                warn!(
                    "Skipping subgroup {}: it is the migration target",
                    subgroup.full_path
                );
                continue;
            }

            self.progress.working_on("Group", &subgroup.full_path);
            info!("Subgroup: {} (ID {})", subgroup.full_path, subgroup.id);

            let Some(target_subgroup) = self.resolve_subgroup(subgroup, target, report).await?
            else {
                continue;
            };

            self.migrate_namespace(subgroup, &target_subgroup, excluded, report)
                .await?;
        }

        let projects = match self.source.list_projects(source.id).await {
            Ok(projects) => projects,
            Err(e) => {
                self.tolerate(report, FailureKind::Listing, &source.full_path, e)?;
                Vec::new()
            }
        };

        for project in &projects {
            self.import(project, target, report).await?;
        }

        info!(
            "Finished namespace {} => {}",
            source.full_path, target.full_path
        );
        Ok(())
    }

    /// Finds or creates the target counterpart of `subgroup` below `parent`.
    ///
    /// Returns `None` when the subgroup failed and was skipped.
    async fn resolve_subgroup(
        &self,
        subgroup: &Group,
        parent: &Group,
        report: &mut MigrationReport,
    ) -> Result<Option<Group>> {
        let target_path = format!("{}/{}", parent.full_path, subgroup.path);

        match self.target.fetch_group(&target_path).await {
            Ok(existing) => {
                info!(
                    "Reusing existing subgroup {} (ID {})",
                    existing.full_path, existing.id
                );
                report.record(ItemOutcome::Reused);
                Ok(Some(existing))
            }
            Err(e) if e.is_not_found() => {
                match self.target.create_subgroup(subgroup, parent.id).await {
                    Ok(created) => {
                        info!(
                            "Created subgroup {} (ID {})",
                            created.full_path, created.id
                        );
                        report.record(ItemOutcome::Created);
                        Ok(Some(created))
                    }
                    Err(e) => {
                        self.tolerate(report, FailureKind::Group, &subgroup.full_path, e)?;
                        Ok(None)
                    }
                }
            }
            Err(e) => {
                self.tolerate(report, FailureKind::Group, &subgroup.full_path, e)?;
                Ok(None)
            }
        }
    }

    async fn import(
        &self,
        project: &Project,
        target: &Group,
        report: &mut MigrationReport,
    ) -> Result<()> {
        self.progress
            .working_on("Project", &project.path_with_namespace);

        let result = self
            .target
            .import_project(
                project,
                self.source.base_url(),
                self.source.token(),
                target.id,
            )
            .await;

        match result {
            Ok(created) => {
                info!(
                    "Triggered import of {} as {} (ID {})",
                    project.path_with_namespace, created.path_with_namespace, created.id
                );
                report.record(ItemOutcome::Imported);
                Ok(())
            }
            Err(e) if e.is_already_exists() => {
                warn!(
                    "Project {} already exists in {}, skipping",
                    project.path_with_namespace, target.full_path
                );
                report.record(ItemOutcome::AlreadyExists);
                Ok(())
            }
            Err(e) => self.tolerate(report, FailureKind::Project, &project.path_with_namespace, e),
        }
    }

    /// Applies the error policy to a failed item: record and continue, or abort.
    fn tolerate(
        &self,
        report: &mut MigrationReport,
        kind: FailureKind,
        path: &str,
        error: MigratorError,
    ) -> Result<()> {
        match self.policy {
            ErrorPolicy::Skip => {
                warn!("Skipping {kind} {path}: {error}");
                report.record_failure(kind, path, &error);
                Ok(())
            }
            ErrorPolicy::Abort => {
                error!("Aborting on {kind} {path}: {error}");
                Err(MigratorError::Item {
                    kind,
                    path: path.to_string(),
                    source: Box::new(error),
                })
            }
        }
    }
}
