use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::{print_summary, MigrationProgress};
use crate::providers::gitlab::{GitLabClient, Migrator};

#[derive(Parser)]
#[command(name = "gitlab-group-migrator")]
#[command(author, version, about = "Copies a GitLab group hierarchy to another instance", long_about = None)]
pub struct Cli {
    /// Path to the YAML, TOML or JSON configuration file
    #[arg(short, long, env = "GITLAB_MIGRATOR_CONFIG", default_value = "config.yaml")]
    config: PathBuf,
}

impl Cli {
    pub async fn execute(&self) -> Result<()> {
        let config = Config::load(&self.config)?;
        info!("Loaded configuration from {}", self.config.display());

        let timeout = config.request_timeout();
        let source = GitLabClient::new(
            &config.source_gitlab_url,
            config.source_access_token.clone(),
            timeout,
        )?;
        let target = GitLabClient::new(
            &config.target_gitlab_url,
            config.target_access_token.clone(),
            timeout,
        )?;

        let target_group = target
            .fetch_group(&config.target_group)
            .await
            .with_context(|| format!("Failed to fetch target group {}", config.target_group))?;

        let report = if config.specific_projects.is_empty() {
            let source_group = source
                .fetch_group(&config.source_group)
                .await
                .with_context(|| {
                    format!("Failed to fetch source group {}", config.source_group)
                })?;

            Migrator::new(source, target, config.on_error)
                .with_progress(MigrationProgress::spinner())
                .migrate_group(&source_group, &target_group)
                .await
                .context("Migration failed")?
        } else {
            Migrator::new(source, target, config.on_error)
                .with_progress(MigrationProgress::spinner())
                .migrate_named_projects(
                    &config.source_group,
                    &config.specific_projects,
                    &target_group,
                )
                .await
                .context("Migration of selected projects failed")?
        };

        print_summary(&report);
        info!("Migration completed");

        Ok(())
    }
}
