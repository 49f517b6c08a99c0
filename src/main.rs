mod auth;
mod cli;
mod config;
mod error;
mod output;
mod providers;
mod report;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("gitlab_group_migrator=info"),
    )
    .init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting GitLab group migration");
    cli.execute().await?;

    Ok(())
}
