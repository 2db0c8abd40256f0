mod api;
mod cli;
mod config;
mod credentials;
mod error;
mod executor;
mod orchestrator;
mod params;
mod poll;
mod transfer;
mod ui;

use std::path::Path;
use std::time::Duration;

use anyhow::{Result, bail};
use clap::Parser;

use api::GatewayClient;
use cli::{AdminCommand, Cli, Command};
use config::FerryConfig;
use orchestrator::{JobRunner, RunOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = FerryConfig::load()?;

    let base_url = cli
        .base_url
        .clone()
        .unwrap_or_else(|| config.base_url.clone());
    if base_url.is_empty() {
        bail!("no base URL configured; pass --base-url or set base_url in ferry.toml");
    }
    let token = cli
        .token
        .clone()
        .or_else(|| (!config.token.is_empty()).then(|| config.token.clone()));
    let client = GatewayClient::new(&base_url, token);

    match cli.command {
        Command::Run {
            inputs_dir,
            output_dir,
            timeout,
            interval,
            agents,
            prefix,
            workers,
        } => {
            let options = RunOptions {
                inputs_dir,
                output_dir,
                agents,
                prefix,
                timeout: Duration::from_secs(timeout.unwrap_or(config.timeout_secs)),
                interval: Duration::from_secs(interval.unwrap_or(config.poll_interval_secs)),
                workers: workers.unwrap_or(config.workers),
            };
            let report = JobRunner::new(client, options).run().await?;
            ui::print_report(&report);
        }
        Command::Jobs => {
            let jobs = client.list_jobs().await?;
            println!("{}", serde_json::to_string_pretty(&jobs)?);
        }
        Command::Content { job_id } => {
            let items = client.job_content(&job_id).await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        Command::Admin { command } => match command {
            AdminCommand::MintToken { admin_token } => {
                let token = client.mint_developer_token(&admin_token).await?;
                let path = credentials::store_developer_token(Path::new("./credentials"), &token)?;
                println!("Developer token stored at {}", path.display());
            }
            AdminCommand::ListTokens { admin_token } => {
                let tokens = client.list_developer_tokens(&admin_token).await?;
                println!("{}", serde_json::to_string_pretty(&tokens)?);
            }
        },
    }

    Ok(())
}
