//! Diagnostic and debugging commands

use std::time::Instant;

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use crate::api::HackathonClient;
use crate::cli::output::{print_formatted, print_status, OutputFormat};
use crate::cli::shell;
use crate::config::Config;

#[derive(Subcommand, Debug)]
pub enum DiagCommands {
    /// Show data paths and the effective backend URL
    Paths,

    /// Check that the backend answers the catalog request
    Ping,
}

#[derive(Serialize)]
struct PathsResult {
    config_file: String,
    shell_history: String,
    base_url: String,
}

#[derive(Serialize)]
struct PingResult {
    base_url: String,
    reachable: bool,
    hackathons: usize,
    latency_ms: u64,
    timeout_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub async fn run(command: DiagCommands, config: Config, format: OutputFormat, _quiet: bool) -> Result<()> {
    match command {
        DiagCommands::Paths => paths(&config, format),
        DiagCommands::Ping => ping(&config, format).await,
    }
}

fn paths(config: &Config, format: OutputFormat) -> Result<()> {
    let result = PathsResult {
        config_file: Config::config_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| "<error>".to_string()),
        shell_history: shell::history_path()
            .map(|p| p.to_string_lossy().to_string())
            .unwrap_or_else(|_| "<error>".to_string()),
        base_url: config.api.base_url.clone(),
    };

    print_formatted(&result, format, |r| {
        [
            format!("Config file:    {}", r.config_file),
            format!("Shell history:  {}", r.shell_history),
            format!("Backend:        {}", r.base_url),
        ]
        .join("\n")
    });

    Ok(())
}

async fn ping(config: &Config, format: OutputFormat) -> Result<()> {
    let client = HackathonClient::from_config(&config.api)?;

    let started = Instant::now();
    let outcome = client.list().await;
    let latency_ms = started.elapsed().as_millis() as u64;

    let result = match outcome {
        Ok(batch) => PingResult {
            base_url: client.base_url().to_string(),
            reachable: true,
            hackathons: batch.len(),
            latency_ms,
            timeout_secs: client.timeout().as_secs(),
            error: None,
        },
        Err(e) => PingResult {
            base_url: client.base_url().to_string(),
            reachable: false,
            hackathons: 0,
            latency_ms,
            timeout_secs: client.timeout().as_secs(),
            error: Some(e.to_string()),
        },
    };

    match format {
        OutputFormat::Json => print_formatted(&result, format, |_| String::new()),
        OutputFormat::Text => {
            let message = match &result.error {
                None => format!(
                    "{} answered in {} ms ({} hackathons)",
                    result.base_url, result.latency_ms, result.hackathons
                ),
                Some(error) => format!("{} unreachable: {}", result.base_url, error),
            };
            print_status(result.reachable, &message);
        }
    }

    if !result.reachable {
        anyhow::bail!("Backend is not reachable");
    }

    Ok(())
}
