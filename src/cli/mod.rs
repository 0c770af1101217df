//! CLI module for Hackflow
//!
//! Provides a command-line interface over the same fetch core as the GUI.
//! Running without a subcommand opens the window.

mod commands;
mod output;
mod shell;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use output::print_error;

use output::OutputFormat;

use crate::config::Config;

/// Hackflow - hackathon search client
#[derive(Parser, Debug)]
#[command(name = "hackflow")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[command(flatten)]
    pub output: OutputOptions,

    /// Backend base URL, overriding the config file and HACKFLOW_API_URL
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Output formatting options
#[derive(Parser, Debug, Clone)]
pub struct OutputOptions {
    /// Output in JSON format (for machine parsing)
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl OutputOptions {
    pub fn format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List every hackathon the backend knows about
    List,

    /// Search hackathons by city or title
    Search {
        /// Search text; multiple words are joined with spaces
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        command: commands::config::ConfigCommands,
    },

    /// Diagnostics and debugging
    Diag {
        #[command(subcommand)]
        command: commands::diag::DiagCommands,
    },

    /// Interactive shell
    Shell,
}

/// Load the effective configuration: file, then environment, then `--api-url`
pub fn load_config(api_url: Option<&str>) -> Result<Config> {
    let mut config = Config::load()?;
    if let Some(url) = api_url {
        config.api.base_url = url.trim().to_string();
    }
    Ok(config)
}

/// Run the CLI with a parsed subcommand
pub async fn run(command: Commands, output: &OutputOptions, api_url: Option<&str>) -> Result<()> {
    let format = output.format();
    let quiet = output.quiet;

    match command {
        Commands::List => commands::events::list(load_config(api_url)?, format, quiet).await,
        Commands::Search { query } => {
            commands::events::search(&query.join(" "), load_config(api_url)?, format, quiet).await
        }
        Commands::Config { command } => commands::config::run(command, format, quiet).await,
        Commands::Diag { command } => {
            commands::diag::run(command, load_config(api_url)?, format, quiet).await
        }
        Commands::Shell => shell::run(output, api_url).await,
    }
}
