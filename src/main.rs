// Hide console window in release builds (Windows GUI app)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod api;
mod app;
mod app_data;
mod cli;
mod config;
mod models;
mod state;
mod task;
mod ticker;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::HackathonClient;
use crate::app_data::app_data;
use crate::cli::Cli;

/// Default log filter when RUST_LOG is unset
fn default_filter(cli: &Cli) -> &'static str {
    match (&cli.command, cli.output.verbose) {
        (_, true) => "hackflow=debug",
        (None, false) => "hackflow=debug,info",
        (Some(_), false) => "hackflow=warn",
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter(&cli).into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(command) = cli.command {
        if let Err(e) = cli::run(command, &cli.output, cli.api_url.as_deref()).await {
            cli::print_error(&e.to_string());
            std::process::exit(1);
        }
        return Ok(());
    }

    tracing::info!("Starting Hackflow");

    let config = cli::load_config(cli.api_url.as_deref())?;
    let client = HackathonClient::from_config(&config.api)?;

    let window = &app_data().window;
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size(window.initial_size)
        .with_min_inner_size(window.min_size)
        .with_title(&window.title);

    let native_options = eframe::NativeOptions {
        viewport,
        persist_window: true,
        ..Default::default()
    };

    eframe::run_native(
        "Hackflow",
        native_options,
        Box::new(|cc| Ok(Box::new(app::HackflowApp::new(cc, config, client)))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run application: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        let gui = Cli::try_parse_from(["hackflow"]).unwrap();
        assert_eq!(default_filter(&gui), "hackflow=debug,info");

        let cli = Cli::try_parse_from(["hackflow", "list"]).unwrap();
        assert_eq!(default_filter(&cli), "hackflow=warn");

        let verbose = Cli::try_parse_from(["hackflow", "list", "-v"]).unwrap();
        assert_eq!(default_filter(&verbose), "hackflow=debug");
    }
}
