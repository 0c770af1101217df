//! Listing and searching hackathons

use anyhow::Result;
use serde::Serialize;

use crate::api::{FetchError, HackathonClient};
use crate::app_data::app_data;
use crate::cli::output::{clear_progress, print_formatted, print_progress, OutputFormat};
use crate::config::Config;
use crate::models::Hackathon;
use crate::ticker::{LoadingTicker, TickerSettings};

/// JSON-serializable fetch result
#[derive(Serialize)]
struct EventsResult<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a str>,
    count: usize,
    hackathons: &'a [Hackathon],
}

pub async fn list(config: Config, format: OutputFormat, quiet: bool) -> Result<()> {
    let client = HackathonClient::from_config(&config.api)?;
    let batch = fetch_or_report(&client, "", false).await?;
    print_batch(None, &batch, format, quiet);
    Ok(())
}

pub async fn search(query: &str, config: Config, format: OutputFormat, quiet: bool) -> Result<()> {
    let client = HackathonClient::from_config(&config.api)?;
    let show_progress = format == OutputFormat::Text && !quiet;
    let batch = fetch_or_report(&client, query, show_progress).await?;
    print_batch(Some(query.trim()), &batch, format, quiet);
    Ok(())
}

/// Fetch, turning any failure into the generic user message
async fn fetch_or_report(
    client: &HackathonClient,
    query: &str,
    show_progress: bool,
) -> Result<Vec<Hackathon>> {
    match fetch_with_progress(client, query, show_progress).await {
        Ok(batch) => Ok(batch),
        Err(e) => {
            tracing::warn!("Fetch from {} failed: {}", client.base_url(), e);
            anyhow::bail!(e.user_message())
        }
    }
}

/// Fetch while echoing the rotating progress message on stderr
async fn fetch_with_progress(
    client: &HackathonClient,
    query: &str,
    show_progress: bool,
) -> Result<Vec<Hackathon>, FetchError> {
    let settings = TickerSettings::from_app_data();
    let channel = settings.channel().filter(|_| show_progress && !query.trim().is_empty());
    let Some((tx, mut rx)) = channel else {
        return client.fetch(query).await;
    };

    let _ticker = LoadingTicker::start(settings, tx);
    let fetch = client.fetch(query);
    tokio::pin!(fetch);

    print_progress(rx.borrow_and_update().as_str());
    let result = loop {
        tokio::select! {
            result = &mut fetch => break result,
            Ok(()) = rx.changed() => print_progress(rx.borrow_and_update().as_str()),
        }
    };
    clear_progress();

    result
}

fn print_batch(query: Option<&str>, batch: &[Hackathon], format: OutputFormat, quiet: bool) {
    let result = EventsResult {
        query,
        count: batch.len(),
        hackathons: batch,
    };

    print_formatted(&result, format, |r| {
        if r.hackathons.is_empty() {
            let text = &app_data().text;
            return format!("{}\n{}", text.empty_title, text.empty_hint);
        }

        let mut lines: Vec<String> = r.hackathons.iter().map(format_hackathon_text).collect();
        if !quiet {
            lines.push(format!("{} hackathons", r.count));
        }
        lines.join("\n\n")
    });
}

/// Multi-line text rendering of one record
fn format_hackathon_text(hackathon: &Hackathon) -> String {
    let cards = &app_data().cards;

    let mut header = format!("[{}]", hackathon.format.to_uppercase());
    if hackathon.is_finished() {
        header.push_str(&format!(" [{}]", cards.finished_label.to_uppercase()));
    }
    header.push(' ');
    header.push_str(&hackathon.title);

    let details = [
        hackathon.date.as_str(),
        hackathon.city.as_str(),
        &format!("{}: {}", cards.age_label, hackathon.age_limit),
    ]
    .iter()
    .filter(|s| !s.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" · ");

    let mut out = format!("{}\n    {}", header, details);
    if !hackathon.link.is_empty() {
        out.push_str(&format!("\n    {}", hackathon.link));
    }
    out
}
