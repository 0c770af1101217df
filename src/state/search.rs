//! Search state: the query, the last batch, and the fetch lifecycle

use eframe::egui;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::{FetchError, HackathonClient};
use crate::app_data::app_data;
use crate::models::Hackathon;
use crate::state::StateEvent;
use crate::task::{PollResult, poll_task};
use crate::ticker::{LoadingTicker, TickerSettings};

/// Where the current fetch stands.
///
/// Busy and failed are separate variants, so a fetch in flight can never
/// carry an error at the same time.
#[derive(Debug, Default)]
pub enum FetchPhase {
    /// Nothing has been requested yet, or the last request was superseded
    #[default]
    Idle,
    Fetching {
        request_id: u64,
        /// Trimmed query; empty for the catalog
        query: String,
        /// Rotating progress text, only for query-driven fetches
        progress: Option<watch::Receiver<String>>,
    },
    Succeeded {
        count: usize,
    },
    Failed {
        message: String,
    },
}

/// What the result area should show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridView {
    /// Busy with nothing to show yet
    Spinner,
    /// No results and no error
    Empty,
    /// The batch, dimmed and inert while a newer fetch runs
    Cards { dimmed: bool },
}

/// Output of one fetch task, tagged with the request that produced it
struct FetchOutcome {
    request_id: u64,
    result: Result<Vec<Hackathon>, FetchError>,
}

/// Search state
pub struct SearchState {
    /// Text in the search box
    pub query: String,
    /// Last successfully fetched batch
    results: Vec<Hackathon>,
    phase: FetchPhase,
    /// Id of the most recently issued request
    last_request_id: u64,
    task: Option<JoinHandle<FetchOutcome>>,
    ticker: TickerSettings,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::with_ticker(TickerSettings::from_app_data())
    }
}

impl SearchState {
    pub fn with_ticker(ticker: TickerSettings) -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            phase: FetchPhase::Idle,
            last_request_id: 0,
            task: None,
            ticker,
        }
    }

    pub fn results(&self) -> &[Hackathon] {
        &self.results
    }

    pub fn phase(&self) -> &FetchPhase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, FetchPhase::Fetching { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            FetchPhase::Failed { message } => Some(message.as_str()),
            _ => None,
        }
    }

    /// Query of the fetch in flight, if any
    pub fn fetching_query(&self) -> Option<&str> {
        match &self.phase {
            FetchPhase::Fetching { query, .. } => Some(query.as_str()),
            _ => None,
        }
    }

    /// Current rotating progress message, if a query-driven fetch is running
    pub fn loading_text(&self) -> Option<String> {
        match &self.phase {
            FetchPhase::Fetching {
                progress: Some(rx), ..
            } => Some(rx.borrow().clone()),
            _ => None,
        }
    }

    /// Size of the batch the last successful fetch returned
    pub fn result_count(&self) -> Option<usize> {
        match self.phase {
            FetchPhase::Succeeded { count } => Some(count),
            _ => None,
        }
    }

    pub fn grid_view(&self) -> GridView {
        let busy = self.is_busy();
        if busy && self.results.is_empty() {
            GridView::Spinner
        } else if self.results.is_empty() && self.error().is_none() {
            GridView::Empty
        } else {
            GridView::Cards { dimmed: busy }
        }
    }

    /// Fetch with the text currently in the search box
    pub fn submit(&mut self, client: &HackathonClient) -> StateEvent {
        let query = self.query.clone();
        self.fetch(&query, client)
    }

    /// Start fetching the batch for `query`.
    ///
    /// A fetch still in flight is aborted and its outcome will never be
    /// applied; that cancellation is silent.
    pub fn fetch(&mut self, query: &str, client: &HackathonClient) -> StateEvent {
        if let Some(previous) = self.task.take() {
            tracing::debug!("Request #{} superseded", self.last_request_id);
            previous.abort();
        }

        self.last_request_id += 1;
        let request_id = self.last_request_id;
        let query = query.trim().to_string();

        let (progress, ticker) = match self.ticker.channel() {
            Some((tx, rx)) if !query.is_empty() => (Some(rx), Some((self.ticker.clone(), tx))),
            _ => (None, None),
        };

        let client = client.clone();
        let task_query = query.clone();
        self.task = Some(tokio::spawn(async move {
            // Lives exactly as long as the request, however it ends
            let _ticker = ticker.map(|(settings, tx)| LoadingTicker::start(settings, tx));
            let result = client.fetch(&task_query).await;
            FetchOutcome { request_id, result }
        }));

        let text = &app_data().text;
        let status = if query.is_empty() {
            text.status_loading.clone()
        } else {
            text.searching(&query)
        };

        self.phase = FetchPhase::Fetching {
            request_id,
            query,
            progress,
        };

        StateEvent::StatusMessage(status)
    }

    /// Poll the async fetch task for completion
    pub fn poll(&mut self, ctx: &egui::Context) -> Vec<StateEvent> {
        let mut events = Vec::new();

        match poll_task(&mut self.task) {
            PollResult::Complete(Ok(outcome)) => {
                if !self.is_current(outcome.request_id) {
                    tracing::debug!("Discarding stale outcome of request #{}", outcome.request_id);
                    return events;
                }
                match outcome.result {
                    Ok(batch) => {
                        let count = batch.len();
                        self.results = batch;
                        self.phase = FetchPhase::Succeeded { count };
                        events.push(StateEvent::StatusMessage(app_data().text.found(count)));
                        events.push(StateEvent::LogInfo(format!(
                            "Request #{} returned {} hackathons",
                            outcome.request_id, count
                        )));
                    }
                    Err(e) => {
                        events.push(StateEvent::LogError(format!(
                            "Failed to load hackathons: {}",
                            e
                        )));
                        // Details go to the log only
                        events.push(StateEvent::StatusMessage(
                            app_data().text.status_failed.clone(),
                        ));
                        self.phase = FetchPhase::Failed {
                            message: e.user_message().to_string(),
                        };
                    }
                }
            }
            PollResult::Complete(Err(e)) if e.is_cancelled() => {
                tracing::debug!("Fetch task cancelled");
                self.phase = FetchPhase::Idle;
            }
            PollResult::Complete(Err(e)) => {
                events.push(StateEvent::LogError(format!("Fetch task panicked: {}", e)));
                self.phase = FetchPhase::Failed {
                    message: app_data().search.generic_error.clone(),
                };
            }
            PollResult::Pending => ctx.request_repaint(),
            PollResult::NoTask => {}
        }

        events
    }

    fn is_current(&self, request_id: u64) -> bool {
        matches!(self.phase, FetchPhase::Fetching { request_id: id, .. } if id == request_id)
    }
}
