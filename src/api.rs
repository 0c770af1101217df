//! Backend API client for fetching hackathons.
//!
//! This module provides:
//!
//! - `HackathonClient`: HTTP client wrapper bound to one backend and one timeout window
//! - `FetchError`: what can go wrong during a single fetch
//!
//! The backend exposes two endpoints:
//!
//! - **Catalog**: `GET /api/hackathons`, used when the query is empty
//! - **Search**: `GET /api/search?q=<query>`, used otherwise; an empty array is a
//!   valid "no matches" answer
//!
//! Every failure collapses to one user-facing message. The variant is kept for
//! logs so a timeout, an HTTP status and a refused connection stay distinguishable.

use anyhow::Result;
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::app_data::app_data;
use crate::config::ApiConfig;
use crate::models::Hackathon;

/// User agent for API requests
const USER_AGENT: &str = concat!("Hackflow/", env!("CARGO_PKG_VERSION"));

/// Errors from a single fetch attempt
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("HTTP error: {0}")]
    Status(StatusCode),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The message shown to the user, identical for every variant
    pub fn user_message(&self) -> &'static str {
        &app_data().search.generic_error
    }
}

/// Hackathon API client
#[derive(Clone)]
pub struct HackathonClient {
    client: reqwest::Client,
    base_url: Arc<str>,
    timeout: Duration,
}

impl HackathonClient {
    /// Create a client for the backend at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            timeout,
        })
    }

    /// Create a client from the `[api]` config section
    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        Self::new(&api.base_url, api.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// URL for a query: the catalog when blank, the search endpoint otherwise
    pub fn endpoint(&self, query: &str) -> String {
        let api = &app_data().api;
        let query = query.trim();

        if query.is_empty() {
            format!("{}{}", self.base_url, api.list_path)
        } else {
            format!(
                "{}{}?{}={}",
                self.base_url,
                api.search_path,
                api.query_param,
                urlencoding::encode(query)
            )
        }
    }

    /// Fetch the batch for `query`.
    ///
    /// The timeout covers connecting, the status line and the body. When it
    /// fires the request future is dropped, which aborts the connection.
    pub async fn fetch(&self, query: &str) -> Result<Vec<Hackathon>, FetchError> {
        let start = Instant::now();
        let url = self.endpoint(query);
        tracing::debug!("GET {}", url);

        let batch = tokio::time::timeout(self.timeout, self.get_batch(&url))
            .await
            .map_err(|_| {
                tracing::warn!("Request to {} timed out after {:?}", url, self.timeout);
                FetchError::Timeout(self.timeout)
            })??;

        tracing::info!(
            "Fetched {} hackathons in {:.1}s",
            batch.len(),
            start.elapsed().as_secs_f32()
        );
        Ok(batch)
    }

    /// Fetch the full catalog
    pub async fn list(&self) -> Result<Vec<Hackathon>, FetchError> {
        self.fetch("").await
    }

    async fn get_batch(&self, url: &str) -> Result<Vec<Hackathon>, FetchError> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(FetchError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Backend answered {} for {}", status, url);
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await.map_err(FetchError::Transport)?;
        parse_batch(&body)
    }
}

/// Parse a response body; an empty body or `null` is an empty batch
pub fn parse_batch(body: &[u8]) -> Result<Vec<Hackathon>, FetchError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    let batch: Option<Vec<Hackathon>> = serde_json::from_slice(body)?;
    Ok(batch.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_batch() -> serde_json::Value {
        serde_json::json!([
            {"ID": 1, "title": "Hack the Neva", "date": "1-3 марта", "format": "Офлайн",
             "city": "Санкт-Петербург", "ageLimit": "18+", "link": "https://a.example", "status": ""},
            {"ID": 2, "title": "Remote Jam", "date": "10 марта", "format": "Онлайн",
             "city": "Москва", "ageLimit": "14+", "link": "https://b.example", "status": "DEAD"}
        ])
    }

    fn client_for(server: &MockServer, timeout: Duration) -> HackathonClient {
        HackathonClient::new(&server.uri(), timeout).unwrap()
    }

    #[test]
    fn test_endpoint_selection() {
        let client = HackathonClient::new("http://localhost:8080/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint(""), "http://localhost:8080/api/hackathons");
        assert_eq!(client.endpoint("   "), "http://localhost:8080/api/hackathons");
        assert_eq!(
            client.endpoint("St. Petersburg"),
            "http://localhost:8080/api/search?q=St.%20Petersburg"
        );
        assert_eq!(
            client.endpoint("a&b=c"),
            "http://localhost:8080/api/search?q=a%26b%3Dc"
        );
    }

    #[test]
    fn test_endpoint_encodes_cyrillic() {
        let client = HackathonClient::new("http://h", Duration::from_secs(1)).unwrap();
        assert_eq!(client.endpoint("Казань"), "http://h/api/search?q=%D0%9A%D0%B0%D0%B7%D0%B0%D0%BD%D1%8C");
    }

    #[test]
    fn test_parse_empty_and_null_bodies() {
        assert!(parse_batch(b"").unwrap().is_empty());
        assert!(parse_batch(b"  \n").unwrap().is_empty());
        assert!(parse_batch(b"null").unwrap().is_empty());
        assert!(parse_batch(b"[]").unwrap().is_empty());
        assert!(matches!(parse_batch(b"{oops"), Err(FetchError::Decode(_))));
    }

    #[test]
    fn test_every_error_shares_one_message() {
        let timeout = FetchError::Timeout(Duration::from_secs(20));
        let status = FetchError::Status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(timeout.user_message(), status.user_message());
        assert!(!status.user_message().contains("500"));
    }

    #[tokio::test]
    async fn test_empty_query_hits_catalog_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/hackathons"))
            .respond_with(ResponseTemplate::new(200).set_body_json(sample_batch()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&server)
            .await;

        let batch = client_for(&server, Duration::from_secs(5)).list().await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1].title, "Remote Jam");
        assert!(batch[1].is_finished());
    }

    #[tokio::test]
    async fn test_search_sends_encoded_query_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/search"))
            .and(query_param("q", "St. Petersburg"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let batch = client_for(&server, Duration::from_secs(5))
            .fetch("St. Petersburg")
            .await
            .unwrap();
        assert!(batch.is_empty());

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.query(), Some("q=St.%20Petersburg"));
        assert_eq!(
            requests[0].headers.get("accept").and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_server_error_is_status() {
        let server = MockServer::start().await;
        Mock::given(path("/api/hackathons"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server, Duration::from_secs(5)).list().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(s) if s == StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[tokio::test]
    async fn test_null_body_is_empty_batch() {
        let server = MockServer::start().await;
        Mock::given(path("/api/search"))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .mount(&server)
            .await;

        let batch = client_for(&server, Duration::from_secs(5)).fetch("nothing").await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_slow_backend_times_out() {
        let server = MockServer::start().await;
        Mock::given(path("/api/search"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sample_batch())
                    .set_delay(Duration::from_secs(2)),
            )
            .mount(&server)
            .await;

        let timeout = Duration::from_millis(100);
        let started = Instant::now();
        let err = client_for(&server, timeout).fetch("slow").await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(d) if d == timeout));
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        // Bind then drop a listener to get a port nothing is serving on
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client =
            HackathonClient::new(&format!("http://127.0.0.1:{}", port), Duration::from_secs(5)).unwrap();

        let err = client.list().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
    }
}
