//! Application data embedded from TOML at compile time.
//!
//! This module provides access to application-level constants that are:
//! - Embedded at compile time via `include_str!`
//! - Parsed lazily on first access via `OnceLock`
//! - Immutable at runtime (not user-configurable)
//!
//! This is distinct from `config.rs` which handles user preferences.
//! App data defines *how the client works* (endpoint paths, status sentinels,
//! display text), while config defines *user choices* (backend URL, theme).
//!
//! The data file is `embedded/app.toml`.

use serde::Deserialize;
use std::sync::OnceLock;
use std::time::Duration;

const APP_TOML: &str = include_str!("../embedded/app.toml");

/// All embedded application data
#[derive(Debug, Deserialize)]
pub struct AppData {
    pub window: WindowData,
    pub api: ApiData,
    pub search: SearchData,
    pub cards: CardData,
    pub text: TextData,
}

#[derive(Debug, Deserialize)]
pub struct WindowData {
    pub initial_size: [f32; 2],
    pub min_size: [f32; 2],
    pub title: String,
}

/// Backend endpoint layout
#[derive(Debug, Deserialize)]
pub struct ApiData {
    pub default_base_url: String,
    pub list_path: String,
    pub search_path: String,
    pub query_param: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize)]
pub struct SearchData {
    /// Progress strings cycled during a query-driven fetch
    pub loading_messages: Vec<String>,
    pub ticker_interval_ms: u64,
    /// The only error text ever shown to the user
    pub generic_error: String,
}

impl SearchData {
    pub fn ticker_interval(&self) -> Duration {
        Duration::from_millis(self.ticker_interval_ms)
    }
}

#[derive(Debug, Deserialize)]
pub struct CardData {
    pub finished_status: String,
    pub finished_label: String,
    pub online_marker: String,
    pub age_label: String,
    pub details_label: String,
}

#[derive(Debug, Deserialize)]
pub struct TextData {
    pub title: String,
    pub tagline: String,
    pub tagline_emphasis: String,
    pub search_placeholder: String,
    pub submit_label: String,
    pub empty_title: String,
    pub empty_hint: String,
    pub status_ready: String,
    pub status_loading: String,
    /// Contains a `{query}` placeholder
    pub status_searching: String,
    /// Contains a `{count}` placeholder
    pub status_found: String,
    pub status_failed: String,
}

impl TextData {
    pub fn searching(&self, query: &str) -> String {
        self.status_searching.replace("{query}", query)
    }

    pub fn found(&self, count: usize) -> String {
        self.status_found.replace("{count}", &count.to_string())
    }
}

/// Get application data (lazy-loaded)
pub fn app_data() -> &'static AppData {
    static DATA: OnceLock<AppData> = OnceLock::new();
    DATA.get_or_init(|| {
        toml::from_str(APP_TOML).unwrap_or_else(|e| {
            panic!("Failed to parse app.toml: {}", e);
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_data_parses() {
        let data = app_data();
        assert_eq!(data.api.list_path, "/api/hackathons");
        assert_eq!(data.api.search_path, "/api/search");
        assert_eq!(data.api.timeout_secs, 20);
        assert_eq!(data.cards.finished_status, "DEAD");
    }

    #[test]
    fn test_three_loading_messages() {
        let search = &app_data().search;
        assert_eq!(search.loading_messages.len(), 3);
        assert_eq!(search.ticker_interval(), Duration::from_millis(1500));
    }

    #[test]
    fn test_status_templates() {
        let text = &app_data().text;
        assert_eq!(text.searching("Казань"), "Ищем «Казань»...");
        assert_eq!(text.found(3), "Найдено хакатонов: 3");
    }
}
