//! Application state modules
//!
//! State structs own their fields and poll methods; they report back to
//! `HackflowApp` through `StateEvent` values instead of mutating it directly.

mod search;
mod ui;

pub use search::{GridView, SearchState};
pub use ui::UiState;

/// Events that state poll methods can return.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    /// Update the status message
    StatusMessage(String),

    /// Log an error message
    LogError(String),

    /// Log an info message
    LogInfo(String),
}
