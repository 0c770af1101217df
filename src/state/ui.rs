//! UI-related application state

use crate::ui::theme::Theme;

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Focus the search box on the first frame
    pub focus_search: bool,
    /// Status message for the status bar
    pub status_message: String,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            current_theme: theme,
            theme_dirty: true, // Apply theme on first frame
            focus_search: true,
            status_message: crate::app_data::app_data().text.status_ready.clone(),
        }
    }
}
