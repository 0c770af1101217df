use eframe::egui::{self, RichText};

use crate::api::HackathonClient;
use crate::config::Config;
use crate::state::{SearchState, StateEvent, UiState};
use crate::ui::theme::ThemePreset;

/// Main application state
pub struct HackflowApp {
    /// Application configuration
    pub config: Config,
    /// Backend API client
    pub client: HackathonClient,
    /// Query, results and fetch lifecycle
    pub search: SearchState,
    /// Theme and status bar
    pub ui: UiState,
}

impl HackflowApp {
    /// Create the application and start loading the full catalog
    pub fn new(_cc: &eframe::CreationContext<'_>, config: Config, client: HackathonClient) -> Self {
        let theme = config.appearance.theme.theme();

        let mut app = Self {
            config,
            client,
            search: SearchState::default(),
            ui: UiState::new(theme),
        };

        tracing::info!("Using backend at {}", app.client.base_url());
        let event = app.search.fetch("", &app.client);
        app.handle_events(vec![event]);

        app
    }

    /// Apply events reported by state poll methods
    pub fn handle_events(&mut self, events: Vec<StateEvent>) {
        for event in events {
            match event {
                StateEvent::StatusMessage(message) => self.ui.status_message = message,
                StateEvent::LogError(message) => tracing::error!("{}", message),
                StateEvent::LogInfo(message) => tracing::info!("{}", message),
            }
        }
    }

    /// Save configuration to disk
    pub fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::error!("Failed to save config: {}", e);
        }
    }

    fn render_status_bar(&mut self, ui: &mut egui::Ui) {
        let theme = self.ui.current_theme.clone();

        ui.horizontal(|ui| {
            ui.label(RichText::new(&self.ui.status_message).color(theme.text_secondary));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut selected = self.config.appearance.theme;
                egui::ComboBox::from_id_salt("theme_select")
                    .selected_text(selected.name())
                    .show_ui(ui, |ui| {
                        for preset in ThemePreset::all() {
                            ui.selectable_value(&mut selected, *preset, preset.name());
                        }
                    });
                if selected != self.config.appearance.theme {
                    self.config.appearance.theme = selected;
                    self.ui.current_theme = selected.theme();
                    self.ui.theme_dirty = true;
                    self.save_config();
                }

                ui.label(RichText::new(self.client.base_url()).color(theme.text_muted).size(11.0));
            });
        });
    }
}

impl eframe::App for HackflowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.ui.theme_dirty {
            self.ui.current_theme.apply(ctx);
            self.ui.theme_dirty = false;
        }

        // Poll async tasks
        let events = self.search.poll(ctx);
        self.handle_events(events);

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            self.render_status_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            crate::ui::render_search_view(self, ui);
        });
    }
}
