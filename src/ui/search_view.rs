//! The search view: header, search form, error banner, result grid

use eframe::egui::{self, RichText, Stroke, Vec2};

use crate::app::HackflowApp;
use crate::app_data::app_data;
use crate::models::Hackathon;
use crate::state::GridView;
use crate::ui::card::render_card;
use crate::ui::components::{centered_column, open_in_browser};
use crate::ui::theme::Theme;

/// Narrowest a card may get before the grid drops a column
const CARD_MIN_WIDTH: f32 = 320.0;

const MAX_COLUMNS: usize = 3;

const FORM_MAX_WIDTH: f32 = 760.0;

const SUBMIT_WIDTH: f32 = 160.0;

/// Number of card columns that fit in `width`
pub fn column_count(width: f32) -> usize {
    ((width / CARD_MIN_WIDTH).floor() as usize).clamp(1, MAX_COLUMNS)
}

/// Render the whole search view
pub fn render_search_view(app: &mut HackflowApp, ui: &mut egui::Ui) {
    let theme = app.ui.current_theme.clone();

    egui::ScrollArea::vertical()
        .id_salt("search_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_space(40.0);
            render_header(ui, &theme);
            ui.add_space(32.0);

            centered_column(ui, FORM_MAX_WIDTH, |ui| render_search_form(app, ui, &theme));

            if let Some(message) = app.search.error().map(str::to_owned) {
                ui.add_space(16.0);
                centered_column(ui, FORM_MAX_WIDTH, |ui| render_error_banner(ui, &theme, &message));
            }

            ui.add_space(32.0);
            match app.search.grid_view() {
                GridView::Spinner => render_spinner(ui, &theme),
                GridView::Empty => {
                    centered_column(ui, FORM_MAX_WIDTH, |ui| render_empty_state(ui, &theme))
                }
                GridView::Cards { dimmed } => {
                    if let Some(count) = app.search.result_count() {
                        render_count_caption(ui, &theme, count);
                    }
                    render_grid(ui, &theme, app.search.results(), dimmed);
                }
            }
            ui.add_space(24.0);
        });
}

fn render_header(ui: &mut egui::Ui, theme: &Theme) {
    let text = &app_data().text;

    ui.vertical_centered(|ui| {
        ui.label(
            RichText::new(&text.title)
                .monospace()
                .size(64.0)
                .strong()
                .color(theme.accent),
        );
        ui.add_space(12.0);
        ui.label(RichText::new(&text.tagline).size(18.0).color(theme.text_secondary));
        ui.label(
            RichText::new(&text.tagline_emphasis)
                .size(18.0)
                .color(theme.accent_alt),
        );
    });
}

fn render_search_form(app: &mut HackflowApp, ui: &mut egui::Ui, theme: &Theme) {
    let text = &app_data().text;
    let busy = app.search.is_busy();
    let mut submitted = false;

    egui::Frame::new()
        .fill(theme.bg_dark)
        .stroke(Stroke::new(1.0, theme.accent.gamma_multiply(0.35)))
        .corner_radius(egui::CornerRadius::same(14))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let field_width =
                    (ui.available_width() - SUBMIT_WIDTH - ui.spacing().item_spacing.x).max(120.0);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut app.search.query)
                        .hint_text(text.search_placeholder.as_str())
                        .font(egui::FontId::proportional(18.0))
                        .frame(false)
                        .margin(egui::Margin::symmetric(12, 8))
                        .desired_width(field_width),
                );

                if app.ui.focus_search {
                    response.request_focus();
                    app.ui.focus_search = false;
                }

                // Enter submits even mid-fetch; the newer request supersedes the older
                if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    submitted = true;
                }

                if busy {
                    render_busy_button(
                        ui,
                        theme,
                        app.search.loading_text(),
                        app.search.fetching_query(),
                    );
                } else {
                    let button = egui::Button::new(
                        RichText::new(text.submit_label.to_uppercase())
                            .strong()
                            .color(theme.bg_darkest),
                    )
                    .fill(theme.accent)
                    .corner_radius(egui::CornerRadius::same(10))
                    .min_size(Vec2::new(SUBMIT_WIDTH, 40.0));

                    if ui.add(button).clicked() {
                        submitted = true;
                    }
                }
            });
        });

    if submitted {
        let event = app.search.submit(&app.client);
        app.handle_events(vec![event]);
    }
}

/// Disabled stand-in for the submit button while a fetch runs
fn render_busy_button(
    ui: &mut egui::Ui,
    theme: &Theme,
    loading_text: Option<String>,
    fetching_query: Option<&str>,
) {
    let frame = egui::Frame::new()
        .fill(theme.accent.gamma_multiply(0.8))
        .corner_radius(egui::CornerRadius::same(10))
        .show(ui, |ui| {
            ui.set_min_size(Vec2::new(SUBMIT_WIDTH, 40.0));
            ui.set_max_width(SUBMIT_WIDTH);
            ui.horizontal_centered(|ui| {
                ui.add_space(10.0);
                ui.add(egui::Spinner::new().size(16.0).color(theme.bg_darkest));
                if let Some(message) = loading_text {
                    ui.label(RichText::new(message).size(11.0).color(theme.bg_darkest));
                }
            });
        });

    if let Some(query) = fetching_query.filter(|q| !q.is_empty()) {
        frame.response.on_hover_text(format!("\"{}\"", query));
    }
}

fn render_error_banner(ui: &mut egui::Ui, theme: &Theme, message: &str) {
    egui::Frame::new()
        .fill(theme.error.gamma_multiply(0.1))
        .stroke(Stroke::new(1.0, theme.error.gamma_multiply(0.2)))
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal_wrapped(|ui| {
                ui.label(RichText::new("⚠").size(18.0).color(theme.error));
                ui.label(RichText::new(message).strong().color(theme.error));
            });
        });
}

fn render_spinner(ui: &mut egui::Ui, theme: &Theme) {
    ui.vertical_centered(|ui| {
        ui.add_space(96.0);
        ui.add(egui::Spinner::new().size(56.0).color(theme.accent));
        ui.add_space(96.0);
    });
}

fn render_empty_state(ui: &mut egui::Ui, theme: &Theme) {
    let text = &app_data().text;

    egui::Frame::new()
        .fill(theme.bg_dark.gamma_multiply(0.6))
        .stroke(Stroke::new(1.0, theme.border))
        .corner_radius(egui::CornerRadius::same(24))
        .inner_margin(egui::Margin::symmetric(24, 64))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(&text.empty_title).size(24.0).strong().color(theme.text_primary));
                ui.add_space(8.0);
                ui.label(RichText::new(&text.empty_hint).color(theme.text_muted));
            });
        });
}

fn render_count_caption(ui: &mut egui::Ui, theme: &Theme, count: usize) {
    ui.label(
        RichText::new(app_data().text.found(count))
            .size(12.0)
            .color(theme.text_muted),
    );
    ui.add_space(8.0);
}

/// Lay out the batch in rows of cards. Returns how many cards were drawn.
fn render_grid(ui: &mut egui::Ui, theme: &Theme, results: &[Hackathon], dimmed: bool) -> usize {
    let mut link_to_open: Option<String> = None;
    let mut drawn = 0;

    // Inert and faded while a newer fetch runs, so the layout does not collapse
    ui.add_enabled_ui(!dimmed, |ui| {
        if dimmed {
            ui.multiply_opacity(0.3);
        }

        let columns = column_count(ui.available_width());

        for (row_idx, row) in results.chunks(columns).enumerate() {
            ui.columns(columns, |cols| {
                for (col, hackathon) in row.iter().enumerate() {
                    let key = hackathon.card_key(row_idx * columns + col);
                    cols[col].push_id(key, |ui| {
                        if render_card(ui, theme, hackathon) {
                            link_to_open = Some(hackathon.link.clone());
                        }
                    });
                    drawn += 1;
                }
            });
            ui.add_space(16.0);
        }
    });

    if let Some(link) = link_to_open {
        open_in_browser(&link);
    }

    drawn
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_count() {
        assert_eq!(column_count(0.0), 1);
        assert_eq!(column_count(500.0), 1);
        assert_eq!(column_count(700.0), 2);
        assert_eq!(column_count(1000.0), 3);
        assert_eq!(column_count(4000.0), 3);
    }

    fn record(title: &str, format: &str, status: &str) -> Hackathon {
        Hackathon {
            title: title.to_string(),
            date: format!("{} date", title),
            format: format.to_string(),
            city: format!("{} city", title),
            age_limit: "18+".to_string(),
            link: "https://example.org".to_string(),
            status: status.to_string(),
            ..Default::default()
        }
    }

    fn collect_text(shape: &egui::Shape, out: &mut Vec<String>) {
        match shape {
            egui::Shape::Text(text) => out.push(text.galley.text().to_string()),
            egui::Shape::Vec(shapes) => shapes.iter().for_each(|s| collect_text(s, out)),
            _ => {}
        }
    }

    /// Run one headless frame of the grid; returns the card count and every painted string
    fn draw_grid(results: &[Hackathon]) -> (usize, Vec<String>) {
        let ctx = egui::Context::default();
        let theme = Theme::neon();
        let input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(1200.0, 4000.0),
            )),
            ..Default::default()
        };

        let mut drawn = 0;
        let output = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                drawn = render_grid(ui, &theme, results, false);
            });
        });

        let mut texts = Vec::new();
        for clipped in &output.shapes {
            collect_text(&clipped.shape, &mut texts);
        }
        (drawn, texts)
    }

    #[test]
    fn test_grid_draws_one_card_per_record() {
        let results = vec![
            record("Alpha", "Онлайн", ""),
            record("Beta", "Офлайн", "DEAD"),
            record("Gamma", "Офлайн", "ACTIVE"),
            record("Delta", "Онлайн", ""),
        ];
        let (drawn, texts) = draw_grid(&results);

        assert_eq!(drawn, 4);
        for name in ["Alpha", "Beta", "Gamma", "Delta"] {
            assert!(texts.iter().any(|t| t == name), "missing title {}", name);
            assert!(texts.iter().any(|t| *t == format!("{} date", name)));
            assert!(texts.iter().any(|t| *t == format!("{} city", name)));
        }
        assert_eq!(texts.iter().filter(|t| *t == "ОНЛАЙН").count(), 2);
        assert_eq!(texts.iter().filter(|t| *t == "ОФЛАЙН").count(), 2);
    }

    #[test]
    fn test_finished_badge_only_for_dead_records() {
        let results = vec![
            record("Alpha", "Онлайн", "DEAD"),
            record("Beta", "Офлайн", "dead"),
            record("Gamma", "Офлайн", ""),
        ];
        let (drawn, texts) = draw_grid(&results);

        assert_eq!(drawn, 3);
        assert_eq!(texts.iter().filter(|t| *t == "ЗАВЕРШЕНО").count(), 1);
    }

    #[test]
    fn test_empty_batch_draws_nothing() {
        assert_eq!(draw_grid(&[]).0, 0);
    }
}
