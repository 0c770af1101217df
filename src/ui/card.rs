//! A single hackathon card

use eframe::egui::{self, RichText, Stroke, Vec2};

use crate::app_data::app_data;
use crate::models::Hackathon;
use crate::ui::components::badge;
use crate::ui::theme::Theme;

/// Render one card. Returns true when the details button was clicked.
pub fn render_card(ui: &mut egui::Ui, theme: &Theme, hackathon: &Hackathon) -> bool {
    let labels = &app_data().cards;
    let mut clicked = false;

    egui::Frame::new()
        .fill(theme.bg_card)
        .stroke(Stroke::new(1.0, theme.border))
        .corner_radius(egui::CornerRadius::same(16))
        .inner_margin(egui::Margin::same(20))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());

            // Format, finished marker, date
            ui.horizontal_wrapped(|ui| {
                let format_color = if hackathon.is_online() {
                    theme.badge_online
                } else {
                    theme.badge_offline
                };
                badge(ui, &hackathon.format, format_color);

                if hackathon.is_finished() {
                    badge(ui, &labels.finished_label, theme.error);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(RichText::new(&hackathon.date).color(theme.text_secondary).size(12.0));
                });
            });

            ui.add_space(16.0);
            ui.label(
                RichText::new(&hackathon.title)
                    .color(theme.text_primary)
                    .size(22.0)
                    .strong(),
            );
            ui.add_space(16.0);

            ui.label(RichText::new(&hackathon.city).color(theme.text_secondary));
            ui.add_space(4.0);
            ui.label(
                RichText::new(format!("{}: {}", labels.age_label, hackathon.age_limit))
                    .color(theme.text_secondary),
            );

            ui.add_space(20.0);
            let button = egui::Button::new(
                RichText::new(format!("{} →", labels.details_label))
                    .color(theme.text_primary)
                    .strong(),
            )
            .fill(theme.bg_light)
            .corner_radius(egui::CornerRadius::same(10))
            .min_size(Vec2::new(ui.available_width(), 36.0));

            let response = ui.add(button).on_hover_text(hackathon.link.as_str());
            if response.clicked() {
                clicked = true;
            }
        });

    clicked
}
