//! Shared UI components for Hackflow

use eframe::egui::{self, Color32, RichText, Stroke};

/// Lay out `add_contents` in a horizontally centered column at most `max_width` wide
pub fn centered_column<R>(
    ui: &mut egui::Ui,
    max_width: f32,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let available = ui.available_width();
    let width = available.min(max_width);
    let pad = ((available - width) / 2.0).max(0.0);

    ui.horizontal(|ui| {
        ui.add_space(pad);
        ui.vertical(|ui| {
            ui.set_width(width);
            add_contents(ui)
        })
        .inner
    })
    .inner
}

/// Small uppercase pill with a tinted background
pub fn badge(ui: &mut egui::Ui, text: &str, color: Color32) {
    egui::Frame::new()
        .fill(color.gamma_multiply(0.12))
        .stroke(Stroke::new(1.0, color.gamma_multiply(0.3)))
        .corner_radius(egui::CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(8, 3))
        .show(ui, |ui| {
            ui.label(RichText::new(text.to_uppercase()).color(color).size(11.0).strong());
        });
}

/// Open a record's link in the system browser
pub fn open_in_browser(url: &str) {
    let url = url.trim();
    if url.is_empty() {
        tracing::warn!("Hackathon has no link to open");
        return;
    }
    if let Err(e) = open::that(url) {
        tracing::error!("Failed to open {}: {}", url, e);
    }
}
