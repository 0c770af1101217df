use eframe::egui::{self, Color32, Stroke, Visuals};
use serde::{Deserialize, Serialize};

/// Available theme presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreset {
    #[default]
    Neon,
    Midnight,
}

impl ThemePreset {
    /// Get all available presets
    pub fn all() -> &'static [ThemePreset] {
        &[ThemePreset::Neon, ThemePreset::Midnight]
    }

    /// Get display name for the preset
    pub fn name(&self) -> &'static str {
        match self {
            ThemePreset::Neon => "Neon",
            ThemePreset::Midnight => "Midnight",
        }
    }

    /// Parse a preset from its config name, case-insensitively
    pub fn from_name(name: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Get the theme colors for this preset
    pub fn theme(&self) -> Theme {
        match self {
            ThemePreset::Neon => Theme::neon(),
            ThemePreset::Midnight => Theme::midnight(),
        }
    }
}

/// Theme color definitions
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg_darkest: Color32,
    pub bg_dark: Color32,
    pub bg_card: Color32,
    pub bg_light: Color32,

    // Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    // Accent colors
    pub accent: Color32,
    pub accent_alt: Color32,

    // Badges
    pub badge_online: Color32,
    pub badge_offline: Color32,
    pub error: Color32,

    pub border: Color32,
}

impl Theme {
    /// Neon green on near-black, the Hackflow look
    pub fn neon() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(5, 5, 16),
            bg_dark: Color32::from_rgb(10, 10, 22),
            bg_card: Color32::from_rgb(15, 15, 29),
            bg_light: Color32::from_rgb(28, 28, 44),

            text_primary: Color32::from_rgb(255, 255, 255),
            text_secondary: Color32::from_rgb(212, 212, 216), // Zinc-300
            text_muted: Color32::from_rgb(113, 113, 122),     // Zinc-500

            accent: Color32::from_rgb(0, 255, 157),
            accent_alt: Color32::from_rgb(0, 240, 255),

            badge_online: Color32::from_rgb(96, 165, 250),   // Blue-400
            badge_offline: Color32::from_rgb(192, 132, 252), // Purple-400
            error: Color32::from_rgb(248, 113, 113),         // Red-400

            border: Color32::from_rgb(38, 38, 52),
        }
    }

    /// Quieter blue variant
    pub fn midnight() -> Self {
        Self {
            bg_darkest: Color32::from_rgb(11, 15, 25),
            bg_dark: Color32::from_rgb(15, 23, 42),  // Slate-900
            bg_card: Color32::from_rgb(22, 33, 54),
            bg_light: Color32::from_rgb(35, 48, 70),

            text_primary: Color32::from_rgb(248, 250, 252),
            text_secondary: Color32::from_rgb(203, 213, 225), // Slate-300
            text_muted: Color32::from_rgb(100, 116, 139),     // Slate-500

            accent: Color32::from_rgb(56, 189, 248),     // Sky-400
            accent_alt: Color32::from_rgb(129, 140, 248), // Indigo-400

            badge_online: Color32::from_rgb(96, 165, 250),
            badge_offline: Color32::from_rgb(192, 132, 252),
            error: Color32::from_rgb(251, 113, 133), // Rose-400

            border: Color32::from_rgb(51, 65, 85),
        }
    }

    /// Apply this theme to egui's visuals
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.window_fill = self.bg_dark;
        visuals.panel_fill = self.bg_darkest;
        visuals.faint_bg_color = self.bg_card;
        visuals.extreme_bg_color = self.bg_dark;

        visuals.widgets.noninteractive.bg_fill = self.bg_card;
        visuals.widgets.noninteractive.weak_bg_fill = self.bg_light;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.inactive.bg_fill = self.bg_card;
        visuals.widgets.inactive.weak_bg_fill = self.bg_light;
        visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, self.border);
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_fill = self.bg_light;
        visuals.widgets.hovered.weak_bg_fill = self.bg_light;
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.accent.gamma_multiply(0.6);
        visuals.widgets.active.weak_bg_fill = self.accent.gamma_multiply(0.6);
        visuals.widgets.active.bg_stroke = Stroke::new(1.0, self.accent);
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.bg_darkest);

        visuals.selection.bg_fill = self.accent.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.hyperlink_color = self.accent;
        visuals.error_fg_color = self.error;

        visuals.window_stroke = Stroke::new(1.0, self.border);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        ctx.set_visuals(visuals);
    }
}
