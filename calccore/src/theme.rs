//! Calculator colour themes
//!
//! Three flat palettes: dark, light and blue. Square corners, no shadows,
//! keys coloured by role (numbers, operations, special keys).

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Style, TextStyle, Visuals};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
    Blue,
}

impl ThemeName {
    pub const ALL: [ThemeName; 3] = [ThemeName::Dark, ThemeName::Light, ThemeName::Blue];

    pub fn name_key(self) -> crate::TextKey {
        match self {
            ThemeName::Dark => crate::TextKey::ThemeDark,
            ThemeName::Light => crate::TextKey::ThemeLight,
            ThemeName::Blue => crate::TextKey::ThemeBlue,
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeName::Dark => Palette::DARK,
            ThemeName::Light => Palette::LIGHT,
            ThemeName::Blue => Palette::BLUE,
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeName::Dark => write!(f, "dark"),
            ThemeName::Light => write!(f, "light"),
            ThemeName::Blue => write!(f, "blue"),
        }
    }
}

/// Colour roles used by the calculator window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color32,
    pub display_bg: Color32,
    pub display_fg: Color32,
    /// Annotation line under the display
    pub label_fg: Color32,
    pub numbers_bg: Color32,
    pub numbers_fg: Color32,
    pub operations_bg: Color32,
    pub operations_fg: Color32,
    pub special_bg: Color32,
    pub special_fg: Color32,
}

impl Palette {
    pub const DARK: Palette = Palette {
        bg: Color32::from_rgb(0x2C, 0x2C, 0x2C),
        display_bg: Color32::from_rgb(0x1A, 0x1A, 0x1A),
        display_fg: Color32::WHITE,
        label_fg: Color32::from_rgb(0x88, 0x88, 0x88),
        numbers_bg: Color32::from_rgb(0x40, 0x40, 0x40),
        numbers_fg: Color32::WHITE,
        operations_bg: Color32::from_rgb(0xFF, 0x95, 0x00),
        operations_fg: Color32::WHITE,
        special_bg: Color32::from_rgb(0xA6, 0xA6, 0xA6),
        special_fg: Color32::BLACK,
    };

    pub const LIGHT: Palette = Palette {
        bg: Color32::from_rgb(0xF0, 0xF0, 0xF0),
        display_bg: Color32::WHITE,
        display_fg: Color32::BLACK,
        label_fg: Color32::from_rgb(0x66, 0x66, 0x66),
        numbers_bg: Color32::from_rgb(0xE0, 0xE0, 0xE0),
        numbers_fg: Color32::BLACK,
        operations_bg: Color32::from_rgb(0xFF, 0x95, 0x00),
        operations_fg: Color32::WHITE,
        special_bg: Color32::from_rgb(0xC0, 0xC0, 0xC0),
        special_fg: Color32::BLACK,
    };

    pub const BLUE: Palette = Palette {
        bg: Color32::from_rgb(0x1E, 0x3A, 0x5F),
        display_bg: Color32::from_rgb(0x0A, 0x1F, 0x3A),
        display_fg: Color32::WHITE,
        label_fg: Color32::from_rgb(0x88, 0xAA, 0xFF),
        numbers_bg: Color32::from_rgb(0x2A, 0x4A, 0x7F),
        numbers_fg: Color32::WHITE,
        operations_bg: Color32::from_rgb(0xFF, 0x6B, 0x35),
        operations_fg: Color32::WHITE,
        special_bg: Color32::from_rgb(0x4A, 0x76, 0xB4),
        special_fg: Color32::WHITE,
    };

    /// Whether egui's dark base visuals suit this palette.
    pub fn is_dark(&self) -> bool {
        let [r, g, b, _] = self.bg.to_array();
        (r as u32 + g as u32 + b as u32) < 3 * 128
    }
}

/// Theme configuration for the calculator window
pub struct CalcTheme {
    pub palette: Palette,
    pub font_size_body: f32,
    pub font_size_heading: f32,
    pub font_size_small: f32,
    pub font_size_key: f32,
    pub font_size_display: f32,
    pub window_padding: f32,
    pub item_spacing: f32,
}

impl Default for CalcTheme {
    fn default() -> Self {
        Self::new(ThemeName::default())
    }
}

impl CalcTheme {
    pub fn new(name: ThemeName) -> Self {
        Self {
            palette: name.palette(),
            font_size_body: 14.0,
            font_size_heading: 20.0,
            font_size_small: 12.0,
            font_size_key: 18.0,
            font_size_display: 28.0,
            window_padding: 10.0,
            item_spacing: 4.0,
        }
    }

    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let p = &self.palette;
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size_small, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size_body, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size_key, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size_heading, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size_body, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = if p.is_dark() { Visuals::dark() } else { Visuals::light() };

        visuals.window_fill = p.bg;
        visuals.panel_fill = p.bg;
        visuals.extreme_bg_color = p.display_bg;
        visuals.override_text_color = Some(p.display_fg);

        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, p.label_fg);

        let flat = |ws: &mut egui::style::WidgetVisuals| {
            ws.bg_fill = p.special_bg;
            ws.weak_bg_fill = p.special_bg;
            ws.bg_stroke = Stroke::NONE;
            ws.rounding = Rounding::ZERO;
        };
        flat(&mut visuals.widgets.inactive);
        flat(&mut visuals.widgets.hovered);
        flat(&mut visuals.widgets.active);
        flat(&mut visuals.widgets.open);
        visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, p.display_fg);

        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;

        style.visuals = visuals;

        style.spacing.window_margin = egui::Margin::same(self.window_padding);
        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }

    /// Display frame: display background, no outline
    pub fn display_frame(&self) -> egui::Frame {
        egui::Frame::none()
            .fill(self.palette.display_bg)
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
    }
}
