//! Calculator Plus application window

use crate::engine::{ButtonEvent, Engine, Render};
use crate::keypad::{self, Key};
use calccore::storage;
use calccore::{CalcTheme, Catalog, Language, Precision, Settings, TextKey, ThemeName};
use egui::{Context, RichText};
use std::path::PathBuf;

/// Height of the annotation line under the display
const ANNOTATION_HEIGHT: f32 = 20.0;
/// Smallest key height before the window stops shrinking them
const MIN_KEY_HEIGHT: f32 = 32.0;

pub struct CalcApp {
    engine: Engine,
    render: Render,
    settings: Settings,
    settings_path: PathBuf,
    catalog: Catalog,
    theme: CalcTheme,
    /// Edited copy of the settings while the settings window is open
    draft: Option<Settings>,
    /// Message of the last engine error, shown until dismissed
    error: Option<TextKey>,
}

impl CalcApp {
    pub fn new(settings: Settings, settings_path: PathBuf, catalog: Catalog) -> Self {
        let engine = Engine::new(settings.precision);
        let render = engine.render();
        Self {
            engine,
            render,
            settings,
            settings_path,
            catalog,
            theme: CalcTheme::new(settings.theme),
            draft: None,
            error: None,
        }
    }

    fn press(&mut self, event: ButtonEvent) {
        match self.engine.dispatch(event) {
            Ok(render) => self.render = render,
            Err(e) => {
                tracing::info!(error = %e, ?event, "calculation error");
                self.error = Some(e.message_key());
                self.render = self.engine.render();
            }
        }
    }

    /// Persist `settings` and re-apply everything that depends on them.
    fn apply_settings(&mut self, ctx: &Context, settings: Settings) {
        if let Err(e) = settings.save(&self.settings_path) {
            tracing::warn!(path = %self.settings_path.display(), error = %e, "failed to save settings");
        }

        if settings.language != self.catalog.language() {
            match Catalog::load(settings.language, &storage::locale_dir()) {
                Ok(catalog) => self.catalog = catalog,
                Err(e) => tracing::error!(error = %e, "keeping previous language"),
            }
        }
        self.theme = CalcTheme::new(settings.theme);
        self.theme.apply(ctx);
        self.engine.set_precision(settings.precision);
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(
            self.catalog.text(TextKey::Title).to_string(),
        ));

        tracing::info!(
            language = %settings.language,
            theme = %settings.theme,
            precision = %settings.precision,
            "settings applied"
        );
        self.settings = settings;
    }

    fn render_display(&self, ui: &mut egui::Ui) {
        let palette = &self.theme.palette;
        self.theme.display_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    RichText::new(&self.render.display)
                        .size(self.theme.font_size_display)
                        .color(palette.display_fg)
                        .strong(),
                );
            });
        });

        ui.allocate_ui(egui::vec2(ui.available_width(), ANNOTATION_HEIGHT), |ui| {
            ui.label(
                RichText::new(self.render.annotation_text(&self.catalog))
                    .size(self.theme.font_size_small)
                    .color(palette.label_fg),
            );
        });
    }

    fn key_button(&self, ui: &mut egui::Ui, key: &Key, width: f32, height: f32) -> bool {
        let (fill, text) = key.kind.colors(&self.theme.palette);
        let label = RichText::new(key.label(&self.catalog))
            .size(self.theme.font_size_key)
            .color(text);
        ui.add_sized([width, height], egui::Button::new(label).fill(fill))
            .clicked()
    }

    fn render_keypad(&self, ui: &mut egui::Ui) -> Option<ButtonEvent> {
        let spacing = ui.spacing().item_spacing;
        let rows = keypad::ROWS.len() as f32 + 1.0;
        let btn_w = (ui.available_width() - 3.0 * spacing.x) / 4.0;
        let btn_h = ((ui.available_height() - (rows - 1.0) * spacing.y) / rows).max(MIN_KEY_HEIGHT);

        let mut pressed = None;
        for row in keypad::ROWS.iter() {
            ui.horizontal(|ui| {
                for key in row {
                    if self.key_button(ui, key, btn_w, btn_h) {
                        pressed = Some(key.event);
                    }
                }
            });
        }
        if self.key_button(ui, &keypad::EQUALS, ui.available_width(), btn_h) {
            pressed = Some(keypad::EQUALS.event);
        }
        pressed
    }

    fn render_settings_window(&mut self, ctx: &Context) {
        let Some(mut draft) = self.draft.take() else {
            return;
        };
        let catalog = &self.catalog;
        let mut open = true;
        let mut save = false;

        egui::Window::new(catalog.text(TextKey::SettingsTitle))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(catalog.text(TextKey::LanguageLabel));
                    egui::ComboBox::from_id_source("language")
                        .selected_text(catalog.text(draft.language.name_key()))
                        .show_ui(ui, |ui| {
                            for language in Language::ALL {
                                ui.selectable_value(
                                    &mut draft.language,
                                    language,
                                    catalog.text(language.name_key()),
                                );
                            }
                        });
                    ui.add_space(6.0);

                    ui.label(catalog.text(TextKey::ThemeLabel));
                    egui::ComboBox::from_id_source("theme")
                        .selected_text(catalog.text(draft.theme.name_key()))
                        .show_ui(ui, |ui| {
                            for theme in ThemeName::ALL {
                                ui.selectable_value(&mut draft.theme, theme, catalog.text(theme.name_key()));
                            }
                        });
                    ui.add_space(6.0);

                    ui.label(catalog.text(TextKey::PrecisionLabel));
                    egui::ComboBox::from_id_source("precision")
                        .selected_text(draft.precision.to_string())
                        .show_ui(ui, |ui| {
                            for precision in Precision::CHOICES {
                                ui.selectable_value(&mut draft.precision, precision, precision.to_string());
                            }
                        });
                    ui.add_space(12.0);

                    if ui.button(catalog.text(TextKey::SaveBtn)).clicked() {
                        save = true;
                    }
                });
            });

        if save {
            self.apply_settings(ctx, draft);
        } else if open {
            self.draft = Some(draft);
        }
    }

    fn render_error_window(&mut self, ctx: &Context) {
        let Some(key) = self.error else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new(self.catalog.text(TextKey::ErrorTitle))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(self.catalog.text(key));
                    ui.add_space(8.0);
                    if ui.button(self.catalog.text(TextKey::OkBtn)).clicked() {
                        dismissed = true;
                    }
                });
            });
        if dismissed {
            self.error = None;
        }
    }
}

impl eframe::App for CalcApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let modal_open = self.error.is_some() || self.draft.is_some();
        let mut pressed = None;
        let mut open_settings = false;

        egui::CentralPanel::default()
            .frame(
                egui::Frame::none()
                    .fill(self.theme.palette.bg)
                    .inner_margin(egui::Margin::same(self.theme.window_padding)),
            )
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| {
                    ui.horizontal(|ui| {
                        let (fill, text) = keypad::KeyKind::Special.colors(&self.theme.palette);
                        let gear = egui::Button::new(RichText::new("⚙").color(text)).fill(fill);
                        if ui.add(gear).clicked() {
                            open_settings = true;
                        }
                    });
                    ui.add_space(4.0);
                    self.render_display(ui);
                    ui.add_space(8.0);
                    pressed = self.render_keypad(ui);
                });
            });

        if let Some(event) = pressed {
            self.press(event);
        }
        if open_settings {
            self.draft = Some(self.settings);
        }

        self.render_settings_window(ctx);
        self.render_error_window(ctx);
    }
}
