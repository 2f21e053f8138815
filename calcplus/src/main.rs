//! Calculator Plus - a desktop calculator
//!
//! Keypad calculator with left-to-right evaluation, integer powers,
//! three colour themes, Russian and English text and saved settings.

use calccore::{storage, CalcTheme, Catalog, Settings, TextKey};
use calcplus::CalcApp;
use eframe::NativeOptions;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings_path = Settings::default_path();
    let settings = Settings::load(&settings_path);
    tracing::info!(
        path = %settings_path.display(),
        language = %settings.language,
        theme = %settings.theme,
        precision = %settings.precision,
        "settings loaded"
    );

    let catalog = Catalog::load_or_builtin(settings.language, &storage::locale_dir())?;

    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([400.0, 600.0])
            .with_min_inner_size([360.0, 520.0])
            .with_title(catalog.text(TextKey::Title)),
        ..Default::default()
    };

    eframe::run_native(
        "calcplus",
        options,
        Box::new(move |cc| {
            CalcTheme::new(settings.theme).apply(&cc.egui_ctx);
            Box::new(CalcApp::new(settings, settings_path, catalog))
        }),
    )?;
    Ok(())
}
