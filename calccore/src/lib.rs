//! calccore — shared library for Calculator Plus
//!
//! Everything the calculator window needs that is not arithmetic:
//! colour themes, the localization catalog and persisted settings.

pub mod i18n;
pub mod settings;
pub mod storage;
pub mod theme;

pub use i18n::{Catalog, Language, TextKey};
pub use settings::{Precision, Settings};
pub use theme::{CalcTheme, Palette, ThemeName};
