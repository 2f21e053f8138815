//! Localization catalog
//!
//! Every user-visible string has a [`TextKey`]. A [`Catalog`] maps each key
//! to text for one [`Language`] and is checked for completeness when it is
//! built, so lookups afterwards cannot miss.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Russian,
    English,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Russian, Language::English];

    /// Key of this language's own name, shown in the language picker.
    pub fn name_key(self) -> TextKey {
        match self {
            Language::Russian => TextKey::LangRussian,
            Language::English => TextKey::LangEnglish,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Russian => write!(f, "russian"),
            Language::English => write!(f, "english"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextKey {
    Title,
    PowerPrompt,
    SettingsTitle,
    LanguageLabel,
    ThemeLabel,
    PrecisionLabel,
    SaveBtn,
    OkBtn,
    ErrorTitle,
    ErrorDivision,
    ErrorInput,
    BtnClear,
    BtnBackspace,
    BtnPlusMinus,
    BtnPercent,
    BtnPower,
    BtnEquals,
    BtnDecimal,
    ThemeDark,
    ThemeLight,
    ThemeBlue,
    LangEnglish,
    LangRussian,
}

impl TextKey {
    /// Every key, in declaration order.
    pub const ALL: [TextKey; 23] = [
        TextKey::Title,
        TextKey::PowerPrompt,
        TextKey::SettingsTitle,
        TextKey::LanguageLabel,
        TextKey::ThemeLabel,
        TextKey::PrecisionLabel,
        TextKey::SaveBtn,
        TextKey::OkBtn,
        TextKey::ErrorTitle,
        TextKey::ErrorDivision,
        TextKey::ErrorInput,
        TextKey::BtnClear,
        TextKey::BtnBackspace,
        TextKey::BtnPlusMinus,
        TextKey::BtnPercent,
        TextKey::BtnPower,
        TextKey::BtnEquals,
        TextKey::BtnDecimal,
        TextKey::ThemeDark,
        TextKey::ThemeLight,
        TextKey::ThemeBlue,
        TextKey::LangEnglish,
        TextKey::LangRussian,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TextKey::Title => "title",
            TextKey::PowerPrompt => "power_prompt",
            TextKey::SettingsTitle => "settings_title",
            TextKey::LanguageLabel => "language_label",
            TextKey::ThemeLabel => "theme_label",
            TextKey::PrecisionLabel => "precision_label",
            TextKey::SaveBtn => "save_btn",
            TextKey::OkBtn => "ok_btn",
            TextKey::ErrorTitle => "error_title",
            TextKey::ErrorDivision => "error_division",
            TextKey::ErrorInput => "error_input",
            TextKey::BtnClear => "btn_clear",
            TextKey::BtnBackspace => "btn_backspace",
            TextKey::BtnPlusMinus => "btn_plus_minus",
            TextKey::BtnPercent => "btn_percent",
            TextKey::BtnPower => "btn_power",
            TextKey::BtnEquals => "btn_equals",
            TextKey::BtnDecimal => "btn_decimal",
            TextKey::ThemeDark => "theme_dark",
            TextKey::ThemeLight => "theme_light",
            TextKey::ThemeBlue => "theme_blue",
            TextKey::LangEnglish => "lang_english",
            TextKey::LangRussian => "lang_russian",
        }
    }
}

impl fmt::Display for TextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum LocaleError {
    #[error("{language} translation is missing key `{key}`")]
    MissingKey { language: Language, key: TextKey },
    #[error("invalid translation table: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read translation table {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

const ENGLISH: &[(TextKey, &str)] = &[
    (TextKey::Title, "Calculator Plus"),
    (TextKey::PowerPrompt, "ⁿ (enter power)"),
    (TextKey::SettingsTitle, "Settings"),
    (TextKey::LanguageLabel, "Language:"),
    (TextKey::ThemeLabel, "Theme:"),
    (TextKey::PrecisionLabel, "Digits after point:"),
    (TextKey::SaveBtn, "Save"),
    (TextKey::OkBtn, "OK"),
    (TextKey::ErrorTitle, "Error"),
    (TextKey::ErrorDivision, "Division by zero!"),
    (TextKey::ErrorInput, "Invalid input!"),
    (TextKey::BtnClear, "C"),
    (TextKey::BtnBackspace, "⌫"),
    (TextKey::BtnPlusMinus, "±"),
    (TextKey::BtnPercent, "%"),
    (TextKey::BtnPower, "xⁿ"),
    (TextKey::BtnEquals, "="),
    (TextKey::BtnDecimal, "."),
    (TextKey::ThemeDark, "Dark"),
    (TextKey::ThemeLight, "Light"),
    (TextKey::ThemeBlue, "Blue"),
    (TextKey::LangEnglish, "English"),
    (TextKey::LangRussian, "Русский"),
];

const RUSSIAN: &[(TextKey, &str)] = &[
    (TextKey::Title, "Калькулятор Плюс"),
    (TextKey::PowerPrompt, "ⁿ (введите степень)"),
    (TextKey::SettingsTitle, "Настройки"),
    (TextKey::LanguageLabel, "Язык:"),
    (TextKey::ThemeLabel, "Тема:"),
    (TextKey::PrecisionLabel, "Цифры после точки:"),
    (TextKey::SaveBtn, "Сохранить"),
    (TextKey::OkBtn, "ОК"),
    (TextKey::ErrorTitle, "Ошибка"),
    (TextKey::ErrorDivision, "Деление на ноль!"),
    (TextKey::ErrorInput, "Некорректный ввод!"),
    (TextKey::BtnClear, "C"),
    (TextKey::BtnBackspace, "⌫"),
    (TextKey::BtnPlusMinus, "±"),
    (TextKey::BtnPercent, "%"),
    (TextKey::BtnPower, "xⁿ"),
    (TextKey::BtnEquals, "="),
    (TextKey::BtnDecimal, "."),
    (TextKey::ThemeDark, "Тёмная"),
    (TextKey::ThemeLight, "Светлая"),
    (TextKey::ThemeBlue, "Синяя"),
    (TextKey::LangEnglish, "English"),
    (TextKey::LangRussian, "Русский"),
];

/// Validated string table for one language.
#[derive(Debug, Clone)]
pub struct Catalog {
    language: Language,
    /// Indexed by `TextKey as usize`; complete after construction.
    texts: Vec<String>,
}

impl Catalog {
    /// The table shipped with the calculator.
    pub fn builtin(language: Language) -> Result<Self, LocaleError> {
        let table = match language {
            Language::Russian => RUSSIAN,
            Language::English => ENGLISH,
        };
        let entries = table.iter().map(|(k, v)| (*k, (*v).to_string())).collect();
        Self::from_entries(language, entries)
    }

    /// Load the table for `language`, preferring `<dir>/<language>.json`
    /// over the built-in one. An override that exists but is incomplete is
    /// an error, never a silent fallback.
    pub fn load(language: Language, dir: &Path) -> Result<Self, LocaleError> {
        let path = dir.join(format!("{language}.json"));
        match std::fs::read_to_string(&path) {
            Ok(json) => {
                tracing::info!(path = %path.display(), "using translation override");
                Self::from_json(language, &json)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::builtin(language),
            Err(source) => Err(LocaleError::Io { path, source }),
        }
    }

    /// Like [`Catalog::load`], but a broken override is logged and the
    /// built-in table is used instead.
    pub fn load_or_builtin(language: Language, dir: &Path) -> Result<Self, LocaleError> {
        Self::load(language, dir).or_else(|e| {
            tracing::warn!(error = %e, "ignoring translation override, using built-in text");
            Self::builtin(language)
        })
    }

    /// Parse a translation table from JSON (`{"title": "...", ...}`).
    pub fn from_json(language: Language, json: &str) -> Result<Self, LocaleError> {
        let entries: HashMap<TextKey, String> = serde_json::from_str(json)?;
        Self::from_entries(language, entries)
    }

    fn from_entries(
        language: Language,
        mut entries: HashMap<TextKey, String>,
    ) -> Result<Self, LocaleError> {
        let mut texts = Vec::with_capacity(TextKey::ALL.len());
        for key in TextKey::ALL {
            match entries.remove(&key) {
                Some(text) => texts.push(text),
                None => return Err(LocaleError::MissingKey { language, key }),
            }
        }
        Ok(Self { language, texts })
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn text(&self, key: TextKey) -> &str {
        &self.texts[key as usize]
    }
}
