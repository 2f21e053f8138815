//! Keypad layout
//!
//! Each key knows the event it sends, so the window dispatches presses
//! straight to the engine without looking at label text.

use crate::engine::{ButtonEvent, Operator};
use calccore::{Catalog, Palette, TextKey};
use egui::Color32;

/// Colour role of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Number,
    Operation,
    Special,
}

impl KeyKind {
    /// (fill, text) colours for this role.
    pub fn colors(self, palette: &Palette) -> (Color32, Color32) {
        match self {
            KeyKind::Number => (palette.numbers_bg, palette.numbers_fg),
            KeyKind::Operation => (palette.operations_bg, palette.operations_fg),
            KeyKind::Special => (palette.special_bg, palette.special_fg),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyLabel {
    Symbol(&'static str),
    Localized(TextKey),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    pub label: KeyLabel,
    pub event: ButtonEvent,
    pub kind: KeyKind,
}

impl Key {
    const fn digit(d: u8, label: &'static str) -> Self {
        Self { label: KeyLabel::Symbol(label), event: ButtonEvent::Digit(d), kind: KeyKind::Number }
    }

    const fn op(op: Operator, label: &'static str) -> Self {
        Self {
            label: KeyLabel::Symbol(label),
            event: ButtonEvent::Operator(op),
            kind: KeyKind::Operation,
        }
    }

    const fn localized(key: TextKey, event: ButtonEvent, kind: KeyKind) -> Self {
        Self { label: KeyLabel::Localized(key), event, kind }
    }

    pub fn label<'a>(&self, catalog: &'a Catalog) -> &'a str {
        match self.label {
            KeyLabel::Symbol(s) => s,
            KeyLabel::Localized(key) => catalog.text(key),
        }
    }
}

/// The 4×5 grid above the equals key.
pub static ROWS: [[Key; 4]; 5] = [
    [
        Key::localized(TextKey::BtnClear, ButtonEvent::Clear, KeyKind::Special),
        Key::localized(TextKey::BtnBackspace, ButtonEvent::Backspace, KeyKind::Special),
        Key::localized(TextKey::BtnPlusMinus, ButtonEvent::ToggleSign, KeyKind::Special),
        Key::localized(TextKey::BtnPercent, ButtonEvent::Percent, KeyKind::Special),
    ],
    [Key::digit(7, "7"), Key::digit(8, "8"), Key::digit(9, "9"), Key::op(Operator::Divide, "÷")],
    [Key::digit(4, "4"), Key::digit(5, "5"), Key::digit(6, "6"), Key::op(Operator::Multiply, "×")],
    [Key::digit(1, "1"), Key::digit(2, "2"), Key::digit(3, "3"), Key::op(Operator::Subtract, "−")],
    [
        Key::localized(TextKey::BtnPower, ButtonEvent::Power, KeyKind::Operation),
        Key::digit(0, "0"),
        Key::localized(TextKey::BtnDecimal, ButtonEvent::Decimal, KeyKind::Number),
        Key::op(Operator::Add, "+"),
    ],
];

/// Full-width key under the grid.
pub static EQUALS: Key = Key::localized(TextKey::BtnEquals, ButtonEvent::Equals, KeyKind::Operation);

/// Every key, grid first.
pub fn all_keys() -> impl Iterator<Item = &'static Key> {
    ROWS.iter().flatten().chain(std::iter::once(&EQUALS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use calccore::Language;

    #[test]
    fn test_every_digit_once() {
        for d in 0..=9u8 {
            let count = all_keys().filter(|k| k.event == ButtonEvent::Digit(d)).count();
            assert_eq!(count, 1, "digit {d}");
        }
    }

    #[test]
    fn test_every_event_reachable() {
        let events: Vec<ButtonEvent> = all_keys().map(|k| k.event).collect();
        for event in [
            ButtonEvent::Decimal,
            ButtonEvent::Operator(Operator::Add),
            ButtonEvent::Operator(Operator::Subtract),
            ButtonEvent::Operator(Operator::Multiply),
            ButtonEvent::Operator(Operator::Divide),
            ButtonEvent::Equals,
            ButtonEvent::Power,
            ButtonEvent::Percent,
            ButtonEvent::ToggleSign,
            ButtonEvent::Backspace,
            ButtonEvent::Clear,
        ] {
            assert!(events.contains(&event), "{event:?}");
        }
        assert_eq!(events.len(), 21);
    }

    #[test]
    fn test_operator_labels_match_symbols() {
        for key in all_keys() {
            if let ButtonEvent::Operator(op) = key.event {
                assert_eq!(key.label, KeyLabel::Symbol(op.symbol()));
                assert_eq!(key.kind, KeyKind::Operation);
            }
        }
    }

    #[test]
    fn test_labels_resolve() {
        let catalog = Catalog::builtin(Language::English).unwrap();
        let labels: Vec<&str> = ROWS[0].iter().map(|k| k.label(&catalog)).collect();
        assert_eq!(labels, ["C", "⌫", "±", "%"]);
        assert_eq!(EQUALS.label(&catalog), "=");
    }

    #[test]
    fn test_key_colors() {
        let p = Palette::DARK;
        assert_eq!(KeyKind::Number.colors(&p), (p.numbers_bg, p.numbers_fg));
        assert_eq!(KeyKind::Operation.colors(&p), (p.operations_bg, p.operations_fg));
        assert_eq!(KeyKind::Special.colors(&p), (p.special_bg, p.special_fg));
    }
}
