//! Arithmetic engine
//!
//! Turns button presses into a running calculation. Binary operations are
//! evaluated strictly left to right with no precedence; `xⁿ` raises the
//! current value to a non-negative integer power typed digit by digit.
//!
//! The engine owns all calculator state. Every operation returns the new
//! [`Render`] or, on failure, a [`CalcError`] after the state has been
//! reset to what a fresh calculator shows.

use calccore::{Catalog, Precision, TextKey};
use std::fmt;
use thiserror::Error;

/// Number of `× b` factors spelled out in the power expansion.
const MAX_EXPANSION_FACTORS: u32 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide if rhs == 0.0 => Err(CalcError::DivisionByZero),
            Operator::Divide => Ok(lhs / rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One logical key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEvent {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Power,
    Percent,
    ToggleSign,
    Backspace,
    Clear,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    #[error("division by zero")]
    DivisionByZero,
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl CalcError {
    /// Catalog key of the message shown to the user.
    pub fn message_key(&self) -> TextKey {
        match self {
            CalcError::DivisionByZero => TextKey::ErrorDivision,
            CalcError::InvalidInput(_) => TextKey::ErrorInput,
        }
    }
}

/// What the calculator is doing besides typing the current entry.
///
/// Holding a pending operation and building an exponent are mutually
/// exclusive.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Entry,
    Pending { operand: String, operator: Operator },
    /// `base_text` is the base as it was typed, kept for the annotation.
    Power { base: f64, base_text: String, exponent: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    /// Operand being typed; empty shows as "0". At most one `.`.
    pub current_entry: String,
    pub mode: Mode,
    /// Next digit starts a new number instead of appending.
    pub awaiting_fresh_entry: bool,
    pub precision: Precision,
}

impl CalculatorState {
    pub fn new(precision: Precision) -> Self {
        Self {
            current_entry: String::new(),
            mode: Mode::Entry,
            awaiting_fresh_entry: true,
            precision,
        }
    }

    pub fn pending_operand(&self) -> Option<&str> {
        match &self.mode {
            Mode::Pending { operand, .. } => Some(operand),
            _ => None,
        }
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        match &self.mode {
            Mode::Pending { operator, .. } => Some(*operator),
            _ => None,
        }
    }

    pub fn power_mode(&self) -> bool {
        matches!(self.mode, Mode::Power { .. })
    }

    pub fn power_base(&self) -> Option<f64> {
        match &self.mode {
            Mode::Power { base, .. } => Some(*base),
            _ => None,
        }
    }

    pub fn power_exponent_entry(&self) -> &str {
        match &self.mode {
            Mode::Power { exponent, .. } => exponent,
            _ => "",
        }
    }
}

/// Text shown above the keypad next to the display.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Annotation {
    #[default]
    None,
    /// `7 +`
    Pending { operand: String, operator: Operator },
    /// `5ⁿ (enter power)`
    PowerPrompt { base: String },
    /// `5ⁿ = 5 × 5 × 5`, followed by `= 125` once resolved.
    PowerExpansion { base: String, exponent: u32, result: Option<String> },
}

impl Annotation {
    pub fn to_text(&self, catalog: &Catalog) -> String {
        match self {
            Annotation::None => String::new(),
            Annotation::Pending { operand, operator } => format!("{operand} {operator}"),
            Annotation::PowerPrompt { base } => {
                format!("{base}{}", catalog.text(TextKey::PowerPrompt))
            }
            Annotation::PowerExpansion { base, exponent, result } => {
                let mut text = format!("{base}ⁿ = {}", expand_power(base, *exponent));
                if let Some(result) = result {
                    if *exponent >= 2 {
                        text.push_str(" = ");
                        text.push_str(result);
                    }
                }
                text
            }
        }
    }
}

fn expand_power(base: &str, exponent: u32) -> String {
    if exponent == 0 {
        return "1".to_string();
    }
    let shown = exponent.min(MAX_EXPANSION_FACTORS) as usize;
    let mut text = vec![base; shown].join(" × ");
    if exponent > MAX_EXPANSION_FACTORS {
        text.push_str(" × …");
    }
    text
}

/// Render payload for the shell.
#[derive(Debug, Clone, PartialEq)]
pub struct Render {
    pub display: String,
    pub annotation: Annotation,
}

impl Render {
    pub fn annotation_text(&self, catalog: &Catalog) -> String {
        self.annotation.to_text(catalog)
    }
}

pub struct Engine {
    state: CalculatorState,
    annotation: Annotation,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Precision::default())
    }
}

impl Engine {
    pub fn new(precision: Precision) -> Self {
        Self {
            state: CalculatorState::new(precision),
            annotation: Annotation::None,
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn set_precision(&mut self, precision: Precision) {
        self.state.precision = precision;
    }

    /// Current render payload without changing anything.
    pub fn render(&self) -> Render {
        Render {
            display: self.display(),
            annotation: self.annotation.clone(),
        }
    }

    /// The value on the display. While an operator waits for its right
    /// operand the left operand stays visible.
    pub fn display(&self) -> String {
        if !self.state.current_entry.is_empty() {
            return self.state.current_entry.clone();
        }
        match self.state.pending_operand() {
            Some(operand) => operand.to_string(),
            None => "0".to_string(),
        }
    }

    pub fn dispatch(&mut self, event: ButtonEvent) -> Result<Render, CalcError> {
        match event {
            ButtonEvent::Digit(d) => self.digit(d),
            ButtonEvent::Decimal => self.decimal_point(),
            ButtonEvent::Operator(op) => self.operator(op),
            ButtonEvent::Equals => self.equals(),
            ButtonEvent::Power => self.power(),
            ButtonEvent::Percent => self.percent(),
            ButtonEvent::ToggleSign => self.toggle_sign(),
            ButtonEvent::Backspace => self.backspace(),
            ButtonEvent::Clear => Ok(self.clear()),
        }
    }

    pub fn digit(&mut self, d: u8) -> Result<Render, CalcError> {
        self.run(|engine| {
            let c = char::from_digit(d as u32, 10)
                .ok_or_else(|| CalcError::InvalidInput(format!("digit {d}")))?;

            if let Mode::Power { exponent, .. } = &mut engine.state.mode {
                exponent.push(c);
                engine.refresh_power_annotation();
                return Ok(());
            }

            let state = &mut engine.state;
            if state.awaiting_fresh_entry {
                state.current_entry.clear();
                state.awaiting_fresh_entry = false;
            }
            if state.current_entry == "0" {
                state.current_entry = c.to_string();
            } else if state.current_entry == "-0" {
                state.current_entry = format!("-{c}");
            } else {
                state.current_entry.push(c);
            }
            Ok(())
        })
    }

    pub fn decimal_point(&mut self) -> Result<Render, CalcError> {
        self.run(|engine| {
            let state = &mut engine.state;
            if state.power_mode() {
                return Ok(());
            }
            if state.awaiting_fresh_entry {
                state.current_entry.clear();
                state.awaiting_fresh_entry = false;
            }
            if state.current_entry.contains('.') {
                return Ok(());
            }
            if state.current_entry.is_empty() {
                state.current_entry.push_str("0.");
            } else {
                state.current_entry.push('.');
            }
            Ok(())
        })
    }

    pub fn operator(&mut self, op: Operator) -> Result<Render, CalcError> {
        self.run(|engine| {
            if engine.state.power_mode() {
                if engine.state.power_exponent_entry().is_empty() {
                    return Ok(());
                }
                engine.resolve_power()?;
            }

            if !engine.state.current_entry.is_empty() {
                if engine.state.pending_operator().is_some() {
                    engine.resolve_pending()?;
                }
                let operand = std::mem::take(&mut engine.state.current_entry);
                engine.annotation = Annotation::Pending { operand: operand.clone(), operator: op };
                engine.state.mode = Mode::Pending { operand, operator: op };
                engine.state.awaiting_fresh_entry = true;
            } else if let Mode::Pending { operand, operator } = &mut engine.state.mode {
                *operator = op;
                engine.annotation = Annotation::Pending { operand: operand.clone(), operator: op };
            }
            Ok(())
        })
    }

    pub fn equals(&mut self) -> Result<Render, CalcError> {
        self.run(|engine| {
            if !engine.state.power_exponent_entry().is_empty() {
                return engine.resolve_power();
            }
            let Some(operand) = engine.state.pending_operand().map(str::to_string) else {
                return Ok(());
            };
            if engine.state.current_entry.is_empty() {
                // `7 + =` repeats the left operand: 7 + 7.
                engine.state.current_entry = operand;
            }
            engine.resolve_pending()?;
            engine.annotation = Annotation::None;
            Ok(())
        })
    }

    /// The `xⁿ` key: enter power mode, or resolve the exponent typed so far.
    pub fn power(&mut self) -> Result<Render, CalcError> {
        self.run(|engine| {
            if engine.state.power_mode() {
                if engine.state.power_exponent_entry().is_empty() {
                    return Ok(());
                }
                return engine.resolve_power();
            }

            let base_text = if !engine.state.current_entry.is_empty() {
                if engine.state.pending_operator().is_some() {
                    engine.resolve_pending()?;
                }
                std::mem::take(&mut engine.state.current_entry)
            } else if let Some(operand) = engine.state.pending_operand() {
                // Nothing typed after the operator: drop it, power the operand.
                operand.to_string()
            } else {
                return Ok(());
            };

            let base = parse_number(&base_text)?;
            engine.annotation = Annotation::PowerPrompt { base: base_text.clone() };
            engine.state.mode = Mode::Power { base, base_text, exponent: String::new() };
            engine.state.awaiting_fresh_entry = true;
            Ok(())
        })
    }

    pub fn percent(&mut self) -> Result<Render, CalcError> {
        self.run(|engine| {
            let state = &mut engine.state;
            if state.current_entry.is_empty() {
                return Ok(());
            }
            let value = parse_number(&state.current_entry)? / 100.0;
            state.current_entry = format_number(value, state.precision)?;
            Ok(())
        })
    }

    pub fn toggle_sign(&mut self) -> Result<Render, CalcError> {
        self.run(|engine| {
            let entry = &mut engine.state.current_entry;
            if entry.is_empty() || entry.as_str() == "0" {
                return Ok(());
            }
            *entry = match entry.strip_prefix('-') {
                Some(positive) => positive.to_string(),
                None => format!("-{entry}"),
            };
            Ok(())
        })
    }

    pub fn backspace(&mut self) -> Result<Render, CalcError> {
        self.run(|engine| {
            if let Mode::Power { exponent, .. } = &mut engine.state.mode {
                exponent.pop();
                engine.refresh_power_annotation();
                return Ok(());
            }
            let entry = &mut engine.state.current_entry;
            entry.pop();
            if entry.as_str() == "-" {
                entry.clear();
            }
            Ok(())
        })
    }

    /// Back to the startup state. Precision is configuration and survives.
    pub fn clear(&mut self) -> Render {
        self.reset();
        self.render()
    }

    fn reset(&mut self) {
        self.state = CalculatorState::new(self.state.precision);
        self.annotation = Annotation::None;
    }

    fn run(
        &mut self,
        op: impl FnOnce(&mut Self) -> Result<(), CalcError>,
    ) -> Result<Render, CalcError> {
        match op(self) {
            Ok(()) => Ok(self.render()),
            Err(e) => {
                tracing::debug!(error = %e, "calculation failed, resetting");
                self.reset();
                Err(e)
            }
        }
    }

    /// `operand op current_entry` into `current_entry`.
    fn resolve_pending(&mut self) -> Result<(), CalcError> {
        let Mode::Pending { operand, operator } = &self.state.mode else {
            return Ok(());
        };
        let lhs = parse_number(operand)?;
        let rhs = parse_number(&self.state.current_entry)?;
        let result = operator.apply(lhs, rhs)?;
        self.state.current_entry = format_number(result, self.state.precision)?;
        self.state.mode = Mode::Entry;
        self.state.awaiting_fresh_entry = true;
        Ok(())
    }

    fn resolve_power(&mut self) -> Result<(), CalcError> {
        let Mode::Power { base, base_text, exponent } = &self.state.mode else {
            return Ok(());
        };
        let (base, base_text) = (*base, base_text.clone());
        let exponent: u32 = exponent
            .parse()
            .map_err(|_| CalcError::InvalidInput(format!("exponent {exponent}")))?;
        let power = i32::try_from(exponent)
            .map_err(|_| CalcError::InvalidInput(format!("exponent {exponent}")))?;

        let result = format_number(base.powi(power), self.state.precision)?;
        self.annotation = Annotation::PowerExpansion {
            base: base_text,
            exponent,
            result: Some(result.clone()),
        };
        self.state.current_entry = result;
        self.state.mode = Mode::Entry;
        self.state.awaiting_fresh_entry = true;
        Ok(())
    }

    fn refresh_power_annotation(&mut self) {
        let Mode::Power { base_text, exponent, .. } = &self.state.mode else {
            return;
        };
        self.annotation = if exponent.is_empty() {
            Annotation::PowerPrompt { base: base_text.clone() }
        } else {
            Annotation::PowerExpansion {
                base: base_text.clone(),
                exponent: exponent.parse().unwrap_or(u32::MAX),
                result: None,
            }
        };
    }
}

/// Parse entry text. Only digits, one leading `-` and `.` are accepted.
pub fn parse_number(text: &str) -> Result<f64, CalcError> {
    let digits = text.strip_prefix('-').unwrap_or(text);
    let well_formed = !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
        && digits.chars().filter(|&c| c == '.').count() <= 1
        && digits != ".";
    if !well_formed {
        return Err(CalcError::InvalidInput(text.to_string()));
    }
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CalcError::InvalidInput(text.to_string())),
    }
}

/// Largest magnitude at which every integer is exactly representable.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Round to `precision` fractional digits.
///
/// Values whose scaled form no longer fits the mantissa already carry fewer
/// fractional digits than requested and come back unchanged.
fn round_to(value: f64, precision: Precision) -> f64 {
    let scale = 10f64.powi(precision.digits() as i32);
    let scaled = value * scale;
    if !scaled.is_finite() || scaled.abs() >= EXACT_INTEGER_LIMIT {
        return value;
    }
    scaled.round() / scale
}

/// Round to `precision` fractional digits, print the shortest decimal that
/// reads back as the rounded value, then drop trailing zeros and a trailing
/// point.
pub fn format_number(value: f64, precision: Precision) -> Result<String, CalcError> {
    if !value.is_finite() {
        return Err(CalcError::InvalidInput("result out of range".to_string()));
    }
    // `Display` for f64 never switches to exponent notation.
    let mut text = round_to(value, precision).to_string();
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        return Ok("0".to_string());
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use calccore::Language;
    use proptest::prelude::*;

    fn press(engine: &mut Engine, keys: &str) -> Result<Render, CalcError> {
        let mut last = Ok(engine.render());
        for key in keys.split_whitespace() {
            let event = match key {
                "+" => ButtonEvent::Operator(Operator::Add),
                "-" => ButtonEvent::Operator(Operator::Subtract),
                "*" => ButtonEvent::Operator(Operator::Multiply),
                "/" => ButtonEvent::Operator(Operator::Divide),
                "=" => ButtonEvent::Equals,
                "^" => ButtonEvent::Power,
                "%" => ButtonEvent::Percent,
                "±" => ButtonEvent::ToggleSign,
                "<" => ButtonEvent::Backspace,
                "C" => ButtonEvent::Clear,
                "." => ButtonEvent::Decimal,
                number => {
                    for c in number.chars() {
                        let event = match c {
                            '.' => ButtonEvent::Decimal,
                            d => ButtonEvent::Digit(d.to_digit(10).unwrap() as u8),
                        };
                        last = engine.dispatch(event);
                    }
                    continue;
                }
            };
            last = engine.dispatch(event);
        }
        last
    }

    fn display_after(keys: &str) -> String {
        let mut engine = Engine::default();
        press(&mut engine, keys).unwrap().display
    }

    fn english() -> Catalog {
        Catalog::builtin(Language::English).unwrap()
    }

    #[test]
    fn test_fresh_engine_shows_zero() {
        let engine = Engine::default();
        let render = engine.render();
        assert_eq!(render.display, "0");
        assert_eq!(render.annotation, Annotation::None);
    }

    #[test]
    fn test_addition() {
        assert_eq!(display_after("3 + 4 ="), "7");
    }

    #[test]
    fn test_trailing_zeros_stripped() {
        assert_eq!(display_after("2.5 * 4 ="), "10");
    }

    #[test]
    fn test_percent() {
        assert_eq!(display_after("50 %"), "0.5");
    }

    #[test]
    fn test_chained_left_to_right() {
        let mut engine = Engine::default();
        let render = press(&mut engine, "2 + 3 +").unwrap();
        assert_eq!(render.display, "5");
        assert_eq!(render.annotation_text(&english()), "5 +");
        assert_eq!(press(&mut engine, "4 =").unwrap().display, "9");

        assert_eq!(display_after("2 + 3 * 4 ="), "20");
    }

    #[test]
    fn test_change_operator_without_operand() {
        let mut engine = Engine::default();
        press(&mut engine, "7 + -").unwrap();
        assert_eq!(engine.state().pending_operand(), Some("7"));
        assert_eq!(engine.state().pending_operator(), Some(Operator::Subtract));
        assert_eq!(engine.render().annotation_text(&english()), "7 −");
        assert_eq!(press(&mut engine, "2 =").unwrap().display, "5");
    }

    #[test]
    fn test_operator_with_nothing_entered_is_noop() {
        let mut engine = Engine::default();
        let render = press(&mut engine, "+").unwrap();
        assert_eq!(render.display, "0");
        assert_eq!(engine.state().mode, Mode::Entry);
    }

    #[test]
    fn test_division_by_zero_resets() {
        let mut engine = Engine::default();
        let err = press(&mut engine, "10 / 0 =").unwrap_err();
        assert_eq!(err, CalcError::DivisionByZero);
        assert_eq!(err.message_key(), TextKey::ErrorDivision);
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.state(), &CalculatorState::new(Precision::default()));
    }

    #[test]
    fn test_division_by_zero_in_chain() {
        let mut engine = Engine::default();
        assert_eq!(press(&mut engine, "8 / 0 +"), Err(CalcError::DivisionByZero));
        assert_eq!(engine.display(), "0");
        assert_eq!(engine.state().pending_operator(), None);
    }

    #[test]
    fn test_precision_two() {
        let mut engine = Engine::new(Precision::try_from(2).unwrap());
        assert_eq!(press(&mut engine, "1 / 3 =").unwrap().display, "0.33");
        engine.set_precision(Precision::try_from(5).unwrap());
        assert_eq!(press(&mut engine, "C 2 / 3 =").unwrap().display, "0.66667");
    }

    #[test]
    fn test_default_precision() {
        assert_eq!(display_after("1 / 3 ="), "0.3333333333");
        assert_eq!(display_after("0.1 + 0.2 ="), "0.3");
    }

    #[test]
    fn test_large_results_have_no_float_noise() {
        assert_eq!(display_after("12345678.9 + 0 ="), "12345678.9");
        let mut engine = Engine::new(Precision::try_from(15).unwrap());
        assert_eq!(press(&mut engine, "1000.1 + 1 =").unwrap().display, "1001.1");
        assert_eq!(press(&mut engine, "C 123456.789 + 0 =").unwrap().display, "123456.789");
    }

    #[test]
    fn test_equals_repeats_operand() {
        assert_eq!(display_after("3 + ="), "6");
        assert_eq!(display_after("5 * ="), "25");
    }

    #[test]
    fn test_equals_twice_same_result() {
        let mut engine = Engine::default();
        let first = press(&mut engine, "6 * 7 =").unwrap();
        let second = press(&mut engine, "=").unwrap();
        assert_eq!(first.display, "42");
        assert_eq!(second.display, "42");
    }

    #[test]
    fn test_result_then_digit_starts_fresh() {
        assert_eq!(display_after("3 + 4 = 9"), "9");
        assert_eq!(display_after("3 + 4 = ."), "0.");
        assert_eq!(display_after("3 + 4 = + 1 ="), "8");
    }

    #[test]
    fn test_leading_zeros_collapse() {
        let mut engine = Engine::default();
        assert_eq!(engine.digit(0).unwrap().display, "0");
        assert_eq!(engine.digit(0).unwrap().display, "0");
        assert_eq!(engine.digit(7).unwrap().display, "7");
    }

    #[test]
    fn test_decimal_point() {
        assert_eq!(display_after("."), "0.");
        assert_eq!(display_after("1 . . 5"), "1.5");
        assert_eq!(display_after("0.25"), "0.25");
        assert_eq!(display_after("1.5.2"), "1.52");
    }

    #[test]
    fn test_power_mode() {
        let mut engine = Engine::default();
        let render = press(&mut engine, "5 ^").unwrap();
        assert_eq!(render.display, "0");
        assert_eq!(render.annotation_text(&english()), "5ⁿ (enter power)");
        assert!(engine.state().power_mode());
        assert_eq!(engine.state().power_base(), Some(5.0));

        let render = press(&mut engine, "3").unwrap();
        assert_eq!(engine.state().power_exponent_entry(), "3");
        assert_eq!(render.annotation_text(&english()), "5ⁿ = 5 × 5 × 5");

        let render = press(&mut engine, "^").unwrap();
        assert_eq!(render.display, "125");
        assert_eq!(render.annotation_text(&english()), "5ⁿ = 5 × 5 × 5 = 125");
        assert!(!engine.state().power_mode());
    }

    #[test]
    fn test_power_resolved_by_equals_and_operator() {
        assert_eq!(display_after("2 ^ 10 ="), "1024");
        assert_eq!(display_after("2 ^ 3 + 1 ="), "9");
        assert_eq!(display_after("1.5 ^ 2 ="), "2.25");
        assert_eq!(display_after("7 ^ 0 ^"), "1");
    }

    #[test]
    fn test_power_zero_annotation() {
        let mut engine = Engine::default();
        let render = press(&mut engine, "7 ^ 0").unwrap();
        assert_eq!(render.annotation_text(&english()), "7ⁿ = 1");
        let render = press(&mut engine, "^").unwrap();
        assert_eq!(render.display, "1");
        assert_eq!(render.annotation_text(&english()), "7ⁿ = 1");
    }

    #[test]
    fn test_power_annotation_keeps_typed_base() {
        let mut engine = Engine::new(Precision::try_from(2).unwrap());
        let render = press(&mut engine, "1.23456 ^").unwrap();
        assert_eq!(render.annotation_text(&english()), "1.23456ⁿ (enter power)");
        let render = press(&mut engine, "1").unwrap();
        assert_eq!(render.annotation_text(&english()), "1.23456ⁿ = 1.23456");
        let render = press(&mut engine, "=").unwrap();
        assert_eq!(render.display, "1.23");
        assert_eq!(render.annotation_text(&english()), "1.23456ⁿ = 1.23456");
    }

    #[test]
    fn test_power_without_exponent_is_noop() {
        let mut engine = Engine::default();
        press(&mut engine, "4 ^ ^ + =").unwrap();
        assert!(engine.state().power_mode());
        assert_eq!(engine.state().power_exponent_entry(), "");
        assert_eq!(press(&mut engine, "2 =").unwrap().display, "16");
    }

    #[test]
    fn test_power_with_nothing_entered_is_noop() {
        let mut engine = Engine::default();
        press(&mut engine, "^").unwrap();
        assert!(!engine.state().power_mode());
    }

    #[test]
    fn test_power_with_pending_operator_resolves_first() {
        let mut engine = Engine::default();
        press(&mut engine, "7 + 5 ^").unwrap();
        assert_eq!(engine.state().power_base(), Some(12.0));
        assert_eq!(engine.state().pending_operator(), None);
        assert_eq!(press(&mut engine, "2 =").unwrap().display, "144");
    }

    #[test]
    fn test_power_with_operator_but_no_operand_drops_operator() {
        let mut engine = Engine::default();
        press(&mut engine, "3 * ^").unwrap();
        assert_eq!(engine.state().power_base(), Some(3.0));
        assert_eq!(engine.state().pending_operator(), None);
        assert_eq!(press(&mut engine, "4 ^").unwrap().display, "81");
    }

    #[test]
    fn test_power_expansion_abbreviated() {
        let mut engine = Engine::default();
        let render = press(&mut engine, "2 ^ 12").unwrap();
        assert_eq!(
            render.annotation_text(&english()),
            "2ⁿ = 2 × 2 × 2 × 2 × 2 × 2 × 2 × 2 × …"
        );
    }

    #[test]
    fn test_power_overflow_is_invalid_input() {
        let mut engine = Engine::default();
        let err = press(&mut engine, "10 ^ 400 =").unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
        assert_eq!(err.message_key(), TextKey::ErrorInput);
        assert_eq!(engine.display(), "0");
        assert!(!engine.state().power_mode());
    }

    #[test]
    fn test_huge_exponent_is_invalid_input() {
        let mut engine = Engine::default();
        let err = press(&mut engine, "1 ^ 99999999999 =").unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput(_)));
    }

    #[test]
    fn test_backspace_in_power_mode() {
        let mut engine = Engine::default();
        press(&mut engine, "3 ^ 45 <").unwrap();
        assert_eq!(engine.state().power_exponent_entry(), "4");
        let render = press(&mut engine, "<").unwrap();
        assert_eq!(render.annotation_text(&english()), "3ⁿ (enter power)");
        assert_eq!(press(&mut engine, "2 =").unwrap().display, "9");
    }

    #[test]
    fn test_decimal_ignored_in_power_mode() {
        let mut engine = Engine::default();
        press(&mut engine, "3 ^ .").unwrap();
        assert_eq!(engine.state().current_entry, "");
        assert_eq!(press(&mut engine, "2 =").unwrap().display, "9");
    }

    #[test]
    fn test_toggle_sign() {
        assert_eq!(display_after("5 ±"), "-5");
        assert_eq!(display_after("5 ± ±"), "5");
        assert_eq!(display_after("5 ± 3"), "-53");
        assert_eq!(display_after("±"), "0");
        assert_eq!(display_after("0 ±"), "0");
        assert_eq!(display_after("4 ± + 6 ="), "2");
    }

    #[test]
    fn test_backspace() {
        assert_eq!(display_after("123 <"), "12");
        assert_eq!(display_after("1 < <"), "0");
        assert_eq!(display_after("5 ± <"), "0");
        assert_eq!(display_after("<"), "0");
    }

    #[test]
    fn test_percent_keeps_pending_operation() {
        let mut engine = Engine::default();
        press(&mut engine, "200 + 50 %").unwrap();
        assert_eq!(engine.state().current_entry, "0.5");
        assert_eq!(engine.state().pending_operand(), Some("200"));
        assert_eq!(press(&mut engine, "=").unwrap().display, "200.5");
    }

    #[test]
    fn test_display_keeps_operand_while_pending() {
        let mut engine = Engine::default();
        let render = press(&mut engine, "12 +").unwrap();
        assert_eq!(render.display, "12");
        assert_eq!(engine.state().current_entry, "");
    }

    #[test]
    fn test_clear_keeps_precision() {
        let mut engine = Engine::new(Precision::try_from(15).unwrap());
        press(&mut engine, "9 + 1").unwrap();
        let render = engine.clear();
        assert_eq!(render.display, "0");
        assert_eq!(render.annotation, Annotation::None);
        assert_eq!(engine.state().precision.digits(), 15);
        assert_eq!(engine.state().mode, Mode::Entry);
    }

    #[test]
    fn test_invalid_digit() {
        let mut engine = Engine::default();
        assert!(matches!(engine.digit(12), Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn test_russian_power_prompt() {
        let ru = Catalog::builtin(Language::Russian).unwrap();
        let mut engine = Engine::default();
        let render = press(&mut engine, "2 ^").unwrap();
        assert_eq!(render.annotation_text(&ru), "2ⁿ (введите степень)");
    }

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("5."), Ok(5.0));
        assert_eq!(parse_number("-0.25"), Ok(-0.25));
        assert!(parse_number("").is_err());
        assert!(parse_number("-").is_err());
        assert!(parse_number(".").is_err());
        assert!(parse_number("1.2.3").is_err());
        assert!(parse_number("inf").is_err());
        assert!(parse_number("1e5").is_err());
        assert!(parse_number(&"9".repeat(400)).is_err());
    }

    #[test]
    fn test_format_number() {
        let p = Precision::default();
        assert_eq!(format_number(7.0, p).unwrap(), "7");
        assert_eq!(format_number(-0.0, p).unwrap(), "0");
        assert_eq!(format_number(-2.5, p).unwrap(), "-2.5");
        assert_eq!(format_number(1e-12, p).unwrap(), "0");
        assert_eq!(format_number(0.1 + 0.2, p).unwrap(), "0.3");
        assert_eq!(format_number(12345678.9, p).unwrap(), "12345678.9");
        assert_eq!(format_number(-1e-12, p).unwrap(), "0");
        assert_eq!(format_number(1e20, p).unwrap(), "100000000000000000000");

        let fine = Precision::try_from(15).unwrap();
        assert_eq!(format_number(1001.1, fine).unwrap(), "1001.1");
        assert_eq!(format_number(123456.789, fine).unwrap(), "123456.789");
        assert!(format_number(f64::INFINITY, p).is_err());
        assert!(format_number(f64::NAN, p).is_err());
    }

    proptest! {
        #[test]
        fn prop_digits_echo_on_display(s in "[1-9][0-9]{0,14}") {
            let mut engine = Engine::default();
            for c in s.chars() {
                engine.digit(c.to_digit(10).unwrap() as u8).unwrap();
            }
            prop_assert_eq!(engine.display(), s);
        }

        #[test]
        fn prop_equals_is_idempotent(a in 0u32..10_000, b in 1u32..10_000, op in 0usize..4) {
            let op = [Operator::Add, Operator::Subtract, Operator::Multiply, Operator::Divide][op];
            let mut engine = Engine::default();
            press(&mut engine, &a.to_string()).unwrap();
            engine.operator(op).unwrap();
            press(&mut engine, &b.to_string()).unwrap();
            let first = engine.equals().unwrap();
            let second = engine.equals().unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
