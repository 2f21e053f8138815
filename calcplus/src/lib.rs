//! Calculator Plus
//!
//! The arithmetic engine, the keypad description and the egui window that
//! ties them to the shared theme, catalog and settings from `calccore`.

pub mod app;
pub mod engine;
pub mod keypad;

pub use app::CalcApp;
pub use engine::{ButtonEvent, CalcError, Engine, Operator, Render};
