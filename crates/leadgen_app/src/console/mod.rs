//! Interactive console front end.
mod app;
mod effects;
pub mod settings;
mod ui;

pub use app::run_console;
