//! Terminal shell around the core state machine.
mod app;
mod effects;
pub mod input;
mod ui;

pub use app::run_app;
