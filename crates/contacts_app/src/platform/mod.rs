//! Terminal shell around the contacts core: configuration, logging, effect
//! execution and rendering.
mod app;
mod cli;
mod config;
mod effects;
mod logging;
mod ui;

pub use app::run_app;
