//! Logsift library - exposes the CLI layers for integration tests

pub mod commands;
pub mod errors;
pub mod logging;
pub mod tui;
