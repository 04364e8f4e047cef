//! TUI Module - interactive log browser
//!
//! This module organizes the browser into focused components:
//! - event_loop: entry point, terminal session and the blocking input loop
//! - loader: reads the file into an in-memory entry list
//! - state: the browser state machine
//! - input: key press to action mapping
//! - render: UI drawing functions
//! - utils: layout helpers and the help overlay

mod event_loop;
mod input;
mod loader;
mod render;
mod state;
mod utils;

pub use event_loop::{run, TuiOptions};
pub use input::action_for_key;
pub use loader::{load_entries, LoadedLog};
pub use state::{Action, BrowserState, LevelFilter, Mode};
