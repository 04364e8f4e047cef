//! Event Loop - TUI entry point, terminal session and input handling

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Once;

use super::input::action_for_key;
use super::loader::load_entries;
use super::render::{draw_ui, layout_for};
use super::state::{BrowserState, Mode};
use super::utils::list_rows;

/// Settings for one browser session
#[derive(Debug, Clone, Copy)]
pub struct TuiOptions {
    /// Stop reading after this many lines
    pub limit: Option<usize>,
    /// Initial page size, replaced by the real list height on first draw
    pub page_size: usize,
    pub buffer_capacity: usize,
}

/// Run the browser on `path` until the user quits.
///
/// The file is read before the terminal is touched, so open and read
/// errors surface as ordinary errors on a normal screen.
pub fn run(path: &Path, options: TuiOptions) -> Result<()> {
    let loaded = load_entries(path, options.limit, options.buffer_capacity)
        .with_context(|| format!("failed to load {}", path.display()))?;

    let mut state = BrowserState::new(path.display().to_string(), loaded, options.page_size);

    let mut session = TerminalSession::enter()?;
    let result = run_event_loop(&mut session.terminal, &mut state);

    // Restore terminal (always attempt cleanup)
    let cleanup_result = session.restore();

    result.and(cleanup_result)
}

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode plus alternate screen, undone on drop and on panic
struct TerminalSession {
    terminal: Term,
    restored: bool,
}

static PANIC_HOOK: Once = Once::new();

impl TerminalSession {
    fn enter() -> Result<Self> {
        enable_raw_mode().context(
            "failed to enable raw mode; ensure you're running in a real terminal (TTY)",
        )?;

        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e).context("failed to initialize terminal");
        }

        install_panic_hook();

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                return Err(e).context("failed to initialize terminal");
            }
        };

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    /// Every step runs even if an earlier one fails; the first error wins
    fn restore(&mut self) -> Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;

        let raw = disable_raw_mode();
        let screen = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let cursor = self.terminal.show_cursor();

        raw.and(screen)
            .and(cursor)
            .context("failed to restore terminal")
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

/// Put the terminal back before the default hook prints the panic
fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let previous = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            previous(info);
        }));
    });
}

/// Main event loop
fn run_event_loop(terminal: &mut Term, state: &mut BrowserState) -> Result<()> {
    while state.mode() != Mode::Exiting {
        let area = terminal.size()?;
        state.set_page_size(list_rows(layout_for(area, state).list));

        terminal.draw(|f| draw_ui(f, state))?;

        // Blocking read; nothing changes between key presses
        match event::read()? {
            Event::Key(key) => {
                if let Some(action) = action_for_key(state.mode(), key) {
                    state.apply(action);
                }
            }
            // Resizes are picked up by the next pass
            _ => {}
        }
    }
    Ok(())
}
