//! Terminal UI for cycles-rs.
//!
//! Provides a two-screen TUI (ratatui + crossterm): a home screen with the
//! new-cycle form and countdown, and a history screen listing every
//! created cycle. Renders the shared
//! [`AppState`](cycles_rs::state::AppState) from `cycles-rs`.
//!
//! # Quick start
//!
//! ```ignore
//! use cycles_tui::{TuiConfig, spawn_tui};
//! use cycles_rs::state::AppState;
//! use std::sync::{Arc, Mutex};
//!
//! let state = Arc::new(Mutex::new(AppState::default()));
//! let handle = spawn_tui(state.clone(), TuiConfig::default());
//! handle.join().unwrap();
//! ```

use std::io;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use crossterm::{cursor, execute};
use cycles_rs::state::AppState;
use cycles_rs::trace::LogBuffer;
use ratatui::prelude::*;

mod app;
mod input;
mod render;

pub use render::{format_clock, log_level_style};

use app::{App, Screen};
use input::handle_key_event;
use render::render;

/// Configuration for the TUI.
#[derive(Default)]
pub struct TuiConfig {
    /// Prefill for the task field.
    pub initial_task: String,
    /// Prefill for the minutes field; 0 leaves it empty.
    pub initial_minutes: u32,
    /// Open on the history screen instead of the form.
    pub start_on_history: bool,
    /// Optional log buffer from the tracing layer.
    ///
    /// When set, the TUI drains pending log lines from this buffer once
    /// per frame and merges them into `AppState::logs`.  This keeps the
    /// tracing layer's `on_event` completely decoupled from the AppState
    /// lock, preventing log calls from blocking the render thread.
    pub log_buffer: Option<LogBuffer>,
}

/// Spawn the TUI on a dedicated OS thread.
///
/// The TUI runs until the user quits or `quit_requested` is set.
pub fn spawn_tui(state: Arc<Mutex<AppState>>, config: TuiConfig) -> JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(e) = run_tui(state, &config) {
            eprintln!("TUI error: {e}");
        }
    })
}

/// Run the TUI event loop (blocking). Call this from a dedicated OS thread.
///
/// Returns when the user quits (Ctrl+C anywhere, `q` on the history
/// screen) or `quit_requested` is set.
pub fn run_tui(state: Arc<Mutex<AppState>>, config: &TuiConfig) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, cursor::Hide)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    app.task_input = config.initial_task.clone();
    if config.initial_minutes > 0 {
        app.minutes_input = config.initial_minutes.to_string();
    }
    if config.start_on_history {
        app.screen = Screen::History;
    }

    loop {
        // Check if we should exit.
        let quit = {
            let s = state.lock().unwrap();
            s.quit_requested
        };
        if app.should_quit || quit {
            state.lock().unwrap().quit_requested = true;
            break;
        }

        // Flush pending log lines from the tracing layer into AppState
        // before rendering.  This acquires the AppState lock briefly and
        // only when there are new lines, keeping the render path fast.
        if let Some(ref log_buf) = config.log_buffer {
            log_buf.flush_into(&state);
        }

        // Render.
        terminal.draw(|frame| {
            render(frame, &state, &app);
        })?;

        // Poll for input events. The 100ms timeout doubles as the tick
        // that keeps the countdown display moving.
        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
        {
            handle_key_event(key, &mut app, &state);
        }
    }

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, cursor::Show)?;
    terminal.show_cursor()?;
    Ok(())
}
