//! Pomodoro-style countdown timer for the terminal.
//!
//! Name a task, pick a duration between 5 and 60 minutes, and start a
//! cycle. Ctrl+T switches between the timer and the history of created
//! cycles.
//!
//! # Examples
//!
//! ```sh
//! # Start with an empty form
//! cycles
//!
//! # Prefill the form
//! cycles --task "Projeto 1" --minutes 25
//! ```

use std::sync::{Arc, Mutex};

use clap::Parser;
use cycles_rs::state::AppState;
use cycles_rs::trace::UiTracingLayer;
use cycles_tui::TuiConfig;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Pomodoro-style countdown timer for the terminal.
#[derive(Parser)]
#[command(name = "cycles")]
struct Cli {
    /// Prefill the task field.
    #[arg(long, default_value = "")]
    task: String,

    /// Prefill the minutes field (5-60, step 5).
    #[arg(long, default_value_t = 0)]
    minutes: u32,

    /// Open on the history screen.
    #[arg(long)]
    history: bool,
}

fn main() {
    let cli = Cli::parse();

    // Shared state between the domain layer and the TUI.
    let state = Arc::new(Mutex::new(AppState::default()));

    // Set up tracing -> TUI log buffer.
    let (tracing_layer, log_buffer) = UiTracingLayer::new();
    tracing_subscriber::registry().with(tracing_layer).init();

    tracing::info!("cycles started");

    let config = TuiConfig {
        initial_task: cli.task,
        initial_minutes: cli.minutes,
        start_on_history: cli.history,
        log_buffer: Some(log_buffer),
    };

    let tui_handle = cycles_tui::spawn_tui(state, config);
    tui_handle.join().ok();
}
