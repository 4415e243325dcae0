//! Shared application state.
//!
//! Plain data shared between whoever drives the domain (the form submit
//! path) and a frontend that renders it. Protected by a `Mutex`; the
//! convenience updaters below lock, mutate, and release. Domain-specific
//! rendering never happens in this crate.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::cycle::{CycleId, CycleStore};
use crate::form::NewCycleData;

/// Maximum log lines kept in memory.
pub const MAX_LOG_LINES: usize = 2000;
/// Trim to this many when the cap is exceeded.
pub const LOG_TRIM_TO: usize = 1200;

/// A single log line captured from tracing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LogLine {
    pub time: String,
    pub level: LogLevel,
    pub message: String,
}

/// Log severity level (mirrors tracing levels).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Short fixed-width label for display.
    pub fn label(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO ",
            Self::Warn => "WARN ",
            Self::Error => "ERROR",
        }
    }
}

/// Core state shared between the domain layer and a frontend.
pub struct AppState {
    /// All created cycles plus the active reference.
    pub store: CycleStore,

    /// Tracing log capture, drained into here by the frontend.
    pub logs: Vec<LogLine>,

    /// The frontend sets this to `true` when the user requests quit.
    pub quit_requested: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            store: CycleStore::new(),
            logs: Vec::new(),
            quit_requested: false,
        }
    }
}

/// Lock the shared state mutex and run a closure on the guard.
/// Silently ignores poisoned locks (no log spam inside frontends).
macro_rules! with_state {
    ($state:expr, |$s:ident| $body:block) => {
        if let Ok(mut $s) = $state.lock() {
            $body
        }
    };
}

/// Append a validated cycle to the store and mark it active.
///
/// Only reachable with a [`NewCycleData`], so there is no failure path
/// here; validation already happened at the form boundary.
pub fn create_cycle(state: &Arc<Mutex<AppState>>, data: NewCycleData) -> Option<CycleId> {
    let mut created = None;
    with_state!(state, |s| {
        let id = s.store.create(data.task.clone(), data.minutes_amount);
        info!(task = %data.task, minutes = data.minutes_amount, "cycle started");
        created = Some(id);
    });
    created
}

/// Ask the application to shut down.
pub fn request_quit(state: &Arc<Mutex<AppState>>) {
    with_state!(state, |s| { s.quit_requested = true });
}

/// Trim `logs` in place when it exceeds [`MAX_LOG_LINES`], keeping the
/// most recent lines.
pub(crate) fn trim_logs(logs: &mut Vec<LogLine>) {
    if logs.len() > MAX_LOG_LINES {
        let drain = logs.len() - LOG_TRIM_TO;
        logs.drain(..drain);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_level_labels() {
        assert_eq!(LogLevel::Info.label(), "INFO ");
        assert_eq!(LogLevel::Error.label(), "ERROR");
        assert_eq!(LogLevel::Warn.label(), "WARN ");
    }

    #[test]
    fn app_state_defaults() {
        let state = AppState::default();
        assert!(!state.quit_requested);
        assert!(state.logs.is_empty());
        assert!(state.store.is_empty());
        assert!(state.store.active_cycle().is_none());
    }

    #[test]
    fn create_cycle_appends_and_activates() {
        let state = Arc::new(Mutex::new(AppState::default()));
        let data = NewCycleData {
            task: "Projeto 1".into(),
            minutes_amount: 25,
        };

        let id = create_cycle(&state, data).unwrap();

        let s = state.lock().unwrap();
        assert_eq!(s.store.len(), 1);
        assert_eq!(s.store.active_id(), Some(id));
        assert_eq!(s.store.active_cycle().unwrap().task, "Projeto 1");
    }

    #[test]
    fn request_quit_sets_flag() {
        let state = Arc::new(Mutex::new(AppState::default()));
        request_quit(&state);
        assert!(state.lock().unwrap().quit_requested);
    }

    #[test]
    fn trim_logs_keeps_most_recent() {
        let mut logs: Vec<LogLine> = (0..MAX_LOG_LINES + 10)
            .map(|i| LogLine {
                time: String::new(),
                level: LogLevel::Info,
                message: i.to_string(),
            })
            .collect();

        trim_logs(&mut logs);

        assert_eq!(logs.len(), LOG_TRIM_TO);
        assert_eq!(logs.last().unwrap().message, (MAX_LOG_LINES + 9).to_string());
    }
}
