//! Log capture for the TUI's log pane.
//!
//! [`UiTracingLayer`] turns tracing events into [`LogLine`]s and parks them
//! in a [`LogBuffer`]. The buffer has its own lock, separate from
//! `AppState`, so a `tracing::info!` anywhere in the app can never contend
//! with the frontend holding the state for a draw. The frontend calls
//! [`LogBuffer::flush_into`] once per frame to move pending lines over.

use std::fmt::Write as _;
use std::sync::{Arc, Mutex};

use chrono::Local;
use tracing::Subscriber;
use tracing_subscriber::layer::Layer;
use tracing_subscriber::registry::LookupSpan;

use crate::state::{AppState, LogLevel, LogLine, trim_logs};

/// Pending log lines, waiting for the frontend to pick them up.
#[derive(Clone)]
pub struct LogBuffer {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl LogBuffer {
    /// Take every pending line out of the buffer.
    pub fn drain(&self) -> Vec<LogLine> {
        let mut pending = self.lines.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *pending)
    }

    /// Move pending lines into `AppState::logs`, trimming to the log caps.
    ///
    /// Touches the `AppState` lock only when there is something to move.
    pub fn flush_into(&self, state: &Arc<Mutex<AppState>>) {
        let lines = self.drain();
        if lines.is_empty() {
            return;
        }
        if let Ok(mut s) = state.lock() {
            s.logs.extend(lines);
            trim_logs(&mut s.logs);
        }
    }
}

/// Tracing layer feeding a [`LogBuffer`].
pub struct UiTracingLayer {
    buffer: LogBuffer,
}

impl UiTracingLayer {
    /// Create the layer and the [`LogBuffer`] it writes to. Install the
    /// layer on a registry and hand the buffer to the frontend.
    pub fn new() -> (Self, LogBuffer) {
        let buffer = LogBuffer {
            lines: Arc::new(Mutex::new(Vec::new())),
        };
        (
            Self {
                buffer: buffer.clone(),
            },
            buffer,
        )
    }
}

fn level_of(level: &tracing::Level) -> LogLevel {
    match *level {
        tracing::Level::TRACE => LogLevel::Trace,
        tracing::Level::DEBUG => LogLevel::Debug,
        tracing::Level::INFO => LogLevel::Info,
        tracing::Level::WARN => LogLevel::Warn,
        tracing::Level::ERROR => LogLevel::Error,
    }
}

impl<S: Subscriber + for<'a> LookupSpan<'a>> Layer<S> for UiTracingLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);

        let line = LogLine {
            time: Local::now().format("%H:%M:%S").to_string(),
            level: level_of(event.metadata().level()),
            message: visitor.finish(),
        };

        if let Ok(mut pending) = self.buffer.lines.lock() {
            pending.push(line);
            // A burst of events between two frames must not grow unbounded.
            trim_logs(&mut pending);
        }
    }
}

/// Builds one display line from an event: the message, then any extra
/// fields as `key=value` pairs — e.g. `cycle started (task=Projeto 1
/// minutes=25)` from the creation log in [`crate::state::create_cycle`].
#[derive(Default)]
struct LineVisitor {
    message: String,
    extras: String,
}

impl LineVisitor {
    fn note(&mut self, name: &str, value: impl std::fmt::Display) {
        if !self.extras.is_empty() {
            self.extras.push(' ');
        }
        let _ = write!(self.extras, "{name}={value}");
    }

    fn finish(self) -> String {
        if self.extras.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.extras
        } else {
            format!("{} ({})", self.message, self.extras)
        }
    }
}

impl tracing::field::Visit for LineVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.note(field.name(), value);
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        // The macro-generated message and `%`-captured fields both land
        // here already formatted for display.
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            self.note(field.name(), format_args!("{value:?}"));
        }
    }
}
