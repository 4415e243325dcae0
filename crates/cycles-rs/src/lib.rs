//! Pomodoro-style cycle tracking core.
//!
//! `cycles-rs` provides the domain model behind a countdown timer
//! application: a user names a task, picks a duration in minutes, and
//! starts a cycle. The crate holds no rendering code — a frontend (see
//! `cycles-tui`) reads the shared [`state::AppState`] and renders it.
//!
//! # Architecture
//!
//! ```text
//! form input ──validate──▶ NewCycleData ──create_cycle──▶ CycleStore
//!                                                             │
//!                       Arc<Mutex<AppState>> ◀──reads── frontend
//! ```
//!
//! - [`form`] — the new-cycle validation schema: a rule table of
//!   (field, predicate, message) entries, first failure wins per field.
//! - [`cycle`] — [`Cycle`](cycle::Cycle) and the ordered, id-indexed
//!   [`CycleStore`](cycle::CycleStore) with its active reference.
//! - [`state`] — shared [`AppState`](state::AppState) and its updaters.
//! - [`trace`] — a tracing layer that captures log events for display.

pub mod cycle;
pub mod form;
pub mod state;
pub mod trace;

/// Convenience re-exports for frontends.
pub mod prelude {
    pub use crate::cycle::{Cycle, CycleId, CycleStore};
    pub use crate::form::{
        Field, MINUTES_MAX, MINUTES_MIN, MINUTES_STEP, NewCycleData, NewCycleInput,
        TASK_SUGGESTIONS, ValidationErrors, validate,
    };
    pub use crate::state::{AppState, LogLevel, LogLine, create_cycle, request_quit};
    pub use crate::trace::{LogBuffer, UiTracingLayer};
}
