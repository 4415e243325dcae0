//! TUI-local state (not shared with the domain layer).

/// Which screen the middle pane shows. The header and hint bar are the
/// shared layout rendered around both.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    /// New-cycle form plus the countdown display.
    Home,
    /// List of every created cycle, oldest first.
    History,
}

/// Which form field currently receives typed input.
#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormField {
    Task,
    MinutesAmount,
}

/// TUI-local state (not shared with the domain layer).
pub(crate) struct App {
    pub(crate) screen: Screen,
    /// Focused form field on the home screen (toggled with Tab).
    pub(crate) focus: FormField,
    /// Live task field contents. The start affordance is disabled
    /// whenever this is empty.
    pub(crate) task_input: String,
    /// Live minutes field contents (digits only; empty means 0).
    pub(crate) minutes_input: String,
    /// First field error from the last rejected submission.
    pub(crate) form_error: Option<String>,
    /// Prefix captured when suggestion cycling started.
    pub(crate) suggestion_prefix: String,
    /// Currently selected suggestion index, if cycling.
    pub(crate) suggestion_cursor: Option<usize>,
    /// Whether the logs pane is visible (toggled with Ctrl+L).
    pub(crate) show_logs: bool,
    /// Offset from the bottom of the log (0 = follow tail).
    pub(crate) log_scroll: usize,
    /// Offset from the top of the history list.
    pub(crate) history_scroll: usize,
    pub(crate) should_quit: bool,
}

impl App {
    pub(crate) fn new() -> Self {
        Self {
            screen: Screen::Home,
            focus: FormField::Task,
            task_input: String::new(),
            minutes_input: String::new(),
            form_error: None,
            suggestion_prefix: String::new(),
            suggestion_cursor: None,
            show_logs: false,
            log_scroll: 0,
            history_scroll: 0,
            should_quit: false,
        }
    }

    /// The submit affordance is disabled while the live task field is
    /// empty, recomputed on every keystroke.
    pub(crate) fn submit_disabled(&self) -> bool {
        self.task_input.is_empty()
    }

    /// Minutes field parsed as a number; empty or unparsable input counts
    /// as 0 and is left to validation to reject.
    pub(crate) fn minutes_value(&self) -> u32 {
        self.minutes_input.parse().unwrap_or(0)
    }

    /// Reset the form to its defaults: empty task, zero minutes.
    pub(crate) fn reset_form(&mut self) {
        self.task_input.clear();
        self.minutes_input.clear();
        self.suggestion_prefix.clear();
        self.suggestion_cursor = None;
        self.form_error = None;
        self.focus = FormField::Task;
    }
}
