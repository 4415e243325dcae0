//! Key handling for the timer TUI.

use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyModifiers};
use cycles_rs::prelude::*;
use tracing::warn;

use crate::app::{App, FormField, Screen};

/// Digits enough for any typed minutes value; validation rejects anything
/// past 60 regardless.
const MINUTES_INPUT_MAX_LEN: usize = 3;

pub(crate) fn handle_key_event(
    key: crossterm::event::KeyEvent,
    app: &mut App,
    state: &Arc<Mutex<AppState>>,
) {
    // Ctrl+C always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.should_quit = true;
        return;
    }

    // Ctrl+T toggles between the two screens; Ctrl+L toggles the log pane.
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('t') => {
                app.screen = match app.screen {
                    Screen::Home => Screen::History,
                    Screen::History => Screen::Home,
                };
                return;
            }
            KeyCode::Char('l') => {
                app.show_logs = !app.show_logs;
                return;
            }
            _ => {}
        }
    }

    match app.screen {
        Screen::Home => handle_home_key(key, app, state),
        Screen::History => handle_history_key(key, app, state),
    }
}

fn handle_home_key(
    key: crossterm::event::KeyEvent,
    app: &mut App,
    state: &Arc<Mutex<AppState>>,
) {
    match key.code {
        KeyCode::Enter => submit(app, state),
        KeyCode::Tab | KeyCode::BackTab => {
            app.focus = match app.focus {
                FormField::Task => FormField::MinutesAmount,
                FormField::MinutesAmount => FormField::Task,
            };
            app.suggestion_cursor = None;
        }
        KeyCode::Up => match app.focus {
            FormField::Task => cycle_suggestion(app, -1),
            FormField::MinutesAmount => step_minutes(app, MINUTES_STEP as i64),
        },
        KeyCode::Down => match app.focus {
            FormField::Task => cycle_suggestion(app, 1),
            FormField::MinutesAmount => step_minutes(app, -(MINUTES_STEP as i64)),
        },
        KeyCode::Backspace => {
            match app.focus {
                FormField::Task => {
                    app.task_input.pop();
                }
                FormField::MinutesAmount => {
                    app.minutes_input.pop();
                }
            }
            app.suggestion_cursor = None;
            app.form_error = None;
        }
        KeyCode::Char(c) => {
            match app.focus {
                FormField::Task => app.task_input.push(c),
                FormField::MinutesAmount => {
                    if c.is_ascii_digit() && app.minutes_input.len() < MINUTES_INPUT_MAX_LEN {
                        app.minutes_input.push(c);
                    }
                }
            }
            app.suggestion_cursor = None;
            app.form_error = None;
        }
        _ => {}
    }
}

fn handle_history_key(
    key: crossterm::event::KeyEvent,
    app: &mut App,
    state: &Arc<Mutex<AppState>>,
) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Esc | KeyCode::Char('h') => app.screen = Screen::Home,
        KeyCode::Up | KeyCode::Char('k') => {
            app.history_scroll = app.history_scroll.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            let len = state.lock().map(|s| s.store.len()).unwrap_or(0);
            if app.history_scroll + 1 < len {
                app.history_scroll += 1;
            }
        }
        KeyCode::Home => app.history_scroll = 0,
        _ => {}
    }
}

/// Validate the live form and, on success, create the cycle and reset the
/// form to its defaults. A submit with an empty task is a no-op: the
/// affordance is disabled in that state.
fn submit(app: &mut App, state: &Arc<Mutex<AppState>>) {
    if app.submit_disabled() {
        return;
    }

    let input = NewCycleInput {
        task: app.task_input.clone(),
        minutes_amount: app.minutes_value(),
    };

    match validate(&input) {
        Ok(data) => {
            create_cycle(state, data);
            app.reset_form();
        }
        Err(errors) => {
            let first = errors.first();
            warn!(field = first.field.name(), "submission rejected: {}", first.message);
            app.form_error = Some(first.message.to_string());
        }
    }
}

/// Step the minutes field by ±5, clamped to the [5, 60] widget hints.
/// Typed values bypass this and are caught by validation instead.
fn step_minutes(app: &mut App, delta: i64) {
    let current = i64::from(app.minutes_value());
    let stepped = (current + delta).clamp(i64::from(MINUTES_MIN), i64::from(MINUTES_MAX));
    app.minutes_input = stepped.to_string();
}

/// Cycle through the fixed task suggestions matching what was typed
/// before cycling started (the datalist autocomplete, keyboard style).
fn cycle_suggestion(app: &mut App, dir: i64) {
    if app.suggestion_cursor.is_none() {
        app.suggestion_prefix = app.task_input.clone();
    }

    let matches: Vec<&str> = TASK_SUGGESTIONS
        .iter()
        .copied()
        .filter(|s| s.starts_with(app.suggestion_prefix.as_str()))
        .collect();
    if matches.is_empty() {
        return;
    }

    let len = matches.len() as i64;
    let next = match app.suggestion_cursor {
        None => {
            if dir > 0 {
                0
            } else {
                len - 1
            }
        }
        Some(i) => (i as i64 + dir).rem_euclid(len),
    } as usize;

    app.suggestion_cursor = Some(next);
    app.task_input = matches[next].to_string();
}
