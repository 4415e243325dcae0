//! End-to-end submit flow through the public API: raw input is validated,
//! valid payloads become cycles in the shared state, invalid ones leave it
//! untouched.

use std::sync::{Arc, Mutex};

use cycles_rs::prelude::*;

fn submit(state: &Arc<Mutex<AppState>>, task: &str, minutes: u32) -> Result<CycleId, ValidationErrors> {
    let input = NewCycleInput {
        task: task.to_string(),
        minutes_amount: minutes,
    };
    let data = validate(&input)?;
    Ok(create_cycle(state, data).expect("state lock poisoned"))
}

#[test]
fn valid_submission_creates_one_active_cycle() {
    let state = Arc::new(Mutex::new(AppState::default()));

    let id = submit(&state, "Projeto 1", 25).unwrap();

    let s = state.lock().unwrap();
    assert_eq!(s.store.len(), 1);
    let active = s.store.active_cycle().unwrap();
    assert_eq!(active.id, id);
    assert_eq!(active.task, "Projeto 1");
    assert_eq!(active.minutes_amount, 25);
}

#[test]
fn empty_task_creates_nothing() {
    let state = Arc::new(Mutex::new(AppState::default()));

    let err = submit(&state, "", 25).unwrap_err();
    assert!(err.for_field(Field::Task).is_some());

    assert!(state.lock().unwrap().store.is_empty());
}

#[test]
fn out_of_range_minutes_create_nothing() {
    let state = Arc::new(Mutex::new(AppState::default()));

    assert!(submit(&state, "Study", 3).is_err());
    assert!(submit(&state, "Study", 61).is_err());

    assert!(state.lock().unwrap().store.is_empty());
}

#[test]
fn each_submission_appends_exactly_one() {
    let state = Arc::new(Mutex::new(AppState::default()));

    let a = submit(&state, "Projeto 1", 25).unwrap();
    let b = submit(&state, "Projeto 2", 30).unwrap();

    let s = state.lock().unwrap();
    assert_eq!(s.store.len(), 2);
    assert!(a < b);
    // The newest cycle took over the active reference.
    assert_eq!(s.store.active_id(), Some(b));
    let tasks: Vec<&str> = s.store.iter().map(|c| c.task.as_str()).collect();
    assert_eq!(tasks, ["Projeto 1", "Projeto 2"]);
}
