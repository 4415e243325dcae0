//! New-cycle form schema and validation.
//!
//! The schema is a rule table: each rule names a field and pairs a
//! predicate with the message shown when it fails. Rules are evaluated in
//! order and the first failure wins per field. Validation is pure — the
//! caller decides what to do with a [`ValidationErrors`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum accepted cycle length in minutes.
pub const MINUTES_MIN: u32 = 5;
/// Maximum accepted cycle length in minutes.
pub const MINUTES_MAX: u32 = 60;
/// Step used by the minutes input widget. Validation only enforces the
/// range; off-step values typed by hand are accepted.
pub const MINUTES_STEP: u32 = 5;

/// Fixed autocomplete suggestions offered by the task input.
pub const TASK_SUGGESTIONS: [&str; 4] = ["Projeto 1", "Projeto 2", "Projeto 3", "Projeto 4"];

/// Form field names, used to attach errors to the right input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Task,
    MinutesAmount,
}

impl Field {
    pub fn name(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::MinutesAmount => "minutesAmount",
        }
    }
}

/// A candidate input as typed by the user, before validation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCycleInput {
    pub task: String,
    pub minutes_amount: u32,
}

/// A validated new-cycle payload, produced by [`validate`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCycleData {
    pub task: String,
    pub minutes_amount: u32,
}

/// One field-level validation failure.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{}: {}", .field.name(), .message)]
pub struct FieldError {
    pub field: Field,
    pub message: &'static str,
}

/// All field errors from one validation pass, at most one per field.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("invalid new-cycle input ({} field(s))", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// The error attached to `field`, if that field failed.
    pub fn for_field(&self, field: Field) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }

    /// The first error in schema order, for single-line display.
    /// A `ValidationErrors` is only ever built with at least one entry.
    pub fn first(&self) -> &FieldError {
        &self.errors[0]
    }
}

struct Rule {
    field: Field,
    check: fn(&NewCycleInput) -> bool,
    message: &'static str,
}

/// The new-cycle schema. Evaluated top to bottom; per field, the first
/// failing rule produces the error and later rules for that field are
/// skipped.
const SCHEMA: &[Rule] = &[
    Rule {
        field: Field::Task,
        check: |input| !input.task.is_empty(),
        message: "Informe a tarefa",
    },
    Rule {
        field: Field::MinutesAmount,
        check: |input| input.minutes_amount >= MINUTES_MIN,
        message: "O intervalo precisa ser de no mínimo 5 minutos",
    },
    Rule {
        field: Field::MinutesAmount,
        check: |input| input.minutes_amount <= MINUTES_MAX,
        message: "O intervalo precisa ser de no máximo 60 minutos",
    },
];

/// Validate a candidate input against the schema.
pub fn validate(input: &NewCycleInput) -> Result<NewCycleData, ValidationErrors> {
    let mut errors: Vec<FieldError> = Vec::new();

    for rule in SCHEMA {
        if errors.iter().any(|e| e.field == rule.field) {
            continue; // first failure already recorded for this field
        }
        if !(rule.check)(input) {
            errors.push(FieldError {
                field: rule.field,
                message: rule.message,
            });
        }
    }

    if errors.is_empty() {
        Ok(NewCycleData {
            task: input.task.clone(),
            minutes_amount: input.minutes_amount,
        })
    } else {
        Err(ValidationErrors { errors })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(task: &str, minutes: u32) -> NewCycleInput {
        NewCycleInput {
            task: task.to_string(),
            minutes_amount: minutes,
        }
    }

    #[test]
    fn valid_input_passes_through() {
        let data = validate(&input("Projeto 1", 25)).unwrap();
        assert_eq!(data.task, "Projeto 1");
        assert_eq!(data.minutes_amount, 25);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(validate(&input("t", MINUTES_MIN)).is_ok());
        assert!(validate(&input("t", MINUTES_MAX)).is_ok());
    }

    #[test]
    fn empty_task_is_rejected() {
        let errors = validate(&input("", 25)).unwrap_err();
        let err = errors.for_field(Field::Task).unwrap();
        assert_eq!(err.message, "Informe a tarefa");
        assert!(errors.for_field(Field::MinutesAmount).is_none());
    }

    #[test]
    fn any_typed_character_fills_the_task() {
        // Only the truly empty string is "required"-invalid; whitespace
        // counts as content, same as the length-1 minimum it stands for.
        assert!(validate(&input("   ", 25)).is_ok());
    }

    #[test]
    fn below_minimum_minutes_rejected() {
        let errors = validate(&input("Study", 3)).unwrap_err();
        let err = errors.for_field(Field::MinutesAmount).unwrap();
        assert_eq!(err.message, "O intervalo precisa ser de no mínimo 5 minutos");
    }

    #[test]
    fn above_maximum_minutes_rejected() {
        let errors = validate(&input("Study", 61)).unwrap_err();
        let err = errors.for_field(Field::MinutesAmount).unwrap();
        assert_eq!(err.message, "O intervalo precisa ser de no máximo 60 minutos");
    }

    #[test]
    fn first_failure_wins_per_field() {
        // minutes 0 fails both range rules; only the minimum is reported.
        let errors = validate(&input("t", 0)).unwrap_err();
        assert_eq!(errors.errors.len(), 1);
        assert_eq!(
            errors.first().message,
            "O intervalo precisa ser de no mínimo 5 minutos"
        );
    }

    #[test]
    fn both_fields_can_fail_at_once() {
        let errors = validate(&input("", 0)).unwrap_err();
        assert_eq!(errors.errors.len(), 2);
        assert!(errors.for_field(Field::Task).is_some());
        assert!(errors.for_field(Field::MinutesAmount).is_some());
        // Schema order: task error first.
        assert_eq!(errors.first().field, Field::Task);
    }

    #[test]
    fn field_error_displays_field_name() {
        let errors = validate(&input("", 25)).unwrap_err();
        assert_eq!(errors.first().to_string(), "task: Informe a tarefa");
    }
}
