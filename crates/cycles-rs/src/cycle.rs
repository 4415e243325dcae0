//! Cycle model and store.
//!
//! A [`Cycle`] is one work-session request: a task label plus a duration in
//! minutes. The [`CycleStore`] keeps cycles in creation order and tracks
//! which one is currently active. Lookup by id goes through an explicit
//! index map rather than a scan of the sequence.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Opaque cycle identifier, derived from the wall clock at creation time
/// (millisecond Unix timestamp).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CycleId(i64);

impl CycleId {
    /// Id for the current instant.
    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    /// The next id strictly after this one.
    fn successor(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for CycleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One work-session request.
///
/// Cycles are created exactly once, on successful form submission, and are
/// never mutated or removed afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cycle {
    pub id: CycleId,
    /// User-supplied task label. Non-empty on the validated creation path.
    pub task: String,
    /// Duration in minutes, within [5, 60] on the validated creation path.
    pub minutes_amount: u32,
    /// Countdown anchor.
    #[serde(skip, default = "Instant::now")]
    pub started_at: Instant,
}

impl Cycle {
    /// Total duration of this cycle.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(u64::from(self.minutes_amount) * 60)
    }

    /// Time left on the countdown as of `now`, saturating at zero.
    pub fn remaining(&self, now: Instant) -> Duration {
        self.duration()
            .saturating_sub(now.saturating_duration_since(self.started_at))
    }

    /// Whether the countdown has run out as of `now`.
    pub fn is_finished(&self, now: Instant) -> bool {
        self.remaining(now).is_zero()
    }
}

/// Ordered sequence of cycles plus an id index and the active reference.
#[derive(Default)]
pub struct CycleStore {
    /// Insertion order = creation order. Never reordered.
    cycles: Vec<Cycle>,
    /// Id -> position in `cycles`, maintained on append.
    index: HashMap<CycleId, usize>,
    /// Weak reference to the active cycle, always resolvable when set.
    active: Option<CycleId>,
}

impl CycleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new cycle and mark it active.
    ///
    /// The id comes from the wall clock; when two creations land on the
    /// same millisecond the new id is bumped past the previous one, so ids
    /// stay unique and strictly increasing.
    pub fn create(&mut self, task: impl Into<String>, minutes_amount: u32) -> CycleId {
        let mut id = CycleId::now();
        if let Some(last) = self.cycles.last()
            && id <= last.id
        {
            id = last.id.successor();
        }

        self.index.insert(id, self.cycles.len());
        self.cycles.push(Cycle {
            id,
            task: task.into(),
            minutes_amount,
            started_at: Instant::now(),
        });
        self.active = Some(id);
        id
    }

    /// Look up a cycle by id.
    pub fn get(&self, id: CycleId) -> Option<&Cycle> {
        self.index.get(&id).map(|&pos| &self.cycles[pos])
    }

    /// The currently active cycle, if any.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.active.and_then(|id| self.get(id))
    }

    /// Id of the currently active cycle, if any.
    pub fn active_id(&self) -> Option<CycleId> {
        self.active
    }

    /// All cycles, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Cycle> {
        self.cycles.iter()
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_appends_and_activates() {
        let mut store = CycleStore::new();
        assert!(store.active_cycle().is_none());

        let id = store.create("Projeto 1", 25);

        assert_eq!(store.len(), 1);
        let active = store.active_cycle().expect("cycle should be active");
        assert_eq!(active.id, id);
        assert_eq!(active.task, "Projeto 1");
        assert_eq!(active.minutes_amount, 25);
    }

    #[test]
    fn rapid_creation_yields_distinct_increasing_ids() {
        let mut store = CycleStore::new();
        let a = store.create("a", 5);
        let b = store.create("b", 5);
        let c = store.create("c", 5);

        assert!(a < b && b < c);
        assert_eq!(store.len(), 3);
        // Latest creation is always the active one.
        assert_eq!(store.active_id(), Some(c));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut store = CycleStore::new();
        store.create("first", 5);
        store.create("second", 10);
        store.create("third", 15);

        let tasks: Vec<&str> = store.iter().map(|c| c.task.as_str()).collect();
        assert_eq!(tasks, ["first", "second", "third"]);
    }

    #[test]
    fn get_resolves_by_id() {
        let mut store = CycleStore::new();
        let a = store.create("a", 5);
        let b = store.create("b", 10);

        assert_eq!(store.get(a).unwrap().task, "a");
        assert_eq!(store.get(b).unwrap().minutes_amount, 10);
    }

    #[test]
    fn remaining_counts_down_and_saturates() {
        let now = Instant::now();
        let cycle = Cycle {
            id: CycleId::now(),
            task: "t".into(),
            minutes_amount: 25,
            started_at: now,
        };

        assert_eq!(cycle.remaining(now), Duration::from_secs(25 * 60));
        let later = now + Duration::from_secs(60);
        assert_eq!(cycle.remaining(later), Duration::from_secs(24 * 60));
        let way_later = now + Duration::from_secs(26 * 60);
        assert_eq!(cycle.remaining(way_later), Duration::ZERO);
        assert!(cycle.is_finished(way_later));
        assert!(!cycle.is_finished(now));
    }
}
