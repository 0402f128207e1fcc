//! Event processing history.
//!
//! Provides immutable tracking of the events a machine processed and what
//! each one did to the current state.

use super::token::{Event, State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// What processing one event did to the machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The machine moved to a different state.
    Changed,
    /// A planned self-loop: the state stayed the same.
    Looped,
    /// No transition was planned for the event from the current state.
    Rejected,
}

/// Record of a single processed event.
///
/// # Example
///
/// ```rust
/// use fsmkit::{Event, EventRecord, Outcome, State};
/// use chrono::Utc;
///
/// let idle = State::new("Idle");
/// let running = State::new("Running");
///
/// let record = EventRecord {
///     from: idle,
///     event: Event::new("Start"),
///     to: Some(running),
///     outcome: Outcome::Changed,
///     timestamp: Utc::now(),
/// };
/// assert_eq!(record.outcome, Outcome::Changed);
/// ```
#[derive(Clone, Debug, Serialize)]
pub struct EventRecord {
    /// State of the machine when the event arrived
    pub from: State,
    /// The event that was processed
    pub event: Event,
    /// State after the event, `None` when the transition was rejected
    pub to: Option<State>,
    pub outcome: Outcome,
    /// When the event was processed
    pub timestamp: DateTime<Utc>,
}

/// Ordered history of processed events.
///
/// History is immutable - the `record` method returns a new history
/// with the record added.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EventHistory {
    records: Vec<EventRecord>,
}

impl EventHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a processed event, returning a new history.
    ///
    /// ```rust
    /// use fsmkit::{Event, EventHistory, EventRecord, Outcome, State};
    /// use chrono::Utc;
    ///
    /// let idle = State::new("Idle");
    /// let history = EventHistory::new();
    /// let record = EventRecord {
    ///     from: idle.clone(),
    ///     event: Event::new("Poke"),
    ///     to: None,
    ///     outcome: Outcome::Rejected,
    ///     timestamp: Utc::now(),
    /// };
    ///
    /// let new_history = history.record(record);
    /// assert_eq!(new_history.records().len(), 1);
    /// assert!(history.records().is_empty()); // Original unchanged
    /// ```
    pub fn record(&self, record: EventRecord) -> Self {
        let mut records = self.records.clone();
        records.push(record);
        Self { records }
    }

    /// In-place variant of [`record`](Self::record) for owners of the history.
    pub(crate) fn push(&mut self, record: EventRecord) {
        self.records.push(record);
    }

    /// States visited, starting with the state the first record left.
    ///
    /// Loops and rejections leave the state untouched and add nothing.
    pub fn path(&self) -> Vec<&State> {
        let mut path = Vec::new();
        if let Some(first) = self.records.first() {
            path.push(&first.from);
        }
        for record in &self.records {
            if record.outcome == Outcome::Changed {
                if let Some(to) = &record.to {
                    path.push(to);
                }
            }
        }
        path
    }

    /// Records of events that had no planned transition.
    pub fn rejections(&self) -> impl Iterator<Item = &EventRecord> {
        self.records
            .iter()
            .filter(|record| record.outcome == Outcome::Rejected)
    }

    /// Time between the first and the last record.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.records.first()?, self.records.last()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
