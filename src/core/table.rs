//! Transition table mapping (origin state, event) to a destination state.

use super::token::{Event, State};
use crate::builder::BuildError;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Outgoing transitions of every origin state.
///
/// Each origin keeps its transitions in registration order. A state with no
/// outgoing transition never appears as a key, and lookups against it simply
/// find nothing.
///
/// # Example
///
/// ```rust
/// use fsmkit::{Event, State, TransitionTable};
///
/// let idle = State::new("Idle");
/// let running = State::new("Running");
/// let start = Event::new("Start");
///
/// let mut table = TransitionTable::new();
/// table.insert(&idle, &start, &running).unwrap();
///
/// assert_eq!(table.destination(&idle, &start), Some(&running));
/// assert!(table.insert(&idle, &start, &idle).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionTable {
    outgoing: HashMap<State, Vec<(Event, State)>>,
    len: usize,
}

impl TransitionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `from --event--> to`.
    ///
    /// Fails with [`BuildError::DuplicateTransition`] when `from` already
    /// reacts to `event`, whatever the destination. The table is left
    /// unchanged on failure.
    pub fn insert(&mut self, from: &State, event: &Event, to: &State) -> Result<(), BuildError> {
        let transitions = self.outgoing.entry(from.clone()).or_default();

        if transitions.iter().any(|(existing, _)| existing == event) {
            warn!(
                from = %from,
                event = %event,
                "Rejected duplicate transition registration"
            );
            return Err(BuildError::DuplicateTransition {
                from: from.clone(),
                event: event.clone(),
            });
        }

        transitions.push((event.clone(), to.clone()));
        self.len += 1;

        debug!(from = %from, event = %event, to = %to, "Transition registered");
        Ok(())
    }

    /// Destination reached from `from` on `event`, if planned.
    pub fn destination(&self, from: &State, event: &Event) -> Option<&State> {
        self.outgoing
            .get(from)?
            .iter()
            .find(|(candidate, _)| candidate == event)
            .map(|(_, to)| to)
    }

    /// Whether `from` reacts to `event`.
    pub fn contains(&self, from: &State, event: &Event) -> bool {
        self.destination(from, event).is_some()
    }

    /// Transitions leaving `from`, in registration order.
    pub fn outgoing(&self, from: &State) -> impl Iterator<Item = (&Event, &State)> {
        self.outgoing
            .get(from)
            .into_iter()
            .flatten()
            .map(|(event, to)| (event, to))
    }

    /// Origin states that have at least one outgoing transition.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.outgoing
            .iter()
            .filter(|(_, transitions)| !transitions.is_empty())
            .map(|(state, _)| state)
    }

    /// Total number of registered transitions.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
