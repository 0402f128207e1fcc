//! Runtime dispatch errors.

use crate::core::{Event, State};
use thiserror::Error;

/// An event arrived with no planned transition from the current state.
///
/// The machine's state is untouched when this is reported.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("There is no transition from state '{state}' reacting to event '{event}'")]
pub struct TransitionRejected {
    /// State of the machine when the event arrived (and after it).
    pub state: State,
    /// The event that had no transition.
    pub event: Event,
}
