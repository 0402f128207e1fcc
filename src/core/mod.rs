//! Core state machine types.
//!
//! This module contains the data side of the engine:
//! - Identity tokens for states and events
//! - The transition table
//! - Immutable event history

mod history;
mod table;
mod token;

pub use history::{EventHistory, EventRecord, Outcome};
pub use table::TransitionTable;
pub use token::{Event, State};
