//! fsmkit: a small embeddable finite state machine engine
//!
//! Declare the planned transitions of your states and events once, then feed
//! events to the machine. It only ever moves along planned transitions, and
//! tells registered listeners what each event did.
//!
//! # Core Concepts
//!
//! - **State / Event**: identity tokens; two tokens with the same label are
//!   still different unless one is a clone of the other
//! - **Transition table**: at most one destination per (state, event) pair
//! - **Builder**: accumulates the table, then freezes it into a machine
//! - **Machine**: strict or lenient event processing under one lock
//! - **Listeners**: observers of state changes, self-loops and unplanned
//!   transitions
//!
//! # Example
//!
//! ```rust
//! use fsmkit::{Event, FsmBuilder, HistoryRecorder, State, TransitionRejected};
//! use std::sync::Arc;
//!
//! let idle = State::new("Idle");
//! let running = State::new("Running");
//! let done = State::new("Done");
//! let start = Event::new("Start");
//! let finish = Event::new("Finish");
//!
//! let mut builder = FsmBuilder::new();
//! builder
//!     .add_transition(&idle, &start, &running)?
//!     .add_transition(&running, &finish, &done)?;
//! let fsm = builder.create_fsm(&idle)?;
//!
//! let recorder = Arc::new(HistoryRecorder::new());
//! fsm.add_listener(recorder.clone());
//!
//! fsm.process_event(&start).unwrap();
//! assert_eq!(
//!     fsm.process_event(&start),
//!     Err(TransitionRejected { state: running.clone(), event: start.clone() })
//! );
//! fsm.process_event_ignoring_errors(&finish);
//!
//! assert_eq!(fsm.state(), done);
//! assert_eq!(recorder.snapshot().rejections().count(), 1);
//! # Ok::<(), fsmkit::BuildError>(())
//! ```

pub mod builder;
pub mod core;
pub mod machine;

// Re-export commonly used types
pub use builder::{BuildError, FsmBuilder, Transition, TransitionBuilder};
pub use crate::core::{Event, EventHistory, EventRecord, Outcome, State, TransitionTable};
pub use machine::{DispatchMode, Fsm, FsmListener, HistoryRecorder, TransitionRejected};
