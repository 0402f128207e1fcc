//! Runtime side of the engine.
//!
//! # Key Concepts
//!
//! - **Machine**: holds the frozen table and the current state
//! - **Dispatch modes**: strict processing reports unplanned events, lenient
//!   processing swallows them after notifying listeners
//! - **Listeners**: synchronous observers notified in registration order

mod error;
mod fsm;
mod listener;

pub use error::TransitionRejected;
pub use fsm::{DispatchMode, Fsm};
pub use listener::{FsmListener, HistoryRecorder};
