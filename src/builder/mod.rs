//! Builder API for declaring transition tables and creating machines.
//!
//! Declare every planned transition once, then freeze the table into a
//! machine with an initial state.

pub mod error;
pub mod machine;
pub mod macros;
pub mod transition;

pub use error::{Argument, BuildError};
pub use machine::FsmBuilder;
pub use transition::{Transition, TransitionBuilder};

use crate::core::{Event, State};

/// Create a planned self-loop: `state` reacts to `event` by staying put.
///
/// # Example
///
/// ```
/// use fsmkit::builder::self_loop;
/// use fsmkit::{Event, State};
///
/// let running = State::new("Running");
/// let transition = self_loop(&running, &Event::new("Tick"));
///
/// assert!(transition.is_self_loop());
/// ```
pub fn self_loop(state: &State, event: &Event) -> Transition {
    Transition {
        from: state.clone(),
        event: event.clone(),
        to: state.clone(),
    }
}

impl FsmBuilder {
    /// Register already assembled transitions, stopping at the first error.
    pub fn extend<I>(&mut self, transitions: I) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item = Transition>,
    {
        for Transition { from, event, to } in transitions {
            self.add_transition(&from, &event, &to)?;
        }
        Ok(self)
    }
}
