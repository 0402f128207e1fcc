//! Builder for constructing transitions.

use crate::builder::error::{Argument, BuildError};
use crate::core::{Event, State};

/// A planned move from one state to another on an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: State,
    pub event: Event,
    pub to: State,
}

impl Transition {
    /// Whether the transition leaves the machine where it was.
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Builder for constructing transitions with a fluent API.
///
/// # Example
///
/// ```rust
/// use fsmkit::{Event, State, TransitionBuilder};
///
/// let idle = State::new("Idle");
/// let running = State::new("Running");
/// let start = Event::new("Start");
///
/// let transition = TransitionBuilder::new()
///     .from(&idle)
///     .on(&start)
///     .to(&running)
///     .build()
///     .unwrap();
/// assert!(!transition.is_self_loop());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TransitionBuilder {
    from: Option<State>,
    event: Option<Event>,
    to: Option<State>,
}

impl TransitionBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the origin state (required).
    pub fn from(mut self, state: &State) -> Self {
        self.from = Some(state.clone());
        self
    }

    /// Set the triggering event (required).
    pub fn on(mut self, event: &Event) -> Self {
        self.event = Some(event.clone());
        self
    }

    /// Set the destination state (required).
    pub fn to(mut self, state: &State) -> Self {
        self.to = Some(state.clone());
        self
    }

    /// Build the transition.
    ///
    /// Parts are checked in origin, event, destination order; the first
    /// missing one is reported.
    pub fn build(self) -> Result<Transition, BuildError> {
        let from = self.from.ok_or_else(|| BuildError::missing(Argument::Origin))?;
        let event = self.event.ok_or_else(|| BuildError::missing(Argument::Event))?;
        let to = self.to.ok_or_else(|| BuildError::missing(Argument::Destination))?;

        Ok(Transition { from, event, to })
    }
}
