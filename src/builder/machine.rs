//! Builder for constructing state machines.

use crate::builder::error::{Argument, BuildError};
use crate::builder::transition::{Transition, TransitionBuilder};
use crate::core::{Event, State, TransitionTable};
use crate::machine::{DispatchMode, Fsm, FsmListener};
use std::sync::Arc;

/// Builder accumulating a transition table, then freezing it into a machine.
///
/// The builder is consumed by [`build`](Self::build) and
/// [`create_fsm`](Self::create_fsm), so the table can no longer change once
/// a machine exists.
///
/// # Example
///
/// ```rust
/// use fsmkit::{Event, FsmBuilder, State};
///
/// let idle = State::new("Idle");
/// let running = State::new("Running");
/// let start = Event::new("Start");
///
/// let mut builder = FsmBuilder::new();
/// builder.add_transition(&idle, &start, &running)?;
/// let fsm = builder.create_fsm(&idle)?;
///
/// fsm.process_event(&start).unwrap();
/// assert_eq!(fsm.state(), running);
/// # Ok::<(), fsmkit::BuildError>(())
/// ```
#[derive(Default)]
pub struct FsmBuilder {
    table: TransitionTable,
    initial: Option<State>,
    mode: DispatchMode,
    listeners: Vec<Arc<dyn FsmListener>>,
}

impl FsmBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `from --event--> to`.
    ///
    /// Fails with [`BuildError::DuplicateTransition`] when `from` already
    /// reacts to `event`; the table is left unchanged.
    pub fn add_transition(
        &mut self,
        from: &State,
        event: &Event,
        to: &State,
    ) -> Result<&mut Self, BuildError> {
        self.table.insert(from, event, to)?;
        Ok(self)
    }

    /// Register a transition whose parts may be absent.
    ///
    /// Fails with [`BuildError::InvalidArgument`] naming the first missing
    /// part, checked in origin, event, destination order.
    pub fn try_add_transition(
        &mut self,
        from: Option<&State>,
        event: Option<&Event>,
        to: Option<&State>,
    ) -> Result<&mut Self, BuildError> {
        let from = from.ok_or_else(|| BuildError::missing(Argument::Origin))?;
        let event = event.ok_or_else(|| BuildError::missing(Argument::Event))?;
        let to = to.ok_or_else(|| BuildError::missing(Argument::Destination))?;
        self.add_transition(from, event, to)
    }

    /// Register a transition assembled with a [`TransitionBuilder`].
    pub fn transition(&mut self, builder: TransitionBuilder) -> Result<&mut Self, BuildError> {
        let Transition { from, event, to } = builder.build()?;
        self.add_transition(&from, &event, &to)
    }

    /// Set the initial state (required).
    pub fn initial(&mut self, state: &State) -> &mut Self {
        self.initial = Some(state.clone());
        self
    }

    /// Choose how [`Fsm::dispatch`] treats unplanned events.
    pub fn dispatch_mode(&mut self, mode: DispatchMode) -> &mut Self {
        self.mode = mode;
        self
    }

    /// Register a listener on the machine before it processes anything.
    pub fn listener(&mut self, listener: Arc<dyn FsmListener>) -> &mut Self {
        self.listeners.push(listener);
        self
    }

    /// Transitions registered so far.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Build the state machine.
    ///
    /// Fails with [`BuildError::InvalidArgument`] when no initial state
    /// was set.
    pub fn build(self) -> Result<Fsm, BuildError> {
        let initial = self
            .initial
            .ok_or_else(|| BuildError::missing(Argument::InitialState))?;

        let fsm = Fsm::new(self.table, initial, self.mode);
        for listener in self.listeners {
            fsm.add_listener(listener);
        }

        Ok(fsm)
    }

    /// Build the state machine starting in `initial`.
    pub fn create_fsm(mut self, initial: &State) -> Result<Fsm, BuildError> {
        self.initial(initial);
        self.build()
    }
}
