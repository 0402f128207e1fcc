//! Observation hooks fired after each processed event.

use crate::core::{Event, EventHistory, EventRecord, Outcome, State};
use chrono::Utc;
use parking_lot::Mutex;
use std::sync::Arc;

/// Callbacks fired whenever the machine processes an event.
///
/// Every processed event ends in exactly one of three cases, each with its
/// own hook: a state change, a planned self-loop, or an unplanned
/// transition. [`event_occurred`](Self::event_occurred) fires first in all
/// three cases, so a listener overriding it alongside a specific hook sees
/// the same event twice.
///
/// All hooks default to doing nothing; override the ones you need.
///
/// Hooks run synchronously on the dispatching thread, after the state change
/// is committed and before the next event is processed. A hook may read the
/// machine ([`Fsm::state`](crate::Fsm::state),
/// [`Fsm::has_transition`](crate::Fsm::has_transition)) and change its
/// listeners. Processing an event on the same machine from inside a hook
/// deadlocks and must not be done.
///
/// # Example
///
/// ```rust
/// use fsmkit::{Event, FsmListener, State};
///
/// struct PrintChanges;
///
/// impl FsmListener for PrintChanges {
///     fn state_changed(&self, from: &State, event: &Event, to: &State) {
///         println!("{from} --{event}--> {to}");
///     }
/// }
/// ```
pub trait FsmListener: Send + Sync {
    /// Called for every processed event, before the specific hook.
    ///
    /// `to` is the new state on a change, equal to `from` on a self-loop,
    /// and `None` when no transition was planned.
    fn event_occurred(&self, _from: &State, _event: &Event, _to: Option<&State>) {}

    /// Called when the event moved the machine to a different state.
    fn state_changed(&self, _from: &State, _event: &Event, _to: &State) {}

    /// Called when the event triggered a planned self-loop.
    fn state_loop(&self, _state: &State, _event: &Event) {}

    /// Called when no transition from the current state reacts to the event.
    fn unplanned_transition(&self, _from: &State, _event: &Event) {}
}

/// Ordered collection of listeners owned by one machine.
///
/// Registration order is notification order. The same listener may be
/// registered more than once and is then notified once per registration.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: Mutex<Vec<Arc<dyn FsmListener>>>,
}

impl ListenerRegistry {
    pub(crate) fn add(&self, listener: Arc<dyn FsmListener>) {
        self.listeners.lock().push(listener);
    }

    /// Remove the first registration of this exact listener.
    pub(crate) fn remove(&self, listener: &Arc<dyn FsmListener>) -> bool {
        let mut listeners = self.listeners.lock();
        match listeners.iter().position(|l| Arc::ptr_eq(l, listener)) {
            Some(index) => {
                listeners.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.listeners.lock().len()
    }

    /// Listeners registered right now. Notifying from a snapshot lets hooks
    /// change the registry; changes take effect from the next event.
    fn snapshot(&self) -> Vec<Arc<dyn FsmListener>> {
        self.listeners.lock().clone()
    }

    pub(crate) fn notify_changed(&self, from: &State, event: &Event, to: &State) {
        for listener in self.snapshot() {
            listener.event_occurred(from, event, Some(to));
            listener.state_changed(from, event, to);
        }
    }

    pub(crate) fn notify_loop(&self, state: &State, event: &Event) {
        for listener in self.snapshot() {
            listener.event_occurred(state, event, Some(state));
            listener.state_loop(state, event);
        }
    }

    pub(crate) fn notify_unplanned(&self, from: &State, event: &Event) {
        for listener in self.snapshot() {
            listener.event_occurred(from, event, None);
            listener.unplanned_transition(from, event);
        }
    }
}

/// Listener that keeps an [`EventHistory`] of everything the machine did.
///
/// # Example
///
/// ```rust
/// use fsmkit::{Event, FsmBuilder, HistoryRecorder, State};
/// use std::sync::Arc;
///
/// let off = State::new("Off");
/// let on = State::new("On");
/// let toggle = Event::new("Toggle");
///
/// let mut builder = FsmBuilder::new();
/// builder.add_transition(&off, &toggle, &on).unwrap();
/// builder.add_transition(&on, &toggle, &off).unwrap();
/// let fsm = builder.create_fsm(&off).unwrap();
///
/// let recorder = Arc::new(HistoryRecorder::new());
/// fsm.add_listener(recorder.clone());
///
/// fsm.process_event(&toggle).unwrap();
/// fsm.process_event(&toggle).unwrap();
///
/// assert_eq!(recorder.snapshot().path(), vec![&off, &on, &off]);
/// ```
#[derive(Default)]
pub struct HistoryRecorder {
    history: Mutex<EventHistory>,
}

impl HistoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the history recorded so far.
    pub fn snapshot(&self) -> EventHistory {
        self.history.lock().clone()
    }

    /// History recorded so far, as JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&*self.history.lock())
    }

    fn push(&self, from: &State, event: &Event, to: Option<&State>, outcome: Outcome) {
        self.history.lock().push(EventRecord {
            from: from.clone(),
            event: event.clone(),
            to: to.cloned(),
            outcome,
            timestamp: Utc::now(),
        });
    }
}

impl FsmListener for HistoryRecorder {
    fn state_changed(&self, from: &State, event: &Event, to: &State) {
        self.push(from, event, Some(to), Outcome::Changed);
    }

    fn state_loop(&self, state: &State, event: &Event) {
        self.push(state, event, Some(state), Outcome::Looped);
    }

    fn unplanned_transition(&self, from: &State, event: &Event) {
        self.push(from, event, None, Outcome::Rejected);
    }
}
