//! Runtime machine driven by a frozen transition table.

use crate::core::{Event, State, TransitionTable};
use crate::machine::error::TransitionRejected;
use crate::machine::listener::{FsmListener, ListenerRegistry};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace};

/// How [`Fsm::dispatch`] reports events with no planned transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DispatchMode {
    /// Report the rejection to the caller.
    #[default]
    Strict,
    /// Swallow the rejection once listeners were notified.
    Lenient,
}

/// A finite state machine.
///
/// Created by [`FsmBuilder`](crate::FsmBuilder). The table is frozen once the
/// machine exists; only the current state and the listener set change.
///
/// The machine is `Send + Sync`; share it with `Arc<Fsm>`. Event processing
/// is serialized per machine: one event is looked up, committed and fully
/// notified before the next one starts, so listeners see changes in commit
/// order. The current state itself is only locked for the lookup and write,
/// so hooks may call [`state`](Self::state) and
/// [`has_transition`](Self::has_transition). A listener must not process
/// events on the same machine from inside a hook: that deadlocks.
pub struct Fsm {
    table: TransitionTable,
    dispatching: Mutex<()>,
    current: Mutex<State>,
    listeners: ListenerRegistry,
    mode: DispatchMode,
}

impl Fsm {
    pub(crate) fn new(table: TransitionTable, initial: State, mode: DispatchMode) -> Self {
        debug!(
            initial = %initial,
            transitions = table.len(),
            mode = ?mode,
            "State machine created"
        );

        Self {
            table,
            dispatching: Mutex::new(()),
            current: Mutex::new(initial),
            listeners: ListenerRegistry::default(),
            mode,
        }
    }

    /// Feed `event` to the machine, reporting unplanned events.
    ///
    /// On a planned transition the state is updated and listeners are told
    /// about the change or self-loop. Otherwise the state is untouched,
    /// listeners are told about the unplanned transition, and the rejection
    /// is returned.
    pub fn process_event(&self, event: &Event) -> Result<(), TransitionRejected> {
        let _turn = self.dispatching.lock();

        // The state lock is released before any hook runs.
        let (from, to) = {
            let mut current = self.current.lock();
            match self.table.destination(&current, event).cloned() {
                Some(to) => (std::mem::replace(&mut *current, to.clone()), Some(to)),
                None => (current.clone(), None),
            }
        };

        match to {
            None => {
                debug!(state = %from, event = %event, "Unplanned transition");
                self.listeners.notify_unplanned(&from, event);
                Err(TransitionRejected {
                    state: from,
                    event: event.clone(),
                })
            }
            Some(to) if to != from => {
                debug!(from = %from, event = %event, to = %to, "State changed");
                self.listeners.notify_changed(&from, event, &to);
                Ok(())
            }
            Some(to) => {
                debug!(state = %to, event = %event, "State loop");
                self.listeners.notify_loop(&to, event);
                Ok(())
            }
        }
    }

    /// Feed `event` to the machine, ignoring unplanned events.
    ///
    /// Listeners are notified exactly as with
    /// [`process_event`](Self::process_event); only the caller is spared the
    /// rejection. Handy when scanning a stream of events for the few that
    /// matter.
    pub fn process_event_ignoring_errors(&self, event: &Event) {
        if let Err(rejected) = self.process_event(event) {
            trace!(
                state = %rejected.state,
                event = %rejected.event,
                "Ignored unplanned transition"
            );
        }
    }

    /// Feed `event` using the machine's configured [`DispatchMode`].
    ///
    /// Lenient machines always return `Ok(())`.
    pub fn dispatch(&self, event: &Event) -> Result<(), TransitionRejected> {
        match self.mode {
            DispatchMode::Strict => self.process_event(event),
            DispatchMode::Lenient => {
                self.process_event_ignoring_errors(event);
                Ok(())
            }
        }
    }

    /// Whether the current state has a transition reacting to `event`.
    ///
    /// Neither changes the state nor notifies listeners.
    ///
    /// Meant for UI affordances only, such as greying out a button whose
    /// action would have no effect; refresh it from
    /// [`FsmListener::state_changed`]. Never use it to decide whether to send
    /// an event: actions must always send their event and let the table
    /// decide.
    pub fn has_transition(&self, event: &Event) -> bool {
        self.table.contains(&self.current.lock(), event)
    }

    /// The current state.
    pub fn state(&self) -> State {
        self.current.lock().clone()
    }

    /// The frozen transition table.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Mode applied by [`dispatch`](Self::dispatch).
    pub fn dispatch_mode(&self) -> DispatchMode {
        self.mode
    }

    /// Register a listener. Registering the same listener twice makes it
    /// receive every notification twice.
    pub fn add_listener(&self, listener: Arc<dyn FsmListener>) {
        self.listeners.add(listener);
    }

    /// Remove the first registration of this exact listener (same `Arc`
    /// allocation). Returns whether one was found.
    pub fn remove_listener(&self, listener: &Arc<dyn FsmListener>) -> bool {
        self.listeners.remove(listener)
    }

    /// Number of registrations, duplicates included.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for Fsm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fsm")
            .field("state", &self.state())
            .field("transitions", &self.table.len())
            .field("listeners", &self.listener_count())
            .field("mode", &self.mode)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EventHistory, Outcome};
    use crate::machine::listener::HistoryRecorder;

    struct Lamp {
        off: State,
        on: State,
        toggle: Event,
        tick: Event,
        smash: Event,
    }

    fn lamp(mode: DispatchMode) -> (Fsm, Lamp) {
        let l = Lamp {
            off: State::new("Off"),
            on: State::new("On"),
            toggle: Event::new("Toggle"),
            tick: Event::new("Tick"),
            smash: Event::new("Smash"),
        };
        let mut table = TransitionTable::new();
        table.insert(&l.off, &l.toggle, &l.on).unwrap();
        table.insert(&l.on, &l.toggle, &l.off).unwrap();
        table.insert(&l.on, &l.tick, &l.on).unwrap();
        (Fsm::new(table, l.off.clone(), mode), l)
    }

    fn recorded(fsm: &Fsm) -> Arc<HistoryRecorder> {
        let recorder = Arc::new(HistoryRecorder::new());
        fsm.add_listener(recorder.clone());
        recorder
    }

    fn outcomes(history: &EventHistory) -> Vec<Outcome> {
        history.records().iter().map(|r| r.outcome).collect()
    }

    #[test]
    fn planned_event_changes_state() {
        let (fsm, l) = lamp(DispatchMode::Strict);

        assert_eq!(fsm.process_event(&l.toggle), Ok(()));
        assert_eq!(fsm.state(), l.on);
    }

    #[test]
    fn unplanned_event_is_rejected_in_strict_mode() {
        let (fsm, l) = lamp(DispatchMode::Strict);
        let recorder = recorded(&fsm);

        let result = fsm.process_event(&l.smash);

        assert_eq!(
            result,
            Err(TransitionRejected {
                state: l.off.clone(),
                event: l.smash.clone(),
            })
        );
        assert_eq!(fsm.state(), l.off);
        assert_eq!(outcomes(&recorder.snapshot()), vec![Outcome::Rejected]);
    }

    #[test]
    fn state_without_outgoing_transitions_rejects_everything() {
        let (fsm, l) = lamp(DispatchMode::Strict);

        // Off only reacts to Toggle; Tick is planned from On only.
        assert!(fsm.process_event(&l.tick).is_err());
        assert_eq!(fsm.state(), l.off);
    }

    #[test]
    fn ignoring_errors_still_notifies() {
        let (fsm, l) = lamp(DispatchMode::Strict);
        let recorder = recorded(&fsm);

        fsm.process_event_ignoring_errors(&l.smash);
        fsm.process_event_ignoring_errors(&l.toggle);

        assert_eq!(fsm.state(), l.on);
        assert_eq!(
            outcomes(&recorder.snapshot()),
            vec![Outcome::Rejected, Outcome::Changed]
        );
    }

    #[test]
    fn self_loop_keeps_state() {
        let (fsm, l) = lamp(DispatchMode::Strict);
        let recorder = recorded(&fsm);
        fsm.process_event(&l.toggle).unwrap();

        fsm.process_event(&l.tick).unwrap();

        assert_eq!(fsm.state(), l.on);
        assert_eq!(
            outcomes(&recorder.snapshot()),
            vec![Outcome::Changed, Outcome::Looped]
        );
    }

    #[test]
    fn dispatch_follows_configured_mode() {
        let (strict, l) = lamp(DispatchMode::Strict);
        assert!(strict.dispatch(&l.smash).is_err());

        let (lenient, l) = lamp(DispatchMode::Lenient);
        let recorder = recorded(&lenient);
        assert_eq!(lenient.dispatch(&l.smash), Ok(()));
        assert_eq!(lenient.dispatch(&l.toggle), Ok(()));
        assert_eq!(lenient.state(), l.on);
        assert_eq!(recorder.snapshot().rejections().count(), 1);
        assert_eq!(lenient.dispatch_mode(), DispatchMode::Lenient);
    }

    #[test]
    fn has_transition_has_no_side_effects() {
        let (fsm, l) = lamp(DispatchMode::Strict);
        let recorder = recorded(&fsm);

        assert!(fsm.has_transition(&l.toggle));
        assert!(!fsm.has_transition(&l.tick));
        assert!(!fsm.has_transition(&l.smash));

        assert_eq!(fsm.state(), l.off);
        assert!(recorder.snapshot().is_empty());
    }

    #[test]
    fn removed_listener_stops_receiving() {
        let (fsm, l) = lamp(DispatchMode::Strict);
        let recorder = Arc::new(HistoryRecorder::new());
        let handle: Arc<dyn FsmListener> = recorder.clone();
        fsm.add_listener(handle.clone());

        fsm.process_event(&l.toggle).unwrap();
        assert!(fsm.remove_listener(&handle));
        fsm.process_event(&l.toggle).unwrap();

        assert_eq!(recorder.snapshot().len(), 1);
        assert_eq!(fsm.listener_count(), 0);
    }

    #[test]
    fn debug_shows_current_state() {
        let (fsm, _) = lamp(DispatchMode::Lenient);
        let rendered = format!("{fsm:?}");
        assert!(rendered.contains("Off"));
        assert!(rendered.contains("Lenient"));
    }
}
