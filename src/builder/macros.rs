//! Macros for ergonomic table declaration.

/// Register a block of transitions on an [`FsmBuilder`](crate::FsmBuilder).
///
/// Each rule reads `origin + event => destination`, naming `State` and
/// `Event` bindings in scope. Registration stops at the first failing rule,
/// whose error is returned; rules before it stay registered.
///
/// # Example
///
/// ```
/// use fsmkit::{transitions, Event, FsmBuilder, State};
///
/// let idle = State::new("Idle");
/// let running = State::new("Running");
/// let start = Event::new("Start");
/// let stop = Event::new("Stop");
///
/// let mut builder = FsmBuilder::new();
/// transitions!(builder, {
///     idle + start => running,
///     running + stop => idle,
/// })?;
///
/// assert_eq!(builder.table().len(), 2);
/// # Ok::<(), fsmkit::BuildError>(())
/// ```
#[macro_export]
macro_rules! transitions {
    ($builder:expr, { $($from:ident + $event:ident => $to:ident),* $(,)? }) => {{
        #[allow(unused_variables)]
        let builder: &mut $crate::FsmBuilder = &mut $builder;
        #[allow(unused_mut)]
        let mut result: ::std::result::Result<(), $crate::BuildError> = Ok(());
        $(
            if result.is_ok() {
                result = builder.add_transition(&$from, &$event, &$to).map(|_| ());
            }
        )*
        result
    }};
}
