//! Side-effecting actions and the callback contracts around a fire call.
//!
//! Actions are the only place the engine touches the caller-owned context
//! mutably. They receive the source state, the target state, the firing
//! event when one exists (auto-transition hops have none), and `&mut C`.

use crate::core::ids::{Event, State};
use crate::core::outcome::{DebugInfo, TransitionResult};

/// Error type surfaced by a failing action.
///
/// Hosts return whatever error type they already use; the engine routes it
/// to the configured [`ErrorHandler`] or propagates it from the fire call.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Type alias for the boxed callable behind an [`Action`].
pub type ActionFn<S, E, C> =
    Box<dyn Fn(&S, &S, Option<&E>, &mut C) -> Result<(), ActionError> + Send + Sync>;

/// A side effect executed while resolving a transition.
///
/// Actions may mutate the context and may fail. For entry/exit actions the
/// source and target state are the states being exited and entered; for
/// internal actions both are the current state.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Action, Event, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Light {
///     Red,
///     Green,
/// }
/// impl State for Light {}
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Tick {
///     Next,
/// }
/// impl Event for Tick {}
///
/// struct Stats {
///     switches: u32,
/// }
///
/// let count = Action::infallible(|_from: &Light, _to: &Light, _e: Option<&Tick>, ctx: &mut Stats| {
///     ctx.switches += 1;
/// });
///
/// let mut stats = Stats { switches: 0 };
/// count
///     .apply(&Light::Red, &Light::Green, Some(&Tick::Next), &mut stats)
///     .unwrap();
/// assert_eq!(stats.switches, 1);
/// ```
pub struct Action<S: State, E: Event, C> {
    run: ActionFn<S, E, C>,
}

impl<S: State, E: Event, C> Action<S, E, C> {
    /// Create an action from a fallible callable.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&S, &S, Option<&E>, &mut C) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Action { run: Box::new(run) }
    }

    /// Create an action from a callable that cannot fail.
    pub fn infallible<F>(run: F) -> Self
    where
        F: Fn(&S, &S, Option<&E>, &mut C) + Send + Sync + 'static,
    {
        Action {
            run: Box::new(move |from, to, event, ctx| {
                run(from, to, event, ctx);
                Ok(())
            }),
        }
    }

    /// Execute the action.
    pub fn apply(
        &self,
        from: &S,
        to: &S,
        event: Option<&E>,
        ctx: &mut C,
    ) -> Result<(), ActionError> {
        (self.run)(from, to, event, ctx)
    }
}

/// Observer notified exactly once per fire call with the definitive
/// [`DebugInfo`], after all actions for that call have completed, whether
/// the call succeeded or failed.
pub trait TransitionListener<S: State, E: Event>: Send + Sync {
    fn on_fired(&self, info: &DebugInfo<S, E>);
}

impl<S: State, E: Event, F> TransitionListener<S, E> for F
where
    F: Fn(&DebugInfo<S, E>) + Send + Sync,
{
    fn on_fired(&self, info: &DebugInfo<S, E>) {
        self(info)
    }
}

/// Recovery hook for action failures.
///
/// When an action fails during resolution the engine hands the original
/// state, the firing event (absent for auto-transition hops), the context,
/// and the error to the handler; the handler's returned outcome becomes the
/// result of the fire call. Without a handler the error propagates to the
/// caller and the state is reported unchanged.
pub trait ErrorHandler<S: State, E: Event, C>: Send + Sync {
    fn handle(
        &self,
        state: &S,
        event: Option<&E>,
        ctx: &mut C,
        error: ActionError,
    ) -> TransitionResult<S, E>;
}

impl<S: State, E: Event, C, F> ErrorHandler<S, E, C> for F
where
    F: Fn(&S, Option<&E>, &mut C, ActionError) -> TransitionResult<S, E> + Send + Sync,
{
    fn handle(
        &self,
        state: &S,
        event: Option<&E>,
        ctx: &mut C,
        error: ActionError,
    ) -> TransitionResult<S, E> {
        self(state, event, ctx, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::outcome::Reason;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        A,
        B,
    }
    impl State for TestState {}

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Go,
    }
    impl Event for TestEvent {}

    #[test]
    fn infallible_action_mutates_context() {
        let action = Action::infallible(|_: &TestState, _: &TestState, _, ctx: &mut Vec<u32>| {
            ctx.push(1);
        });

        let mut ctx = Vec::new();
        action
            .apply(&TestState::A, &TestState::B, Some(&TestEvent::Go), &mut ctx)
            .unwrap();
        assert_eq!(ctx, vec![1]);
    }

    #[test]
    fn fallible_action_reports_error() {
        let action: Action<TestState, TestEvent, ()> =
            Action::new(|_, _, _, _| Err("payment declined".into()));

        let err = action
            .apply(&TestState::A, &TestState::B, None, &mut ())
            .unwrap_err();
        assert_eq!(err.to_string(), "payment declined");
    }

    #[test]
    fn action_sees_absent_event_on_auto_hops() {
        let action = Action::infallible(
            |_: &TestState, _: &TestState, event: Option<&TestEvent>, seen: &mut Vec<bool>| {
                seen.push(event.is_some());
            },
        );

        let mut seen = Vec::new();
        action
            .apply(&TestState::A, &TestState::B, Some(&TestEvent::Go), &mut seen)
            .unwrap();
        action
            .apply(&TestState::A, &TestState::B, None, &mut seen)
            .unwrap();
        assert_eq!(seen, vec![true, false]);
    }

    #[test]
    fn closures_implement_error_handler() {
        let handler = |state: &TestState, _: Option<&TestEvent>, _: &mut (), _: ActionError| {
            TransitionResult::failure(state.clone(), Reason::RecoveredByHandler, None)
        };

        let result = handler.handle(&TestState::A, None, &mut (), "boom".into());
        assert_eq!(result.reason, Reason::RecoveredByHandler);
        assert_eq!(result.state, TestState::A);
    }
}
