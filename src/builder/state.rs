//! Per-state configuration sub-builder.

use crate::core::{
    Action, AutoGuard, Event, Guard, State, StateDefinition, TransitionRule,
};

/// Mutable configuration for one state, assembled fluently and handed to
/// [`crate::builder::StateMachineBuilder::state`].
///
/// Rule registration order is preserved into the frozen machine and decides
/// resolution priority: for one event, the first rule whose guard holds wins.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::StateConfig;
/// use statecraft::core::{Event, Guard, State};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Doc {
///     Submitted,
///     Screening,
///     FinalReview,
/// }
/// impl State for Doc {}
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum Review {
///     Proceed,
/// }
/// impl Event for Review {}
///
/// struct Ctx {
///     score: f64,
/// }
///
/// let submitted = StateConfig::new(Doc::Submitted)
///     .permit_if(
///         Review::Proceed,
///         Doc::FinalReview,
///         Guard::new(|_, ctx: &Ctx| ctx.score > 9.0),
///     )
///     .permit(Review::Proceed, Doc::Screening);
/// ```
pub struct StateConfig<S: State, E: Event, C> {
    state: S,
    rules: Vec<TransitionRule<S, E, C>>,
    entry_actions: Vec<Action<S, E, C>>,
    exit_actions: Vec<Action<S, E, C>>,
    is_final: bool,
}

impl<S: State, E: Event, C> StateConfig<S, E, C> {
    pub fn new(state: S) -> Self {
        StateConfig {
            state,
            rules: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            is_final: false,
        }
    }

    /// Unconditional transition to a target state.
    pub fn permit(mut self, event: E, target: S) -> Self {
        self.rules.push(TransitionRule::Permit {
            event,
            target,
            guard: None,
        });
        self
    }

    /// Guarded transition to a target state.
    pub fn permit_if(mut self, event: E, target: S, guard: Guard<E, C>) -> Self {
        self.rules.push(TransitionRule::Permit {
            event,
            target,
            guard: Some(guard),
        });
        self
    }

    /// Unconditional self-transition: exit and entry actions run, state
    /// identity does not change.
    pub fn permit_reentry(mut self, event: E) -> Self {
        self.rules
            .push(TransitionRule::PermitReentry { event, guard: None });
        self
    }

    /// Guarded self-transition.
    pub fn permit_reentry_if(mut self, event: E, guard: Guard<E, C>) -> Self {
        self.rules.push(TransitionRule::PermitReentry {
            event,
            guard: Some(guard),
        });
        self
    }

    /// Accept the event without any state change or actions.
    pub fn ignore(mut self, event: E) -> Self {
        self.rules.push(TransitionRule::Ignore { event, guard: None });
        self
    }

    /// Guarded ignore.
    pub fn ignore_if(mut self, event: E, guard: Guard<E, C>) -> Self {
        self.rules.push(TransitionRule::Ignore {
            event,
            guard: Some(guard),
        });
        self
    }

    /// Run one action on the event with no state change and no entry/exit
    /// actions.
    pub fn internal(mut self, event: E, action: Action<S, E, C>) -> Self {
        self.rules.push(TransitionRule::Internal {
            event,
            action,
            guard: None,
        });
        self
    }

    /// Guarded internal action.
    pub fn internal_if(mut self, event: E, action: Action<S, E, C>, guard: Guard<E, C>) -> Self {
        self.rules.push(TransitionRule::Internal {
            event,
            action,
            guard: Some(guard),
        });
        self
    }

    /// Unconditional auto-transition attempted immediately after this state
    /// is entered.
    pub fn auto(mut self, target: S) -> Self {
        self.rules.push(TransitionRule::Auto {
            target,
            guard: None,
        });
        self
    }

    /// Guarded auto-transition.
    pub fn auto_if(mut self, target: S, guard: AutoGuard<C>) -> Self {
        self.rules.push(TransitionRule::Auto {
            target,
            guard: Some(guard),
        });
        self
    }

    /// Action run when this state is entered, after the global on-any-entry
    /// actions.
    pub fn on_entry(mut self, action: Action<S, E, C>) -> Self {
        self.entry_actions.push(action);
        self
    }

    /// Action run when this state is exited, before the global on-any-exit
    /// actions.
    pub fn on_exit(mut self, action: Action<S, E, C>) -> Self {
        self.exit_actions.push(action);
        self
    }

    /// Mark the state final: every fire against it fails by design.
    /// Outgoing rules are still accepted here; the validator reports them
    /// as dead.
    pub fn final_state(mut self) -> Self {
        self.is_final = true;
        self
    }

    pub(crate) fn into_parts(self) -> (S, StateDefinition<S, E, C>) {
        (
            self.state,
            StateDefinition {
                rules: self.rules,
                entry_actions: self.entry_actions,
                exit_actions: self.exit_actions,
                is_final: self.is_final,
            },
        )
    }
}
