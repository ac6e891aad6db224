//! The transition-resolution engine.
//!
//! A [`StateMachine`] is a frozen rule table plus global actions, an
//! optional error handler, and listeners. It owns no mutable state: the
//! caller threads the current state value between calls and owns the
//! context mutated by actions, so a built machine is freely shareable
//! across threads.
//!
//! Resolution of one fire call:
//! 1. a final state rejects every event, before anything runs
//! 2. an unknown state fails with "no configuration for state"
//! 3. among the state's rules for the event, in registration order, the
//!    first rule whose guard evaluates true is selected
//! 4. the selected rule's effects run (see the rule variants for ordering)
//! 5. auto-transitions chain from any newly entered state, with per-call
//!    cycle detection bounded by the number of declared states
//! 6. action failures go to the error handler if one is configured,
//!    otherwise they surface from the call
//! 7. listeners are notified exactly once with the definitive trace entry

use crate::core::{
    Action, ActionError, DebugInfo, ErrorHandler, Reason, StateDefinition, TransitionListener,
    TransitionResult, TransitionRule,
};
use crate::core::{Event, State};
use crate::engine::info::{StateMachineInfo, TransitionInfo};
use crate::validate::{validate, ValidationReport};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, trace};

/// Error surfaced from `fire`/`fire_with_result` when an action fails and
/// no error handler is configured. Ordinary resolution failures are never
/// errors; they come back as failed [`TransitionResult`]s.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("action failed while firing {event:?} in state {state}: {source}")]
    Action {
        state: String,
        event: Option<String>,
        #[source]
        source: ActionError,
    },
}

/// An immutable, shareable state machine over host-supplied identifiers
/// and a caller-owned context.
///
/// Built by [`crate::builder::StateMachineBuilder`]; the rule tables are
/// frozen from that point on.
pub struct StateMachine<S: State, E: Event, C> {
    pub(crate) initial: S,
    pub(crate) states: HashMap<S, StateDefinition<S, E, C>>,
    pub(crate) on_any_entry: Vec<Action<S, E, C>>,
    pub(crate) on_any_exit: Vec<Action<S, E, C>>,
    pub(crate) on_any_transition: Vec<Action<S, E, C>>,
    pub(crate) error_handler: Option<Box<dyn ErrorHandler<S, E, C>>>,
    pub(crate) listeners: Vec<Box<dyn TransitionListener<S, E>>>,
}

impl<S: State, E: Event, C> std::fmt::Debug for StateMachine<S, E, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StateMachine")
            .field("initial", &self.initial)
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<S: State, E: Event, C> StateMachine<S, E, C> {
    /// The declared initial state.
    pub fn initial(&self) -> &S {
        &self.initial
    }

    /// Fire an event against a current state, returning the resulting
    /// state. On any ordinary resolution failure the unchanged input state
    /// comes back in `Ok`; only an unhandled action failure is an `Err`.
    pub fn fire(&self, state: &S, event: &E, ctx: &mut C) -> Result<S, EngineError> {
        Ok(self.fire_with_result(state, event, ctx)?.state)
    }

    /// Fire an event and return the full outcome, including the reason
    /// code and the diagnostic trace entry.
    pub fn fire_with_result(
        &self,
        state: &S,
        event: &E,
        ctx: &mut C,
    ) -> Result<TransitionResult<S, E>, EngineError> {
        let outcome = match self.resolve(state, event, ctx) {
            Ok(result) => Ok(result),
            Err(error) => match &self.error_handler {
                Some(handler) => {
                    debug!(state = ?state, event = ?event, error = %error, "action failed, delegating to error handler");
                    Ok(handler.handle(state, Some(event), ctx, error))
                }
                None => Err(EngineError::Action {
                    state: format!("{state:?}"),
                    event: Some(format!("{event:?}")),
                    source: error,
                }),
            },
        };

        let info = match &outcome {
            Ok(result) => result.debug.clone().unwrap_or_else(|| {
                DebugInfo::new(result.state.clone(), Some(event.clone()), result.reason, None)
            }),
            Err(error) => DebugInfo::new(
                state.clone(),
                Some(event.clone()),
                Reason::ActionFailed,
                Some(error.to_string()),
            ),
        };
        for listener in &self.listeners {
            listener.on_fired(&info);
        }

        outcome
    }

    /// Dry run: true iff a rule would be selected for this (state, event)
    /// and the state is not final. Evaluates guards, runs no actions.
    pub fn can_fire(&self, state: &S, event: &E, ctx: &C) -> bool {
        let Some(def) = self.states.get(state) else {
            return false;
        };
        if def.is_final {
            return false;
        }
        def.rules.iter().any(|rule| rule.applies(event, ctx))
    }

    /// Whether the state is configured as final. False for states the
    /// machine does not know.
    pub fn is_final_state(&self, state: &S) -> bool {
        self.states.get(state).is_some_and(|def| def.is_final)
    }

    /// Build an introspection snapshot of the configured machine.
    pub fn info(&self) -> StateMachineInfo<S, E> {
        let mut states: HashSet<S> = self.states.keys().cloned().collect();
        states.insert(self.initial.clone());
        let mut events = HashSet::new();
        let mut final_states = HashSet::new();
        let mut transitions = Vec::new();

        for (state, def) in &self.states {
            if def.is_final {
                final_states.insert(state.clone());
            }
            for rule in &def.rules {
                if let Some(event) = rule.event() {
                    events.insert(event.clone());
                }
                if let Some(target) = rule.target() {
                    states.insert(target.clone());
                }
                let to = match rule {
                    TransitionRule::PermitReentry { .. } => Some(state.clone()),
                    _ => rule.target().cloned(),
                };
                transitions.push(TransitionInfo {
                    from: state.clone(),
                    to,
                    event: rule.event().cloned(),
                    kind: rule.kind(),
                    guarded: rule.is_guarded(),
                });
            }
        }

        StateMachineInfo {
            initial: self.initial.clone(),
            states,
            events,
            final_states,
            transitions,
        }
    }

    /// Run the static validator over this machine's rule graph.
    pub fn validate(&self) -> ValidationReport {
        validate(&self.info())
    }

    fn resolve(
        &self,
        state: &S,
        event: &E,
        ctx: &mut C,
    ) -> Result<TransitionResult<S, E>, ActionError> {
        let Some(def) = self.states.get(state) else {
            debug!(state = ?state, event = ?event, "no configuration for state");
            return Ok(Self::failed(state, event, Reason::NoConfigurationForState, None));
        };

        if def.is_final {
            debug!(state = ?state, event = ?event, "fire rejected, state is final");
            return Ok(Self::failed(
                state,
                event,
                Reason::FinalStateTransitionAttempt,
                None,
            ));
        }

        let Some(rule) = def.rules.iter().find(|rule| rule.applies(event, ctx)) else {
            debug!(state = ?state, event = ?event, "no transition configured");
            return Ok(Self::failed(
                state,
                event,
                Reason::NoTransitionConfigured,
                Some(format!(
                    "state {state:?} has no applicable rule for event {event:?}"
                )),
            ));
        };

        match rule {
            TransitionRule::Ignore { .. } => {
                trace!(state = ?state, event = ?event, "event ignored");
                Ok(Self::succeeded(state.clone(), event, Reason::Ignored, None))
            }
            TransitionRule::Internal { action, .. } => {
                action.apply(state, state, Some(event), ctx)?;
                Ok(Self::succeeded(
                    state.clone(),
                    event,
                    Reason::ActionApplied,
                    None,
                ))
            }
            TransitionRule::PermitReentry { .. } => {
                trace!(state = ?state, event = ?event, "reentry");
                self.run_exit_actions(state, state, Some(event), ctx)?;
                self.run_entry_actions(state, state, Some(event), ctx)?;
                self.chain_auto_transitions(state, state.clone(), event, Reason::Reentered, ctx)
            }
            TransitionRule::Permit { target, .. } => {
                let target = target.clone();
                trace!(from = ?state, to = ?target, event = ?event, "transition");
                self.run_exit_actions(state, &target, Some(event), ctx)?;
                self.run_transition_actions(state, &target, Some(event), ctx)?;
                self.run_entry_actions(state, &target, Some(event), ctx)?;
                self.chain_auto_transitions(state, target, event, Reason::Transitioned, ctx)
            }
            // Auto rules never match an external event, so selection cannot
            // land here; report the same failure as an absent rule.
            TransitionRule::Auto { .. } => Ok(Self::failed(
                state,
                event,
                Reason::NoTransitionConfigured,
                None,
            )),
        }
    }

    /// Follow auto-transitions from a newly entered state until no guard
    /// holds, a state has no definition, or a state repeats within this
    /// call. The visited set is scoped to the call, so the chain is bounded
    /// by the number of declared states.
    fn chain_auto_transitions(
        &self,
        origin: &S,
        landed: S,
        event: &E,
        base_reason: Reason,
        ctx: &mut C,
    ) -> Result<TransitionResult<S, E>, ActionError> {
        let mut visited: HashSet<S> = HashSet::new();
        visited.insert(landed.clone());
        let mut current = landed;
        let mut hopped = false;

        loop {
            let Some(def) = self.states.get(&current) else {
                break;
            };
            let next = def.rules.iter().find_map(|rule| match rule {
                TransitionRule::Auto { target, guard }
                    if guard.as_ref().is_none_or(|g| g.check(ctx)) =>
                {
                    Some(target.clone())
                }
                _ => None,
            });
            let Some(target) = next else {
                break;
            };

            if visited.contains(&target) {
                debug!(from = ?current, to = ?target, "auto-transition cycle detected");
                let detail = format!("auto-transition from {current:?} revisits {target:?}");
                return Ok(Self::failed(
                    origin,
                    event,
                    Reason::AutoTransitionCycle,
                    Some(detail),
                ));
            }

            trace!(from = ?current, to = ?target, "auto-transition");
            self.run_exit_actions(&current, &target, None, ctx)?;
            self.run_transition_actions(&current, &target, None, ctx)?;
            self.run_entry_actions(&current, &target, None, ctx)?;
            visited.insert(target.clone());
            current = target;
            hopped = true;
        }

        let reason = if hopped { Reason::Transitioned } else { base_reason };
        let detail = hopped.then(|| format!("settled in {current:?} after auto-transitions"));
        Ok(Self::succeeded(current, event, reason, detail))
    }

    /// State-specific exit actions, then global on-any-exit actions.
    fn run_exit_actions(
        &self,
        from: &S,
        to: &S,
        event: Option<&E>,
        ctx: &mut C,
    ) -> Result<(), ActionError> {
        if let Some(def) = self.states.get(from) {
            for action in &def.exit_actions {
                action.apply(from, to, event, ctx)?;
            }
        }
        for action in &self.on_any_exit {
            action.apply(from, to, event, ctx)?;
        }
        Ok(())
    }

    /// Global on-any-entry actions, then state-specific entry actions.
    fn run_entry_actions(
        &self,
        from: &S,
        to: &S,
        event: Option<&E>,
        ctx: &mut C,
    ) -> Result<(), ActionError> {
        for action in &self.on_any_entry {
            action.apply(from, to, event, ctx)?;
        }
        if let Some(def) = self.states.get(to) {
            for action in &def.entry_actions {
                action.apply(from, to, event, ctx)?;
            }
        }
        Ok(())
    }

    fn run_transition_actions(
        &self,
        from: &S,
        to: &S,
        event: Option<&E>,
        ctx: &mut C,
    ) -> Result<(), ActionError> {
        for action in &self.on_any_transition {
            action.apply(from, to, event, ctx)?;
        }
        Ok(())
    }

    fn failed(
        state: &S,
        event: &E,
        reason: Reason,
        detail: Option<String>,
    ) -> TransitionResult<S, E> {
        let debug = DebugInfo::new(state.clone(), Some(event.clone()), reason, detail);
        TransitionResult::failure(state.clone(), reason, Some(debug))
    }

    fn succeeded(
        state: S,
        event: &E,
        reason: Reason,
        detail: Option<String>,
    ) -> TransitionResult<S, E> {
        let debug = DebugInfo::new(state.clone(), Some(event.clone()), reason, detail);
        TransitionResult::success(state, reason, Some(debug))
    }
}
