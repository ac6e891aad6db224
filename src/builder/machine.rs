//! Top-level machine builder.

use crate::builder::error::BuildError;
use crate::builder::state::StateConfig;
use crate::core::{Action, ErrorHandler, Event, State, StateDefinition, TransitionListener};
use crate::engine::StateMachine;
use std::collections::HashMap;

/// Mutable configuration for a whole machine, frozen into an immutable
/// [`StateMachine`] by [`build`](StateMachineBuilder::build).
///
/// States referenced only as transition targets need not be configured;
/// they receive an empty definition when the configuration is frozen, which
/// permits forward references.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{StateConfig, StateMachineBuilder};
/// use statecraft::core::{Event, State};
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
/// let machine = StateMachineBuilder::<Light, Tick, ()>::new()
///     .initial(Light::Red)
///     .state(StateConfig::new(Light::Red).permit(Tick::Next, Light::Green))
///     .state(StateConfig::new(Light::Green).permit(Tick::Next, Light::Red))
///     .build()
///     .unwrap();
///
/// let mut ctx = ();
/// let next = machine.fire(&Light::Red, &Tick::Next, &mut ctx).unwrap();
/// assert_eq!(next, Light::Green);
/// ```
pub struct StateMachineBuilder<S: State, E: Event, C> {
    initial: Option<S>,
    states: Vec<StateConfig<S, E, C>>,
    on_any_entry: Vec<Action<S, E, C>>,
    on_any_exit: Vec<Action<S, E, C>>,
    on_any_transition: Vec<Action<S, E, C>>,
    error_handler: Option<Box<dyn ErrorHandler<S, E, C>>>,
    listeners: Vec<Box<dyn TransitionListener<S, E>>>,
}

impl<S: State, E: Event, C> StateMachineBuilder<S, E, C> {
    pub fn new() -> Self {
        StateMachineBuilder {
            initial: None,
            states: Vec::new(),
            on_any_entry: Vec::new(),
            on_any_exit: Vec::new(),
            on_any_transition: Vec::new(),
            error_handler: None,
            listeners: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Add a configured state.
    pub fn state(mut self, config: StateConfig<S, E, C>) -> Self {
        self.states.push(config);
        self
    }

    /// Action run whenever any state is entered, before the entered
    /// state's own entry actions.
    pub fn on_any_entry(mut self, action: Action<S, E, C>) -> Self {
        self.on_any_entry.push(action);
        self
    }

    /// Action run whenever any state is exited, after the exited state's
    /// own exit actions.
    pub fn on_any_exit(mut self, action: Action<S, E, C>) -> Self {
        self.on_any_exit.push(action);
        self
    }

    /// Action run on every state-changing transition, between the exit and
    /// entry actions. Reentry does not trigger it.
    pub fn on_any_transition(mut self, action: Action<S, E, C>) -> Self {
        self.on_any_transition.push(action);
        self
    }

    /// Install the recovery hook for action failures.
    pub fn error_handler<H>(mut self, handler: H) -> Self
    where
        H: ErrorHandler<S, E, C> + 'static,
    {
        self.error_handler = Some(Box::new(handler));
        self
    }

    /// Register an observer notified once per fire call.
    pub fn listener<L>(mut self, listener: L) -> Self
    where
        L: TransitionListener<S, E> + 'static,
    {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Freeze the configuration into an immutable machine.
    pub fn build(self) -> Result<StateMachine<S, E, C>, BuildError> {
        let initial = self.initial.ok_or(BuildError::MissingInitialState)?;

        let mut states: HashMap<S, StateDefinition<S, E, C>> = HashMap::new();
        for config in self.states {
            let (state, definition) = config.into_parts();
            if states.contains_key(&state) {
                return Err(BuildError::DuplicateState(format!("{state:?}")));
            }
            states.insert(state, definition);
        }

        // States only referenced as targets get empty definitions, so the
        // engine distinguishes "no rule for this event" from "unknown state".
        let mut referenced: Vec<S> = vec![initial.clone()];
        for def in states.values() {
            for rule in def.rules() {
                if let Some(target) = rule.target() {
                    referenced.push(target.clone());
                }
            }
        }
        for state in referenced {
            states.entry(state).or_insert_with(StateDefinition::empty);
        }

        Ok(StateMachine {
            initial,
            states,
            on_any_entry: self.on_any_entry,
            on_any_exit: self.on_any_exit,
            on_any_transition: self.on_any_transition,
            error_handler: self.error_handler,
            listeners: self.listeners,
        })
    }
}

impl<S: State, E: Event, C> Default for StateMachineBuilder<S, E, C> {
    fn default() -> Self {
        Self::new()
    }
}
