//! Scenario harness for scripting multi-step runs against a machine.
//!
//! The harness consumes only the published runtime surface — `fire_with_result`
//! and the outcome values — with no privileged access to engine internals.
//! A scenario is an ordered script of event fires and context mutations with
//! optional per-step and final expectations; running it yields a structured
//! report rather than panicking, so callers choose how to fail.

mod error;

pub use error::HarnessError;

use crate::core::{Event, State, TransitionResult};
use crate::engine::{EngineError, StateMachine};

/// One scripted step.
pub enum Step<S: State, E: Event, C> {
    /// Fire an event, optionally asserting the state it lands in.
    Fire { event: E, expect_state: Option<S> },
    /// Mutate the context between fires.
    Mutate(Box<dyn Fn(&mut C) + Send + Sync>),
}

/// A ready-to-run scripted scenario. Built by [`ScenarioBuilder`].
pub struct Scenario<S: State, E: Event, C> {
    name: String,
    start: S,
    context: C,
    steps: Vec<Step<S, E, C>>,
    expect_final: Option<S>,
    expect_context: Option<Box<dyn Fn(&C) -> bool + Send + Sync>>,
}

impl<S: State, E: Event, C> Scenario<S, E, C> {
    /// Run the scenario against a machine, threading the state value the
    /// way any host would. Returns `Err` only for an unhandled action
    /// failure; expectation mismatches are collected in the report.
    pub fn run(self, machine: &StateMachine<S, E, C>) -> Result<ScenarioReport<S, E>, EngineError> {
        let mut state = self.start;
        let mut ctx = self.context;
        let mut failures = Vec::new();
        let mut traces = Vec::new();

        for (index, step) in self.steps.into_iter().enumerate() {
            match step {
                Step::Mutate(mutate) => mutate(&mut ctx),
                Step::Fire { event, expect_state } => {
                    let result = machine.fire_with_result(&state, &event, &mut ctx)?;
                    if let Some(expected) = expect_state {
                        if result.state != expected {
                            failures.push(format!(
                                "step {index}: expected state {expected:?} after firing {event:?}, got {:?} ({})",
                                result.state, result.reason
                            ));
                        }
                    }
                    state = result.state.clone();
                    traces.push(result);
                }
            }
        }

        if let Some(expected) = self.expect_final {
            if state != expected {
                failures.push(format!(
                    "expected final state {expected:?}, got {state:?}"
                ));
            }
        }
        if let Some(predicate) = self.expect_context {
            if !predicate(&ctx) {
                failures.push("final context predicate failed".to_string());
            }
        }

        Ok(ScenarioReport {
            name: self.name,
            final_state: state,
            failures,
            traces,
        })
    }
}

/// The outcome of one scenario run: the final state, every per-step
/// transition trace, and any expectation mismatches.
pub struct ScenarioReport<S: State, E: Event> {
    pub name: String,
    pub final_state: S,
    pub failures: Vec<String>,
    pub traces: Vec<TransitionResult<S, E>>,
}

impl<S: State, E: Event> ScenarioReport<S, E> {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Fluent scenario assembly; misconfiguration fails at `build()`.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::{StateConfig, StateMachineBuilder};
/// use statecraft::harness::ScenarioBuilder;
/// use statecraft::{event_enum, state_enum};
///
/// state_enum! {
///     enum Door {
///         Closed,
///         Open,
///     }
/// }
///
/// event_enum! {
///     enum Push {
///         Toggle,
///     }
/// }
///
/// let machine = StateMachineBuilder::<Door, Push, ()>::new()
///     .initial(Door::Closed)
///     .state(StateConfig::new(Door::Closed).permit(Push::Toggle, Door::Open))
///     .state(StateConfig::new(Door::Open).permit(Push::Toggle, Door::Closed))
///     .build()
///     .unwrap();
///
/// let report = ScenarioBuilder::new("toggle twice")
///     .start(Door::Closed)
///     .context(())
///     .fire(Push::Toggle)
///     .fire_expect(Push::Toggle, Door::Closed)
///     .expect_final(Door::Closed)
///     .build()
///     .unwrap()
///     .run(&machine)
///     .unwrap();
///
/// assert!(report.passed());
/// ```
pub struct ScenarioBuilder<S: State, E: Event, C> {
    name: String,
    start: Option<S>,
    context: Option<C>,
    steps: Vec<Step<S, E, C>>,
    expect_final: Option<S>,
    expect_context: Option<Box<dyn Fn(&C) -> bool + Send + Sync>>,
}

impl<S: State, E: Event, C> ScenarioBuilder<S, E, C> {
    pub fn new(name: impl Into<String>) -> Self {
        ScenarioBuilder {
            name: name.into(),
            start: None,
            context: None,
            steps: Vec::new(),
            expect_final: None,
            expect_context: None,
        }
    }

    /// Starting state (required).
    pub fn start(mut self, state: S) -> Self {
        self.start = Some(state);
        self
    }

    /// Initial context value (required).
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Fire an event with no per-step assertion.
    pub fn fire(mut self, event: E) -> Self {
        self.steps.push(Step::Fire {
            event,
            expect_state: None,
        });
        self
    }

    /// Fire an event and assert the state it lands in.
    pub fn fire_expect(mut self, event: E, expect_state: S) -> Self {
        self.steps.push(Step::Fire {
            event,
            expect_state: Some(expect_state),
        });
        self
    }

    /// Mutate the context between fires.
    pub fn mutate<F>(mut self, mutate: F) -> Self
    where
        F: Fn(&mut C) + Send + Sync + 'static,
    {
        self.steps.push(Step::Mutate(Box::new(mutate)));
        self
    }

    /// Assert the state the scenario must end in.
    pub fn expect_final(mut self, state: S) -> Self {
        self.expect_final = Some(state);
        self
    }

    /// Assert a predicate over the final context.
    pub fn expect_context<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.expect_context = Some(Box::new(predicate));
        self
    }

    pub fn build(self) -> Result<Scenario<S, E, C>, HarnessError> {
        let start = self.start.ok_or(HarnessError::MissingStartState)?;
        let context = self.context.ok_or(HarnessError::MissingContext)?;
        if self.steps.is_empty() {
            return Err(HarnessError::NoSteps);
        }

        Ok(Scenario {
            name: self.name,
            start,
            context,
            steps: self.steps,
            expect_final: self.expect_final,
            expect_context: self.expect_context,
        })
    }
}
