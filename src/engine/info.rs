//! Introspection snapshot of a configured machine.
//!
//! The snapshot is a plain serializable value decoupled from the live rule
//! tables: guards and actions are reduced to flags, so external tooling and
//! the validator can inspect the graph without holding the machine itself.

use crate::core::{Event, RuleKind, State};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One declared rule, reduced to its graph shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionInfo<S: State, E: Event> {
    /// Owning state of the rule.
    pub from: S,
    /// Target state: the permit/auto target, the owning state itself for
    /// reentry rules, absent for ignore/internal rules.
    pub to: Option<S>,
    /// Registered event; absent for auto-transitions.
    pub event: Option<E>,
    pub kind: RuleKind,
    /// Whether the rule was registered with a guard.
    pub guarded: bool,
}

/// Immutable descriptive view of a configured machine.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct StateMachineInfo<S: State, E: Event> {
    pub initial: S,
    /// Every declared state, including states referenced only as targets.
    pub states: HashSet<S>,
    /// Every event some rule is registered for.
    pub events: HashSet<E>,
    /// States configured as final.
    pub final_states: HashSet<S>,
    /// Every declared rule.
    pub transitions: Vec<TransitionInfo<S, E>>,
}

impl<S: State, E: Event> StateMachineInfo<S, E> {
    /// The (from, to, event) triples of the event-driven state-changing
    /// rules, the classic introspection view of the machine.
    pub fn transition_triples(&self) -> Vec<(S, S, E)> {
        self.transitions
            .iter()
            .filter_map(|t| match (&t.to, &t.event) {
                (Some(to), Some(event)) => Some((t.from.clone(), to.clone(), event.clone())),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        A,
        B,
        C,
    }
    impl State for TestState {}

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Go,
    }
    impl Event for TestEvent {}

    fn sample_info() -> StateMachineInfo<TestState, TestEvent> {
        StateMachineInfo {
            initial: TestState::A,
            states: [TestState::A, TestState::B, TestState::C].into_iter().collect(),
            events: [TestEvent::Go].into_iter().collect(),
            final_states: [TestState::C].into_iter().collect(),
            transitions: vec![
                TransitionInfo {
                    from: TestState::A,
                    to: Some(TestState::B),
                    event: Some(TestEvent::Go),
                    kind: RuleKind::Permit,
                    guarded: false,
                },
                TransitionInfo {
                    from: TestState::B,
                    to: Some(TestState::C),
                    event: None,
                    kind: RuleKind::Auto,
                    guarded: true,
                },
                TransitionInfo {
                    from: TestState::A,
                    to: None,
                    event: Some(TestEvent::Go),
                    kind: RuleKind::Ignore,
                    guarded: true,
                },
            ],
        }
    }

    #[test]
    fn triples_cover_only_event_driven_state_changes() {
        let info = sample_info();
        let triples = info.transition_triples();

        assert_eq!(triples.len(), 1);
        assert_eq!(
            triples[0],
            (TestState::A, TestState::B, TestEvent::Go)
        );
    }

    #[test]
    fn snapshot_roundtrips_through_serde() {
        let info = sample_info();
        let json = serde_json::to_string(&info).unwrap();
        let back: StateMachineInfo<TestState, TestEvent> = serde_json::from_str(&json).unwrap();

        assert_eq!(back.initial, TestState::A);
        assert_eq!(back.states.len(), 3);
        assert_eq!(back.transitions.len(), 3);
        assert!(back.final_states.contains(&TestState::C));
    }
}
