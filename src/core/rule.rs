//! Transition rules and per-state rule tables.
//!
//! Rules are immutable once the machine is built. The order of the rules in
//! a [`StateDefinition`] is registration order and is semantically
//! significant: for a given event, the first rule whose guard evaluates
//! true wins.

use crate::core::action::Action;
use crate::core::guard::{AutoGuard, Guard};
use crate::core::ids::{Event, State};
use serde::{Deserialize, Serialize};

/// Discriminant of a [`TransitionRule`] variant, used in introspection
/// snapshots and validation findings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleKind {
    Permit,
    PermitReentry,
    Ignore,
    Internal,
    Auto,
}

/// One declared transition rule, a closed sum dispatched by exhaustive match.
pub enum TransitionRule<S: State, E: Event, C> {
    /// Ordinary transition to a target state.
    Permit {
        event: E,
        target: S,
        guard: Option<Guard<E, C>>,
    },
    /// Self-transition: exit then entry actions run, state identity unchanged.
    PermitReentry { event: E, guard: Option<Guard<E, C>> },
    /// Event accepted, no state change, no actions.
    Ignore { event: E, guard: Option<Guard<E, C>> },
    /// Runs one action, no state change, no entry/exit actions.
    Internal {
        event: E,
        action: Action<S, E, C>,
        guard: Option<Guard<E, C>>,
    },
    /// Attempted automatically immediately after entering the owning state,
    /// without an external event.
    Auto {
        target: S,
        guard: Option<AutoGuard<C>>,
    },
}

impl<S: State, E: Event, C> TransitionRule<S, E, C> {
    /// The event this rule is registered for; auto rules have none.
    pub fn event(&self) -> Option<&E> {
        match self {
            TransitionRule::Permit { event, .. }
            | TransitionRule::PermitReentry { event, .. }
            | TransitionRule::Ignore { event, .. }
            | TransitionRule::Internal { event, .. } => Some(event),
            TransitionRule::Auto { .. } => None,
        }
    }

    /// The state this rule moves to, where one exists.
    pub fn target(&self) -> Option<&S> {
        match self {
            TransitionRule::Permit { target, .. } | TransitionRule::Auto { target, .. } => {
                Some(target)
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> RuleKind {
        match self {
            TransitionRule::Permit { .. } => RuleKind::Permit,
            TransitionRule::PermitReentry { .. } => RuleKind::PermitReentry,
            TransitionRule::Ignore { .. } => RuleKind::Ignore,
            TransitionRule::Internal { .. } => RuleKind::Internal,
            TransitionRule::Auto { .. } => RuleKind::Auto,
        }
    }

    /// Whether the rule was registered with a guard.
    pub fn is_guarded(&self) -> bool {
        match self {
            TransitionRule::Permit { guard, .. }
            | TransitionRule::PermitReentry { guard, .. }
            | TransitionRule::Ignore { guard, .. }
            | TransitionRule::Internal { guard, .. } => guard.is_some(),
            TransitionRule::Auto { guard, .. } => guard.is_some(),
        }
    }

    /// Whether this rule is selected for the given event and context:
    /// the events match and the guard (if any) evaluates true.
    /// Auto rules never match an external event.
    pub(crate) fn applies(&self, event: &E, ctx: &C) -> bool {
        match self {
            TransitionRule::Permit { event: e, guard, .. }
            | TransitionRule::PermitReentry { event: e, guard }
            | TransitionRule::Ignore { event: e, guard }
            | TransitionRule::Internal { event: e, guard, .. } => {
                e == event && guard.as_ref().is_none_or(|g| g.check(event, ctx))
            }
            TransitionRule::Auto { .. } => false,
        }
    }
}

/// Immutable per-state bundle: ordered rules, entry/exit actions, final flag.
///
/// A state referenced only as a transition target gets an empty definition
/// (not final, no rules) when the machine is frozen, which permits forward
/// references at configuration time.
pub struct StateDefinition<S: State, E: Event, C> {
    pub(crate) rules: Vec<TransitionRule<S, E, C>>,
    pub(crate) entry_actions: Vec<Action<S, E, C>>,
    pub(crate) exit_actions: Vec<Action<S, E, C>>,
    pub(crate) is_final: bool,
}

impl<S: State, E: Event, C> StateDefinition<S, E, C> {
    /// Definition for a state with no configuration of its own.
    pub fn empty() -> Self {
        StateDefinition {
            rules: Vec::new(),
            entry_actions: Vec::new(),
            exit_actions: Vec::new(),
            is_final: false,
        }
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn rules(&self) -> &[TransitionRule<S, E, C>] {
        &self.rules
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
    }
    impl State for TestState {}

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Go,
        Halt,
    }
    impl Event for TestEvent {}

    #[test]
    fn unguarded_rule_applies_on_event_match() {
        let rule: TransitionRule<TestState, TestEvent, ()> = TransitionRule::Permit {
            event: TestEvent::Go,
            target: TestState::B,
            guard: None,
        };

        assert!(rule.applies(&TestEvent::Go, &()));
        assert!(!rule.applies(&TestEvent::Halt, &()));
    }

    #[test]
    fn guarded_rule_consults_guard() {
        let rule: TransitionRule<TestState, TestEvent, bool> = TransitionRule::Permit {
            event: TestEvent::Go,
            target: TestState::B,
            guard: Some(Guard::new(|_, ready: &bool| *ready)),
        };

        assert!(rule.applies(&TestEvent::Go, &true));
        assert!(!rule.applies(&TestEvent::Go, &false));
    }

    #[test]
    fn auto_rules_never_match_external_events() {
        let rule: TransitionRule<TestState, TestEvent, ()> = TransitionRule::Auto {
            target: TestState::B,
            guard: None,
        };

        assert!(!rule.applies(&TestEvent::Go, &()));
        assert_eq!(rule.event(), None);
        assert_eq!(rule.target(), Some(&TestState::B));
        assert_eq!(rule.kind(), RuleKind::Auto);
    }

    #[test]
    fn rule_kind_and_guard_flag_are_reported() {
        let ignore: TransitionRule<TestState, TestEvent, ()> = TransitionRule::Ignore {
            event: TestEvent::Halt,
            guard: None,
        };
        assert_eq!(ignore.kind(), RuleKind::Ignore);
        assert!(!ignore.is_guarded());
        assert_eq!(ignore.target(), None);

        let reentry: TransitionRule<TestState, TestEvent, ()> = TransitionRule::PermitReentry {
            event: TestEvent::Go,
            guard: Some(Guard::new(|_, _| true)),
        };
        assert_eq!(reentry.kind(), RuleKind::PermitReentry);
        assert!(reentry.is_guarded());
    }

    #[test]
    fn empty_definition_is_not_final_and_has_no_rules() {
        let def: StateDefinition<TestState, TestEvent, ()> = StateDefinition::empty();
        assert!(!def.is_final());
        assert!(def.rules().is_empty());
    }
}
