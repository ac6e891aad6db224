//! Guard predicates for controlling which transition rule applies.
//!
//! Guards are boolean functions over the firing event and the caller-owned
//! context. They must be side-effect-free by contract: the engine makes no
//! promise about how many times a guard is evaluated for one fire, and
//! `can_fire` dry-runs re-evaluate the same predicates.

use crate::core::ids::Event;

/// Predicate gating whether an event-bound transition rule applies.
///
/// Rules store `Option<Guard>`; a rule registered without a guard is
/// unconditional, and the validator treats exactly that case as a
/// statically-known-true guard when looking for ambiguous rule pairs.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{Event, Guard};
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum ReviewEvent {
///     Proceed,
/// }
/// impl Event for ReviewEvent {}
///
/// struct Submission {
///     score: f64,
/// }
///
/// let priority = Guard::new(|_e: &ReviewEvent, ctx: &Submission| ctx.score > 9.0);
///
/// assert!(priority.check(&ReviewEvent::Proceed, &Submission { score: 9.5 }));
/// assert!(!priority.check(&ReviewEvent::Proceed, &Submission { score: 4.0 }));
/// ```
pub struct Guard<E: Event, C> {
    predicate: Box<dyn Fn(&E, &C) -> bool + Send + Sync>,
}

impl<E: Event, C> Guard<E, C> {
    /// Create a guard from a predicate over the firing event and context.
    ///
    /// The predicate must be side-effect-free and thread-safe; closures,
    /// function pointers, and callable objects all qualify.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&E, &C) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against the firing event and current context.
    pub fn check(&self, event: &E, ctx: &C) -> bool {
        (self.predicate)(event, ctx)
    }
}

/// Predicate gating an auto-transition.
///
/// Auto-transitions are attempted immediately after entering their owning
/// state, without an external event, so their guards see only the context.
pub struct AutoGuard<C> {
    predicate: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> AutoGuard<C> {
    /// Create an auto-transition guard from a predicate over the context.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        AutoGuard {
            predicate: Box::new(predicate),
        }
    }

    /// Evaluate the guard against the current context.
    pub fn check(&self, ctx: &C) -> bool {
        (self.predicate)(ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Go,
        Stop,
    }

    impl Event for TestEvent {}

    struct Counter {
        value: i64,
    }

    #[test]
    fn guard_sees_event_and_context() {
        let guard = Guard::new(|e: &TestEvent, ctx: &Counter| {
            matches!(e, TestEvent::Go) && ctx.value > 0
        });

        assert!(guard.check(&TestEvent::Go, &Counter { value: 3 }));
        assert!(!guard.check(&TestEvent::Go, &Counter { value: 0 }));
        assert!(!guard.check(&TestEvent::Stop, &Counter { value: 3 }));
    }

    #[test]
    fn guard_is_deterministic() {
        let ctx = Counter { value: 7 };
        let guard = Guard::new(|_: &TestEvent, c: &Counter| c.value % 2 == 1);

        let first = guard.check(&TestEvent::Go, &ctx);
        let second = guard.check(&TestEvent::Go, &ctx);
        assert_eq!(first, second);
    }

    #[test]
    fn auto_guard_sees_only_context() {
        let guard = AutoGuard::new(|ctx: &Counter| ctx.value >= 10);

        assert!(guard.check(&Counter { value: 10 }));
        assert!(!guard.check(&Counter { value: 9 }));
    }

    #[test]
    fn guards_accept_function_pointers() {
        fn over_five(_e: &TestEvent, ctx: &Counter) -> bool {
            ctx.value > 5
        }

        let guard: Guard<TestEvent, Counter> = Guard::new(over_five);
        assert!(guard.check(&TestEvent::Go, &Counter { value: 6 }));
    }
}
