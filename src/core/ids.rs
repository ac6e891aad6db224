//! Marker traits for the identifiers a host machine is declared over.
//!
//! States and events are opaque values supplied by the host. The engine
//! only compares, hashes, clones, and reports them; it attaches no meaning
//! of its own. Whether a state is final is machine configuration, not a
//! property of the identifier type.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Marker trait for state identifiers.
///
/// Equality and hashing must be total and stable: two calls with the same
/// value must agree, across the whole lifetime of the machine.
///
/// # Example
///
/// ```rust
/// use statecraft::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum OrderState {
///     Created,
///     Paid,
///     Shipped,
///     Delivered,
/// }
///
/// impl State for OrderState {}
/// ```
pub trait State:
    Clone + PartialEq + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

/// Marker trait for event identifiers, with the same constraints as [`State`].
///
/// # Example
///
/// ```rust
/// use statecraft::core::Event;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
/// enum OrderEvent {
///     Pay,
///     Ship,
///     Deliver,
/// }
///
/// impl Event for OrderEvent {}
/// ```
pub trait Event:
    Clone + PartialEq + Eq + Hash + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestState {
        Idle,
        Working,
        Done,
    }

    impl State for TestState {}

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestEvent {
        Start,
        Finish,
    }

    impl Event for TestEvent {}

    #[test]
    fn states_are_comparable_and_hashable() {
        let mut set = HashSet::new();
        set.insert(TestState::Idle);
        set.insert(TestState::Idle);
        set.insert(TestState::Working);

        assert_eq!(set.len(), 2);
        assert!(set.contains(&TestState::Idle));
        assert!(!set.contains(&TestState::Done));
    }

    #[test]
    fn events_are_comparable_and_hashable() {
        let mut set = HashSet::new();
        set.insert(TestEvent::Start);
        set.insert(TestEvent::Finish);
        set.insert(TestEvent::Start);

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn identifiers_roundtrip_through_serde() {
        let state = TestState::Working;
        let json = serde_json::to_string(&state).unwrap();
        let back: TestState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
