//! Property-based tests for the transition engine.
//!
//! These use proptest to verify resolution invariants hold across many
//! randomly generated (state, event, context) combinations.

use proptest::prelude::*;
use statecraft::builder::{StateConfig, StateMachineBuilder};
use statecraft::core::{AutoGuard, Guard, Reason};
use statecraft::engine::StateMachine;
use statecraft::{event_enum, state_enum};

state_enum! {
    enum Stage {
        S0,
        S1,
        S2,
        Done,
    }
}

event_enum! {
    enum Signal {
        Next,
        Skip,
        Noop,
    }
}

fn pipeline() -> StateMachine<Stage, Signal, u8> {
    StateMachineBuilder::new()
        .initial(Stage::S0)
        .state(
            StateConfig::new(Stage::S0)
                .permit_if(
                    Signal::Skip,
                    Stage::S2,
                    Guard::new(|_, level: &u8| *level > 5),
                )
                .permit(Signal::Next, Stage::S1)
                .ignore(Signal::Noop),
        )
        .state(StateConfig::new(Stage::S1).permit(Signal::Next, Stage::S2))
        .state(StateConfig::new(Stage::S2).permit(Signal::Next, Stage::Done))
        .state(StateConfig::new(Stage::Done).final_state())
        .build()
        .unwrap()
}

fn cyclic() -> StateMachine<Stage, Signal, u8> {
    StateMachineBuilder::new()
        .initial(Stage::S0)
        .state(StateConfig::new(Stage::S0).permit(Signal::Next, Stage::S1))
        .state(StateConfig::new(Stage::S1).auto(Stage::S2))
        .state(StateConfig::new(Stage::S2).auto(Stage::S1))
        .build()
        .unwrap()
}

prop_compose! {
    fn arbitrary_stage()(variant in 0..4u8) -> Stage {
        match variant {
            0 => Stage::S0,
            1 => Stage::S1,
            2 => Stage::S2,
            _ => Stage::Done,
        }
    }
}

prop_compose! {
    fn arbitrary_signal()(variant in 0..3u8) -> Signal {
        match variant {
            0 => Signal::Next,
            1 => Signal::Skip,
            _ => Signal::Noop,
        }
    }
}

proptest! {
    #[test]
    fn fire_is_total_for_any_state_event_context(
        stage in arbitrary_stage(),
        signal in arbitrary_signal(),
        mut level in any::<u8>(),
    ) {
        let machine = pipeline();
        let result = machine.fire_with_result(&stage, &signal, &mut level);
        prop_assert!(result.is_ok());
    }

    #[test]
    fn final_states_absorb_every_event(
        signal in arbitrary_signal(),
        mut level in any::<u8>(),
    ) {
        let machine = pipeline();
        let result = machine
            .fire_with_result(&Stage::Done, &signal, &mut level)
            .unwrap();

        prop_assert_eq!(result.state, Stage::Done);
        prop_assert!(!result.transitioned);
        prop_assert_eq!(result.reason, Reason::FinalStateTransitionAttempt);
    }

    #[test]
    fn can_fire_false_implies_state_unchanged(
        stage in arbitrary_stage(),
        signal in arbitrary_signal(),
        mut level in any::<u8>(),
    ) {
        let machine = pipeline();
        if !machine.can_fire(&stage, &signal, &level) {
            let result = machine.fire_with_result(&stage, &signal, &mut level).unwrap();
            prop_assert_eq!(result.state, stage);
            prop_assert!(!result.transitioned);
        }
    }

    #[test]
    fn can_fire_true_implies_fire_succeeds(
        stage in arbitrary_stage(),
        signal in arbitrary_signal(),
        mut level in any::<u8>(),
    ) {
        let machine = pipeline();
        if machine.can_fire(&stage, &signal, &level) {
            let result = machine.fire_with_result(&stage, &signal, &mut level).unwrap();
            prop_assert!(result.is_success());
        }
    }

    #[test]
    fn can_fire_is_deterministic(
        stage in arbitrary_stage(),
        signal in arbitrary_signal(),
        level in any::<u8>(),
    ) {
        let machine = pipeline();
        let first = machine.can_fire(&stage, &signal, &level);
        let second = machine.can_fire(&stage, &signal, &level);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn first_registered_rule_wins_when_both_guards_hold(mut level in any::<u8>()) {
        let machine = StateMachineBuilder::new()
            .initial(Stage::S0)
            .state(
                StateConfig::new(Stage::S0)
                    .permit_if(Signal::Next, Stage::S1, Guard::new(|_, n: &u8| *n >= 10))
                    .permit(Signal::Next, Stage::S2),
            )
            .build()
            .unwrap();

        let expected = if level >= 10 { Stage::S1 } else { Stage::S2 };
        let state = machine.fire(&Stage::S0, &Signal::Next, &mut level).unwrap();
        prop_assert_eq!(state, expected);
    }

    #[test]
    fn guaranteed_auto_cycle_fails_deterministically(mut level in any::<u8>()) {
        let machine = cyclic();
        let result = machine
            .fire_with_result(&Stage::S0, &Signal::Next, &mut level)
            .unwrap();

        prop_assert_eq!(result.reason, Reason::AutoTransitionCycle);
        prop_assert!(!result.transitioned);
        prop_assert_eq!(result.state, Stage::S0);
    }

    #[test]
    fn guarded_auto_chain_is_context_driven(mut level in any::<u8>()) {
        let machine = StateMachineBuilder::new()
            .initial(Stage::S0)
            .state(StateConfig::new(Stage::S0).permit(Signal::Next, Stage::S1))
            .state(StateConfig::new(Stage::S1).auto_if(
                Stage::S2,
                AutoGuard::new(|n: &u8| *n > 100),
            ))
            .build()
            .unwrap();

        let expected = if level > 100 { Stage::S2 } else { Stage::S1 };
        let state = machine.fire(&Stage::S0, &Signal::Next, &mut level).unwrap();
        prop_assert_eq!(state, expected);
    }

    #[test]
    fn results_roundtrip_through_serde(
        stage in arbitrary_stage(),
        signal in arbitrary_signal(),
        mut level in any::<u8>(),
    ) {
        let machine = pipeline();
        let result = machine.fire_with_result(&stage, &signal, &mut level).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: statecraft::TransitionResult<Stage, Signal> =
            serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.state, result.state);
        prop_assert_eq!(back.reason, result.reason);
        prop_assert_eq!(back.transitioned, result.transitioned);
    }
}
