//! Document Review Workflow
//!
//! This example demonstrates guard priority and auto-transitions.
//!
//! Key concepts:
//! - A priority guard that routes high-scoring submissions straight to
//!   final review, bypassing the intermediate stages
//! - An auto-transition that advances screening without an external event
//! - Scenario scripting with the bundled harness
//!
//! Run with: cargo run --example document_review

use statecraft::builder::{StateConfig, StateMachineBuilder};
use statecraft::core::{AutoGuard, Guard};
use statecraft::harness::ScenarioBuilder;
use statecraft::{event_enum, state_enum};

state_enum! {
    enum ReviewState {
        Submitted,
        Screening,
        PanelReview,
        FinalReview,
        Approved,
    }
}

event_enum! {
    enum ReviewEvent {
        Proceed,
    }
}

struct Submission {
    title: String,
    screening_score: f64,
}

fn main() {
    let machine = StateMachineBuilder::<ReviewState, ReviewEvent, Submission>::new()
        .initial(ReviewState::Submitted)
        .state(
            StateConfig::new(ReviewState::Submitted)
                .permit_if(
                    ReviewEvent::Proceed,
                    ReviewState::FinalReview,
                    Guard::new(|_, s: &Submission| s.screening_score > 9.0),
                )
                .permit(ReviewEvent::Proceed, ReviewState::Screening),
        )
        .state(StateConfig::new(ReviewState::Screening).auto_if(
            ReviewState::PanelReview,
            AutoGuard::new(|s: &Submission| s.screening_score >= 5.0),
        ))
        .state(
            StateConfig::new(ReviewState::PanelReview)
                .permit(ReviewEvent::Proceed, ReviewState::FinalReview),
        )
        .state(
            StateConfig::new(ReviewState::FinalReview)
                .permit(ReviewEvent::Proceed, ReviewState::Approved),
        )
        .state(StateConfig::new(ReviewState::Approved).final_state())
        .build()
        .expect("review machine builds");

    println!("machine valid: {}", machine.validate().is_valid());

    // a high-scoring submission skips screening entirely
    let mut priority = Submission {
        title: "Sparse matrix kernels".into(),
        screening_score: 9.5,
    };
    let mut state = ReviewState::Submitted;
    state = machine
        .fire(&state, &ReviewEvent::Proceed, &mut priority)
        .unwrap();
    println!("'{}' after first proceed: {state:?}", priority.title);
    state = machine
        .fire(&state, &ReviewEvent::Proceed, &mut priority)
        .unwrap();
    println!("'{}' after second proceed: {state:?}", priority.title);

    // an average submission walks the stages, with screening advancing
    // automatically once the score clears the bar
    let report = ScenarioBuilder::new("average submission")
        .start(ReviewState::Submitted)
        .context(Submission {
            title: "Quarterly report".into(),
            screening_score: 6.0,
        })
        .fire_expect(ReviewEvent::Proceed, ReviewState::PanelReview)
        .fire_expect(ReviewEvent::Proceed, ReviewState::FinalReview)
        .fire_expect(ReviewEvent::Proceed, ReviewState::Approved)
        .expect_final(ReviewState::Approved)
        .build()
        .unwrap()
        .run(&machine)
        .unwrap();

    println!(
        "scenario '{}' passed: {} ({} steps traced)",
        report.name,
        report.passed(),
        report.traces.len()
    );
}
