//! Offline analysis of a frozen rule graph.
//!
//! The validator reads an introspection snapshot, never the live machine,
//! and reports every defect it finds in one pass instead of stopping at the
//! first. Unreachability is exact (breadth-first over all transition edges,
//! ordinary and automatic); ambiguity detection is a heuristic that only
//! reports rule pairs whose guards are known unconditionally true, so it
//! cannot produce false positives.

mod report;

pub use report::{Finding, FindingCode, ValidationReport};

use crate::core::{Event, RuleKind, State};
use crate::engine::StateMachineInfo;
use std::collections::{HashMap, HashSet, VecDeque};

/// Validate a machine snapshot.
///
/// Checks, in order:
/// 1. the initial state is declared (error)
/// 2. every transition endpoint is declared (error)
/// 3. every declared state is reachable from the initial state (error —
///    a configured-but-unreachable state can never participate in any run)
/// 4. final states with outgoing permit/internal/auto rules (warning —
///    dead rules, firing from a final state is rejected at runtime)
/// 5. two rules for one (state, event) that are both unconditional (warning)
pub fn validate<S: State, E: Event>(info: &StateMachineInfo<S, E>) -> ValidationReport {
    let mut report = ValidationReport::default();

    if !info.states.contains(&info.initial) {
        report.error(
            FindingCode::UndeclaredInitialState,
            format!("initial state {:?} is not a declared state", info.initial),
        );
    }

    for transition in &info.transitions {
        if !info.states.contains(&transition.from) {
            report.error(
                FindingCode::UnknownTransitionEndpoint,
                format!(
                    "transition source {:?} is not a declared state",
                    transition.from
                ),
            );
        }
        if let Some(to) = &transition.to {
            if !info.states.contains(to) {
                report.error(
                    FindingCode::UnknownTransitionEndpoint,
                    format!("transition target {to:?} is not a declared state"),
                );
            }
        }
    }

    check_reachability(info, &mut report);
    check_dead_final_rules(info, &mut report);
    check_ambiguity(info, &mut report);

    report
}

fn check_reachability<S: State, E: Event>(
    info: &StateMachineInfo<S, E>,
    report: &mut ValidationReport,
) {
    let mut edges: HashMap<&S, Vec<&S>> = HashMap::new();
    for transition in &info.transitions {
        if matches!(transition.kind, RuleKind::Permit | RuleKind::Auto) {
            if let Some(to) = &transition.to {
                edges.entry(&transition.from).or_default().push(to);
            }
        }
    }

    let mut reached: HashSet<&S> = HashSet::new();
    let mut queue: VecDeque<&S> = VecDeque::new();
    if info.states.contains(&info.initial) {
        reached.insert(&info.initial);
        queue.push_back(&info.initial);
    }
    while let Some(state) = queue.pop_front() {
        for &next in edges.get(state).into_iter().flatten() {
            if reached.insert(next) {
                queue.push_back(next);
            }
        }
    }

    for state in &info.states {
        if !reached.contains(state) {
            report.error(
                FindingCode::UnreachableState,
                format!("state {state:?} is unreachable from the initial state"),
            );
        }
    }
}

fn check_dead_final_rules<S: State, E: Event>(
    info: &StateMachineInfo<S, E>,
    report: &mut ValidationReport,
) {
    for transition in &info.transitions {
        if info.final_states.contains(&transition.from)
            && matches!(
                transition.kind,
                RuleKind::Permit | RuleKind::Internal | RuleKind::Auto
            )
        {
            report.warning(
                FindingCode::DeadFinalStateRule,
                format!(
                    "final state {:?} has a {:?} rule that can never fire",
                    transition.from, transition.kind
                ),
            );
        }
    }
}

fn check_ambiguity<S: State, E: Event>(
    info: &StateMachineInfo<S, E>,
    report: &mut ValidationReport,
) {
    let mut unguarded: HashMap<(&S, &E), usize> = HashMap::new();
    for transition in &info.transitions {
        if let Some(event) = &transition.event {
            if !transition.guarded {
                *unguarded.entry((&transition.from, event)).or_default() += 1;
            }
        }
    }

    for ((state, event), count) in unguarded {
        if count >= 2 {
            report.warning(
                FindingCode::AmbiguousRules,
                format!(
                    "state {state:?} has {count} unconditional rules for event {event:?}; only the first can ever fire"
                ),
            );
        }
    }
}
