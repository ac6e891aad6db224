//! Outcome values produced by a fire call.
//!
//! Every fire call yields a [`TransitionResult`] with a [`Reason`] code and
//! a single diagnostic [`DebugInfo`] entry. These are plain values created
//! fresh per call and owned by the caller; the engine keeps nothing.

use crate::core::ids::{Event, State};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Why a fire call ended the way it did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reason {
    /// An ordinary transition moved the machine to a new state.
    Transitioned,
    /// A reentry rule exited and re-entered the same state.
    Reentered,
    /// An ignore rule accepted the event without any effect.
    Ignored,
    /// An internal rule ran its action without changing state.
    ActionApplied,
    /// The current state is final; nothing may fire from it.
    FinalStateTransitionAttempt,
    /// The current state is unknown to the machine.
    NoConfigurationForState,
    /// No rule for this (state, event) pair had a true guard.
    NoTransitionConfigured,
    /// An auto-transition chain revisited a state within one fire call.
    AutoTransitionCycle,
    /// An action failed and the configured error handler produced this outcome.
    RecoveredByHandler,
    /// An action failed with no handler configured.
    ActionFailed,
}

impl Reason {
    /// True for outcomes that represent a resolution or execution failure.
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Reason::FinalStateTransitionAttempt
                | Reason::NoConfigurationForState
                | Reason::NoTransitionConfigured
                | Reason::AutoTransitionCycle
                | Reason::ActionFailed
        )
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::Transitioned => "transitioned",
            Reason::Reentered => "reentered state",
            Reason::Ignored => "event ignored",
            Reason::ActionApplied => "internal action applied",
            Reason::FinalStateTransitionAttempt => "final state transition attempt",
            Reason::NoConfigurationForState => "no configuration for state",
            Reason::NoTransitionConfigured => "no transition configured",
            Reason::AutoTransitionCycle => "auto-transition cycle detected",
            Reason::RecoveredByHandler => "recovered by error handler",
            Reason::ActionFailed => "action failed",
        };
        f.write_str(text)
    }
}

/// A single diagnostic trace entry for one fire call.
///
/// Not a log of every resolution step: one entry summarising the definitive
/// outcome, stamped when the call resolved.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct DebugInfo<S: State, E: Event> {
    /// The state the entry describes: the resulting state on success, the
    /// unchanged input state on failure.
    pub state: S,
    /// The external event that was fired, if any.
    pub event: Option<E>,
    /// Outcome code.
    pub reason: Reason,
    /// When the call resolved.
    pub timestamp: DateTime<Utc>,
    /// Optional free-text context for diagnosis.
    pub detail: Option<String>,
}

impl<S: State, E: Event> DebugInfo<S, E> {
    pub fn new(state: S, event: Option<E>, reason: Reason, detail: Option<String>) -> Self {
        DebugInfo {
            state,
            event,
            reason,
            timestamp: Utc::now(),
            detail,
        }
    }
}

/// The full outcome of one fire call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(bound = "")]
pub struct TransitionResult<S: State, E: Event> {
    /// The resulting state; equal to the input state unless a transition ran.
    pub state: S,
    /// Whether the machine moved (reentry counts as a move).
    pub transitioned: bool,
    /// Outcome code.
    pub reason: Reason,
    /// Diagnostic trace entry, populated by the engine on every call.
    pub debug: Option<DebugInfo<S, E>>,
}

impl<S: State, E: Event> TransitionResult<S, E> {
    /// Successful outcome. `transitioned` is derived from the reason:
    /// ignore and internal outcomes accept the event without moving.
    pub fn success(state: S, reason: Reason, debug: Option<DebugInfo<S, E>>) -> Self {
        let transitioned = matches!(reason, Reason::Transitioned | Reason::Reentered);
        TransitionResult {
            state,
            transitioned,
            reason,
            debug,
        }
    }

    /// Failed outcome; the state reported is the unchanged input state.
    pub fn failure(state: S, reason: Reason, debug: Option<DebugInfo<S, E>>) -> Self {
        TransitionResult {
            state,
            transitioned: false,
            reason,
            debug,
        }
    }

    /// True unless the reason is a failure code.
    pub fn is_success(&self) -> bool {
        !self.reason.is_failure()
    }
}
