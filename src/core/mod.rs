//! Core rule model and contracts.
//!
//! This module contains the pure data layer of the engine:
//! - State/Event marker traits over host identifiers
//! - Guard predicates and side-effecting actions
//! - Immutable transition rules and per-state rule tables
//! - Outcome values (result, reason, diagnostic trace)
//!
//! Nothing here executes a transition; resolution lives in [`crate::engine`].

mod action;
mod guard;
mod ids;
mod outcome;
mod rule;

pub use action::{Action, ActionError, ActionFn, ErrorHandler, TransitionListener};
pub use guard::{AutoGuard, Guard};
pub use ids::{Event, State};
pub use outcome::{DebugInfo, Reason, TransitionResult};
pub use rule::{RuleKind, StateDefinition, TransitionRule};
