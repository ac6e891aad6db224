//! Transition resolution and machine introspection.
//!
//! The engine consumes the frozen rule tables built by [`crate::builder`]
//! and resolves one fire call at a time: rule selection in registration
//! order, effect execution, auto-transition chaining with cycle detection,
//! and structured outcome reporting.

mod info;
mod machine;

pub use info::{StateMachineInfo, TransitionInfo};
pub use machine::{EngineError, StateMachine};
