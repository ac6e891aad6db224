//! Builder API for assembling and freezing machine configurations.
//!
//! Configuration is pure data assembly: nothing here resolves transitions.
//! A [`StateMachineBuilder`] collects per-state [`StateConfig`]s, global
//! actions, an optional error handler, and listeners, then freezes the
//! whole thing into an immutable [`crate::engine::StateMachine`].

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;

pub use error::BuildError;
pub use machine::StateMachineBuilder;
pub use state::StateConfig;
