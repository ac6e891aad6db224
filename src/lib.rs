//! Statecraft: an embeddable finite-state-machine engine.
//!
//! Hosts declare states, events, guarded transition rules, and
//! side-effecting actions over a caller-owned context, then drive the
//! machine by firing events against a current state. The machine itself is
//! an immutable rule table: the caller threads the state value between
//! calls and owns the context, so one built machine serves any number of
//! concurrent workflows.
//!
//! # Core Concepts
//!
//! - **Rules**: a closed set of guarded variants — permit, reentry, ignore,
//!   internal, and auto-transition — resolved in registration order
//! - **Guards**: side-effect-free predicates over the event and context
//! - **Actions**: fallible side effects over the mutable context
//! - **Validation**: offline reachability and dead-rule analysis over the
//!   frozen rule graph
//!
//! # Example
//!
//! ```rust
//! use statecraft::builder::{StateConfig, StateMachineBuilder};
//! use statecraft::{event_enum, state_enum};
//!
//! state_enum! {
//!     enum OrderState {
//!         Created,
//!         Paid,
//!         Delivered,
//!     }
//! }
//!
//! event_enum! {
//!     enum OrderEvent {
//!         Pay,
//!         Deliver,
//!     }
//! }
//!
//! struct Order {
//!     total_cents: u64,
//! }
//!
//! let machine = StateMachineBuilder::<OrderState, OrderEvent, Order>::new()
//!     .initial(OrderState::Created)
//!     .state(StateConfig::new(OrderState::Created).permit(OrderEvent::Pay, OrderState::Paid))
//!     .state(StateConfig::new(OrderState::Paid).permit(OrderEvent::Deliver, OrderState::Delivered))
//!     .state(StateConfig::new(OrderState::Delivered).final_state())
//!     .build()
//!     .unwrap();
//!
//! let mut order = Order { total_cents: 1299 };
//! let state = machine
//!     .fire(&OrderState::Created, &OrderEvent::Pay, &mut order)
//!     .unwrap();
//! assert_eq!(state, OrderState::Paid);
//! assert!(machine.validate().is_valid());
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod harness;
pub mod validate;

// Re-export commonly used types
pub use builder::{BuildError, StateConfig, StateMachineBuilder};
pub use core::{
    Action, ActionError, AutoGuard, DebugInfo, ErrorHandler, Event, Guard, Reason, State,
    TransitionListener, TransitionResult,
};
pub use engine::{EngineError, StateMachine, StateMachineInfo};
pub use validate::{validate, Finding, FindingCode, ValidationReport};
