//! Build errors for machine configuration.

use thiserror::Error;

/// Errors raised when freezing a configuration into a machine.
///
/// These are the only configuration-time failures; graph defects like
/// unreachable states or dead final-state rules are the validator's
/// territory and never block a build.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("state {0} configured more than once")]
    DuplicateState(String),
}
