//! Scenario configuration errors.

use thiserror::Error;

/// Errors raised while assembling a scenario, before anything runs.
/// Inconsistent setup is fatal at build time, never at run time.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("scenario starting state not specified. Call .start(state)")]
    MissingStartState,

    #[error("scenario context not specified. Call .context(value)")]
    MissingContext,

    #[error("scenario has no steps. Add at least one .fire(event) or .mutate(f)")]
    NoSteps,
}
