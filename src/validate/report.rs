//! Structured validation findings.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable code for a validation finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FindingCode {
    /// The initial state is not in the declared state set.
    UndeclaredInitialState,
    /// A transition references a state outside the declared set.
    UnknownTransitionEndpoint,
    /// A declared state can never be reached from the initial state.
    UnreachableState,
    /// A final state has outgoing rules that can never be exercised.
    DeadFinalStateRule,
    /// Two rules for the same (state, event) are both unconditionally true.
    AmbiguousRules,
}

/// One validation finding: a code plus a human-readable message.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub code: FindingCode,
    pub message: String,
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

/// The outcome of validating a machine's rule graph.
///
/// Findings are always returned, never thrown; callers decide whether
/// warnings are fatal for them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ValidationReport {
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
}

impl ValidationReport {
    /// True when no errors were found (warnings do not invalidate).
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub(crate) fn error(&mut self, code: FindingCode, message: String) {
        self.errors.push(Finding { code, message });
    }

    pub(crate) fn warning(&mut self, code: FindingCode, message: String) {
        self.warnings.push(Finding { code, message });
    }
}
