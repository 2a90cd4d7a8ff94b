//! Status enum and transition policy for the application review workflow.
//!
//! Statuses serialize with their variant names (`"Submitted"`, `"Reviewing"`,
//! ...), which is also the form stored in SQL and shown to reviewers.
//! Matching is exact and case-sensitive.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// ApplicationStatus
// ---------------------------------------------------------------------------

/// Review state of an application.
///
/// ```text
/// Submitted ⇄ Reviewing ⇄ Approved
///     ⇅          ⇅          ⇅
///     └──────  Rejected ────┘
/// ```
///
/// Under the default policy every state may follow every other one; there is
/// no terminal state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
    JsonSchema,
)]
pub enum ApplicationStatus {
    #[default]
    Submitted,
    Reviewing,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    /// All statuses in presentation order.
    pub const ALL: [Self; 4] = [
        Self::Submitted,
        Self::Reviewing,
        Self::Approved,
        Self::Rejected,
    ];

    /// Status assigned on creation when the caller supplies none.
    pub const INITIAL: Self = Self::Submitted;

    /// Valid next states from the current state under `policy`.
    #[must_use]
    pub const fn allowed_next_states(self, policy: TransitionPolicy) -> &'static [Self] {
        match policy {
            TransitionPolicy::Unrestricted => &Self::ALL,
            TransitionPolicy::FinalDecisions => match self {
                Self::Submitted | Self::Reviewing => &Self::ALL,
                Self::Approved => &[Self::Approved, Self::Reviewing],
                Self::Rejected => &[Self::Rejected, Self::Reviewing],
            },
        }
    }

    /// Check whether transitioning to `next` is allowed under `policy`.
    #[must_use]
    pub fn can_transition_to(self, next: Self, policy: TransitionPolicy) -> bool {
        self.allowed_next_states(policy).contains(&next)
    }

    /// Return the string representation used in SQL storage and JSON.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::Reviewing => "Reviewing",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApplicationStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| CoreError::UnknownStatus(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// TransitionPolicy
// ---------------------------------------------------------------------------

/// Which status changes the workflow engine accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransitionPolicy {
    /// Any status may follow any other.
    #[default]
    Unrestricted,
    /// `Approved` and `Rejected` can only be reopened to `Reviewing`.
    FinalDecisions,
}

impl TransitionPolicy {
    /// Whether the current status matters at all. When it does not, callers
    /// can skip reading the row before updating it.
    #[must_use]
    pub const fn depends_on_current(self) -> bool {
        !matches!(self, Self::Unrestricted)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unrestricted => "unrestricted",
            Self::FinalDecisions => "final_decisions",
        }
    }
}

impl fmt::Display for TransitionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
