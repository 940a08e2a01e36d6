//! Janitor domain types: the closed set of maintenance workflow categories,
//! the per-type dispatch policy table, the run lifecycle state machine, and
//! the strict scheduler feature-flag parse.
//!
//! This module lives in `core` (zero internal deps) so it can be used by the
//! repository layer, the orchestration engine, and the API server alike.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// JanitorType
// ---------------------------------------------------------------------------

/// The four maintenance workflow categories a workspace can enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JanitorType {
    UnitTests,
    IntegrationTests,
    E2eTests,
    SecurityReview,
}

/// All janitor types, in dispatch order within a batch.
pub const ALL_JANITOR_TYPES: [JanitorType; 4] = [
    JanitorType::UnitTests,
    JanitorType::IntegrationTests,
    JanitorType::E2eTests,
    JanitorType::SecurityReview,
];

impl JanitorType {
    /// Return the wire-format string for this variant.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnitTests => "UNIT_TESTS",
            Self::IntegrationTests => "INTEGRATION_TESTS",
            Self::E2eTests => "E2E_TESTS",
            Self::SecurityReview => "SECURITY_REVIEW",
        }
    }

    /// Parse from a wire-format string.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "UNIT_TESTS" => Ok(Self::UnitTests),
            "INTEGRATION_TESTS" => Ok(Self::IntegrationTests),
            "E2E_TESTS" => Ok(Self::E2eTests),
            "SECURITY_REVIEW" => Ok(Self::SecurityReview),
            _ => Err(CoreError::Validation(format!(
                "Invalid janitor type: '{s}'. Must be one of: UNIT_TESTS, \
                 INTEGRATION_TESTS, E2E_TESTS, SECURITY_REVIEW"
            ))),
        }
    }

    /// Dispatch policy for this janitor type.
    pub fn policy(&self) -> JanitorPolicy {
        match self {
            // Test-writing janitors push commits to the repository, so two
            // concurrent instances would collide on branches.
            Self::UnitTests | Self::IntegrationTests => JanitorPolicy { sequential: true },
            Self::E2eTests | Self::SecurityReview => JanitorPolicy { sequential: false },
        }
    }
}

impl std::fmt::Display for JanitorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-type dispatch policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JanitorPolicy {
    /// At most one outstanding unit of work per workspace when `true`.
    pub sequential: bool,
}

// ---------------------------------------------------------------------------
// JanitorToggles
// ---------------------------------------------------------------------------

/// The per-workspace enablement flags, one per janitor type.
///
/// Built from a `janitor_configs` row by the db crate; the eligibility
/// scanner expands it into candidate (workspace, type) pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JanitorToggles {
    pub unit_tests: bool,
    pub integration_tests: bool,
    pub e2e_tests: bool,
    pub security_review: bool,
}

impl JanitorToggles {
    /// Whether the given janitor type is enabled.
    pub fn is_enabled(&self, janitor_type: JanitorType) -> bool {
        match janitor_type {
            JanitorType::UnitTests => self.unit_tests,
            JanitorType::IntegrationTests => self.integration_tests,
            JanitorType::E2eTests => self.e2e_tests,
            JanitorType::SecurityReview => self.security_review,
        }
    }

    /// The enabled janitor types, in dispatch order.
    pub fn enabled_types(&self) -> Vec<JanitorType> {
        ALL_JANITOR_TYPES
            .into_iter()
            .filter(|t| self.is_enabled(*t))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// RunTrigger
// ---------------------------------------------------------------------------

/// How a janitor run was initiated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunTrigger {
    Scheduled,
    Manual,
}

impl RunTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "SCHEDULED",
            Self::Manual => "MANUAL",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "SCHEDULED" => Ok(Self::Scheduled),
            "MANUAL" => Ok(Self::Manual),
            _ => Err(CoreError::Validation(format!(
                "Invalid run trigger: '{s}'. Must be one of: SCHEDULED, MANUAL"
            ))),
        }
    }
}

impl std::fmt::Display for RunTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// RunStatus state machine
// ---------------------------------------------------------------------------

/// Lifecycle status of a janitor run.
///
/// The orchestrator only ever writes `Pending` and the immediate
/// `Running`/`Failed` outcome of the dispatch call; `Completed` (or a late
/// `Failed`) is written by the workflow engine's completion webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "RUNNING" => Ok(Self::Running),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            _ => Err(CoreError::Validation(format!(
                "Invalid run status: '{s}'. Must be one of: PENDING, RUNNING, \
                 COMPLETED, FAILED"
            ))),
        }
    }

    /// Returns the set of valid target statuses reachable from `self`.
    ///
    /// Statuses never regress: terminal states (`Completed`, `Failed`)
    /// return an empty slice.
    pub fn valid_transitions(&self) -> &'static [RunStatus] {
        match self {
            Self::Pending => &[Self::Running, Self::Failed],
            Self::Running => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Check whether a transition from `self` to `to` is valid.
    pub fn can_transition(&self, to: RunStatus) -> bool {
        self.valid_transitions().contains(&to)
    }

    /// Validate a transition, returning a conflict error for invalid ones.
    pub fn validate_transition(&self, to: RunStatus) -> Result<(), CoreError> {
        if self.can_transition(to) {
            Ok(())
        } else {
            Err(CoreError::Conflict(format!(
                "Invalid run transition: {self} -> {to}"
            )))
        }
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Scheduler feature flag
// ---------------------------------------------------------------------------

/// Strict parse of the scheduler feature flag.
///
/// Only the exact literal `"true"` enables scheduled orchestration. Any
/// other value (absent, `"false"`, `"1"`, `"TRUE"`, surrounding whitespace)
/// is treated as disabled, so an ambiguous flag fails closed.
pub fn scheduler_flag_enabled(raw: Option<&str>) -> bool {
    raw == Some("true")
}
