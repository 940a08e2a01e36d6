//! Pure classification of janitor-created tasks for the sequential gate.
//!
//! A sequential janitor type must not be dispatched for a workspace while a
//! prior task from the same janitor is still being worked on. The gate
//! checker reads the newest task snapshot for the pair from the database and
//! applies [`TaskGateSnapshot::blocks_new_run`], keeping the decision logic
//! here, pool-free, so it can be tested exhaustively without a database.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// TaskStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
    Cancelled,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "TODO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
            Self::Cancelled => "CANCELLED",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "TODO" => Ok(Self::Todo),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "DONE" => Ok(Self::Done),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid task status: '{s}'. Must be one of: TODO, IN_PROGRESS, \
                 DONE, CANCELLED"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// TaskWorkflowStatus
// ---------------------------------------------------------------------------

/// Status of the external workflow that is producing the task's changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskWorkflowStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl TaskWorkflowStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "FAILED" => Ok(Self::Failed),
            _ => Err(CoreError::Validation(format!(
                "Invalid task workflow status: '{s}'. Must be one of: PENDING, \
                 IN_PROGRESS, COMPLETED, FAILED"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// PullRequestStatus
// ---------------------------------------------------------------------------

/// Status of a pull request produced by a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PullRequestStatus {
    Open,
    Merged,
    Closed,
}

impl PullRequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Merged => "MERGED",
            Self::Closed => "CLOSED",
        }
    }

    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            "OPEN" => Ok(Self::Open),
            "MERGED" => Ok(Self::Merged),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(CoreError::Validation(format!(
                "Invalid pull request status: '{s}'. Must be one of: OPEN, \
                 MERGED, CLOSED"
            ))),
        }
    }

    /// A merged or closed pull request means the unit of work is finished.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Merged | Self::Closed)
    }
}

// ---------------------------------------------------------------------------
// TaskGateSnapshot
// ---------------------------------------------------------------------------

/// Point-in-time view of the newest task for a (workspace, janitor type)
/// pair: its lifecycle status, its workflow status, and the status of its
/// newest pull request (if any).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskGateSnapshot {
    pub task_status: TaskStatus,
    pub workflow_status: TaskWorkflowStatus,
    pub pr_status: Option<PullRequestStatus>,
}

impl TaskGateSnapshot {
    /// Whether the task is discarded: cancelled, abandoned by a failed
    /// workflow, or finished through a terminal pull request.
    pub fn is_discarded(&self) -> bool {
        self.task_status == TaskStatus::Cancelled
            || self.workflow_status == TaskWorkflowStatus::Failed
            || self.pr_status.is_some_and(|pr| pr.is_terminal())
    }

    /// Whether this task blocks a new run of the same sequential janitor
    /// type for the workspace. Anything not discarded is still active.
    pub fn blocks_new_run(&self) -> bool {
        !self.is_discarded()
    }
}
