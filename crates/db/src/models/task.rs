//! Task entity model and DTOs.
//!
//! Tasks are created by the workflow engine as a side effect of janitor
//! runs; the orchestrator only reads them through the sequential gate.

use custodia_core::error::CoreError;
use custodia_core::task_gate::{
    PullRequestStatus, TaskGateSnapshot, TaskStatus, TaskWorkflowStatus,
};
use custodia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub workspace_id: DbId,
    pub title: String,
    pub janitor_type: Option<String>,
    pub status: String,
    pub workflow_status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    pub workspace_id: DbId,
    pub title: String,
    pub janitor_type: Option<String>,
}

/// Newest-task snapshot row returned by the gate query: the task's statuses
/// joined with the status of its newest pull request (if any).
#[derive(Debug, Clone, FromRow)]
pub struct TaskGateRow {
    pub status: String,
    pub workflow_status: String,
    pub pr_status: Option<String>,
}

impl TaskGateRow {
    /// Decode the raw strings into the core snapshot used for gating.
    pub fn into_snapshot(self) -> Result<TaskGateSnapshot, CoreError> {
        Ok(TaskGateSnapshot {
            task_status: TaskStatus::from_str(&self.status)?,
            workflow_status: TaskWorkflowStatus::from_str(&self.workflow_status)?,
            pr_status: self
                .pr_status
                .as_deref()
                .map(PullRequestStatus::from_str)
                .transpose()?,
        })
    }
}
