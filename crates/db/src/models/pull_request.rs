//! Pull request entity model and DTOs.

use custodia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pull_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PullRequest {
    pub id: DbId,
    pub task_id: DbId,
    pub url: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a pull request against a task.
#[derive(Debug, Deserialize)]
pub struct CreatePullRequest {
    pub task_id: DbId,
    pub url: String,
}
