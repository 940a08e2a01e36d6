//! Source repository entity model and DTOs.

use custodia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `repositories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Repository {
    pub id: DbId,
    pub workspace_id: DbId,
    pub repository_url: String,
    pub branch: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a repository with a workspace.
#[derive(Debug, Deserialize)]
pub struct CreateRepository {
    pub workspace_id: DbId,
    pub repository_url: String,
    pub branch: Option<String>,
}
