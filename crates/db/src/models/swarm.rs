//! Swarm connection entity model and DTOs.
//!
//! A swarm is the per-workspace execution environment the workflow engine
//! connects to. This service only reads these rows to fill the dispatch
//! payload; provisioning happens elsewhere.

use custodia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `swarms` table (1:1 with a workspace).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Swarm {
    pub id: DbId,
    pub workspace_id: DbId,
    pub swarm_url: String,
    pub swarm_secret_alias: Option<String>,
    pub ignore_dirs: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a swarm record.
#[derive(Debug, Deserialize)]
pub struct CreateSwarm {
    pub workspace_id: DbId,
    pub swarm_url: String,
    pub swarm_secret_alias: Option<String>,
    pub ignore_dirs: Option<String>,
}
