//! Workspace (tenant) entity model and DTOs.

use custodia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `workspaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: DbId,
    pub slug: String,
    pub name: String,
    pub owner_id: DbId,
    pub deleted: bool,
    pub deleted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a workspace.
#[derive(Debug, Deserialize)]
pub struct CreateWorkspace {
    pub slug: String,
    pub name: String,
    pub owner_id: DbId,
}

/// Scan row for the eligibility scanner: a live workspace joined with its
/// janitor configuration flags.
#[derive(Debug, Clone, FromRow)]
pub struct JanitorCandidate {
    pub workspace_id: DbId,
    pub slug: String,
    pub owner_id: DbId,
    pub unit_tests_enabled: bool,
    pub integration_tests_enabled: bool,
    pub e2e_tests_enabled: bool,
    pub security_review_enabled: bool,
}

impl JanitorCandidate {
    /// The configuration flags as the core toggle set.
    pub fn toggles(&self) -> custodia_core::janitor::JanitorToggles {
        custodia_core::janitor::JanitorToggles {
            unit_tests: self.unit_tests_enabled,
            integration_tests: self.integration_tests_enabled,
            e2e_tests: self.e2e_tests_enabled,
            security_review: self.security_review_enabled,
        }
    }
}
