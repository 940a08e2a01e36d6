//! Per-workspace janitor configuration entity model and DTOs.

use custodia_core::janitor::JanitorToggles;
use custodia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `janitor_configs` table (1:1 with a workspace).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JanitorConfig {
    pub id: DbId,
    pub workspace_id: DbId,
    pub unit_tests_enabled: bool,
    pub integration_tests_enabled: bool,
    pub e2e_tests_enabled: bool,
    pub security_review_enabled: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl JanitorConfig {
    /// Convert the boolean columns into the core toggle set the
    /// eligibility scanner expands.
    pub fn toggles(&self) -> JanitorToggles {
        JanitorToggles {
            unit_tests: self.unit_tests_enabled,
            integration_tests: self.integration_tests_enabled,
            e2e_tests: self.e2e_tests_enabled,
            security_review: self.security_review_enabled,
        }
    }
}

/// DTO for updating a workspace's janitor configuration. All fields are
/// optional to support partial updates.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateJanitorConfig {
    pub unit_tests_enabled: Option<bool>,
    pub integration_tests_enabled: Option<bool>,
    pub e2e_tests_enabled: Option<bool>,
    pub security_review_enabled: Option<bool>,
}
