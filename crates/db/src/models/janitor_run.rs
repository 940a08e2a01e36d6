//! Janitor run entity model and DTOs.

use custodia_core::error::CoreError;
use custodia_core::janitor::{JanitorType, RunStatus, RunTrigger};
use custodia_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `janitor_runs` table: one dispatch attempt.
///
/// Status columns are stored as their wire-format strings; use
/// [`JanitorRun::status`] and friends to decode into the core enums.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JanitorRun {
    pub id: DbId,
    pub workspace_id: DbId,
    pub janitor_type: String,
    pub status: String,
    pub triggered_by: String,
    pub external_run_id: Option<String>,
    pub error: Option<String>,
    pub started_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl JanitorRun {
    /// Decode the stored status string.
    pub fn status(&self) -> Result<RunStatus, CoreError> {
        RunStatus::from_str(&self.status)
    }

    /// Decode the stored janitor type string.
    pub fn janitor_type(&self) -> Result<JanitorType, CoreError> {
        JanitorType::from_str(&self.janitor_type)
    }

    /// Decode the stored trigger string.
    pub fn triggered_by(&self) -> Result<RunTrigger, CoreError> {
        RunTrigger::from_str(&self.triggered_by)
    }
}

/// DTO for creating a run row in its initial `PENDING` state.
#[derive(Debug)]
pub struct CreateJanitorRun {
    pub workspace_id: DbId,
    pub janitor_type: JanitorType,
    pub triggered_by: RunTrigger,
    pub metadata: serde_json::Value,
}

/// Query parameters for listing runs.
#[derive(Debug, Deserialize)]
pub struct RunListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
