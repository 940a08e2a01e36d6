//! Repository for the `janitor_runs` table.
//!
//! Status updates are guarded in SQL: each transition query matches only
//! the states the core state machine allows it to leave from, so a stale or
//! duplicate update returns `None` instead of regressing the status.

use custodia_core::janitor::JanitorType;
use custodia_core::types::DbId;
use sqlx::PgPool;

use crate::models::janitor_run::{CreateJanitorRun, JanitorRun};

/// Column list for `janitor_runs` queries.
const COLUMNS: &str = "id, workspace_id, janitor_type, status, triggered_by, \
                       external_run_id, error, started_at, completed_at, metadata, \
                       created_at, updated_at";

/// Lifecycle operations for janitor runs.
pub struct JanitorRunRepo;

impl JanitorRunRepo {
    /// Create a run row in its initial `PENDING` state.
    pub async fn create(
        pool: &PgPool,
        input: &CreateJanitorRun,
    ) -> Result<JanitorRun, sqlx::Error> {
        let query = format!(
            "INSERT INTO janitor_runs (workspace_id, janitor_type, triggered_by, metadata) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JanitorRun>(&query)
            .bind(input.workspace_id)
            .bind(input.janitor_type.as_str())
            .bind(input.triggered_by.as_str())
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// Transition `PENDING -> RUNNING` after the workflow engine accepted
    /// the start request. Sets the external correlation id and `started_at`.
    /// Returns `None` if the run was not in `PENDING`.
    pub async fn mark_running(
        pool: &PgPool,
        id: DbId,
        external_run_id: &str,
    ) -> Result<Option<JanitorRun>, sqlx::Error> {
        let query = format!(
            "UPDATE janitor_runs \
             SET status = 'RUNNING', external_run_id = $2, started_at = now() \
             WHERE id = $1 AND status = 'PENDING' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JanitorRun>(&query)
            .bind(id)
            .bind(external_run_id)
            .fetch_optional(pool)
            .await
    }

    /// Transition `PENDING|RUNNING -> FAILED` with a sanitized error
    /// message. Returns `None` if the run was already terminal.
    pub async fn mark_failed(
        pool: &PgPool,
        id: DbId,
        error: &str,
    ) -> Result<Option<JanitorRun>, sqlx::Error> {
        let query = format!(
            "UPDATE janitor_runs \
             SET status = 'FAILED', error = $2, completed_at = now() \
             WHERE id = $1 AND status IN ('PENDING', 'RUNNING') \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JanitorRun>(&query)
            .bind(id)
            .bind(error)
            .fetch_optional(pool)
            .await
    }

    /// Transition `RUNNING -> COMPLETED` when the engine's webhook reports
    /// success. Returns `None` if the run was not in `RUNNING`.
    pub async fn complete(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<JanitorRun>, sqlx::Error> {
        let query = format!(
            "UPDATE janitor_runs \
             SET status = 'COMPLETED', completed_at = now() \
             WHERE id = $1 AND status = 'RUNNING' \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JanitorRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up a run by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<JanitorRun>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM janitor_runs WHERE id = $1");
        sqlx::query_as::<_, JanitorRun>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a workspace's runs of one janitor type, newest first.
    pub async fn list_for_workspace(
        pool: &PgPool,
        workspace_id: DbId,
        janitor_type: JanitorType,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<JanitorRun>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM janitor_runs \
             WHERE workspace_id = $1 AND janitor_type = $2 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, JanitorRun>(&query)
            .bind(workspace_id)
            .bind(janitor_type.as_str())
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
