//! Repository for the `janitor_configs` table.

use custodia_core::types::DbId;
use sqlx::PgPool;

use crate::models::janitor_config::{JanitorConfig, UpdateJanitorConfig};

/// Column list for `janitor_configs` queries.
const COLUMNS: &str = "id, workspace_id, unit_tests_enabled, integration_tests_enabled, \
                       e2e_tests_enabled, security_review_enabled, created_at, updated_at";

/// Operations for per-workspace janitor configuration.
pub struct JanitorConfigRepo;

impl JanitorConfigRepo {
    /// Get a workspace's janitor configuration, if one exists.
    pub async fn get(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Option<JanitorConfig>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM janitor_configs WHERE workspace_id = $1");
        sqlx::query_as::<_, JanitorConfig>(&query)
            .bind(workspace_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a workspace's janitor configuration. Absent fields keep their
    /// current value (or the `FALSE` default on first insert).
    pub async fn upsert(
        pool: &PgPool,
        workspace_id: DbId,
        input: &UpdateJanitorConfig,
    ) -> Result<JanitorConfig, sqlx::Error> {
        let query = format!(
            "INSERT INTO janitor_configs \
                 (workspace_id, unit_tests_enabled, integration_tests_enabled, \
                  e2e_tests_enabled, security_review_enabled) \
             VALUES ($1, COALESCE($2, FALSE), COALESCE($3, FALSE), \
                     COALESCE($4, FALSE), COALESCE($5, FALSE)) \
             ON CONFLICT (workspace_id) DO UPDATE SET \
                 unit_tests_enabled = COALESCE($2, janitor_configs.unit_tests_enabled), \
                 integration_tests_enabled = COALESCE($3, janitor_configs.integration_tests_enabled), \
                 e2e_tests_enabled = COALESCE($4, janitor_configs.e2e_tests_enabled), \
                 security_review_enabled = COALESCE($5, janitor_configs.security_review_enabled) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, JanitorConfig>(&query)
            .bind(workspace_id)
            .bind(input.unit_tests_enabled)
            .bind(input.integration_tests_enabled)
            .bind(input.e2e_tests_enabled)
            .bind(input.security_review_enabled)
            .fetch_one(pool)
            .await
    }
}
