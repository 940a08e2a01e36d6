//! Repository for the `workspaces` table.

use custodia_core::types::DbId;
use sqlx::PgPool;

use crate::models::workspace::{CreateWorkspace, JanitorCandidate, Workspace};

/// Column list for `workspaces` queries.
const COLUMNS: &str =
    "id, slug, name, owner_id, deleted, deleted_at, created_at, updated_at";

/// CRUD and scan operations for workspaces (tenants).
///
/// Workspaces are soft-deleted: `find_*` and scan queries exclude rows
/// where `deleted = TRUE`.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Insert a new workspace.
    pub async fn create(
        pool: &PgPool,
        input: &CreateWorkspace,
    ) -> Result<Workspace, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspaces (slug, name, owner_id) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(&input.slug)
            .bind(&input.name)
            .bind(input.owner_id)
            .fetch_one(pool)
            .await
    }

    /// Look up a live workspace by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM workspaces WHERE id = $1 AND deleted = FALSE");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Look up a live workspace by slug.
    pub async fn find_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM workspaces WHERE slug = $1 AND deleted = FALSE");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a workspace. Returns `false` if it was already deleted
    /// or does not exist.
    pub async fn soft_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE workspaces SET deleted = TRUE, deleted_at = now() \
             WHERE id = $1 AND deleted = FALSE",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Scan query for the eligibility scanner: every live workspace that
    /// has a janitor configuration, with its flags. Workspaces without a
    /// config row are not candidates and are excluded by the join.
    pub async fn list_janitor_candidates(
        pool: &PgPool,
    ) -> Result<Vec<JanitorCandidate>, sqlx::Error> {
        sqlx::query_as::<_, JanitorCandidate>(
            "SELECT w.id AS workspace_id, w.slug, w.owner_id, \
                    c.unit_tests_enabled, c.integration_tests_enabled, \
                    c.e2e_tests_enabled, c.security_review_enabled \
             FROM workspaces w \
             JOIN janitor_configs c ON c.workspace_id = w.id \
             WHERE w.deleted = FALSE \
             ORDER BY w.id",
        )
        .fetch_all(pool)
        .await
    }
}
