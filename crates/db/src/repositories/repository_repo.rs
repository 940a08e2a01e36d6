//! Repository for the `repositories` table.

use custodia_core::types::DbId;
use sqlx::PgPool;

use crate::models::repository::{CreateRepository, Repository};

/// Column list for `repositories` queries.
const COLUMNS: &str = "id, workspace_id, repository_url, branch, created_at, updated_at";

/// Read/create operations for workspace source repositories.
pub struct RepositoryRepo;

impl RepositoryRepo {
    /// Register a repository with a workspace.
    pub async fn create(
        pool: &PgPool,
        input: &CreateRepository,
    ) -> Result<Repository, sqlx::Error> {
        let query = format!(
            "INSERT INTO repositories (workspace_id, repository_url, branch) \
             VALUES ($1, $2, COALESCE($3, 'main')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Repository>(&query)
            .bind(input.workspace_id)
            .bind(&input.repository_url)
            .bind(&input.branch)
            .fetch_one(pool)
            .await
    }

    /// The workspace's primary repository: the earliest-registered row.
    pub async fn first_for_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Option<Repository>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM repositories \
             WHERE workspace_id = $1 \
             ORDER BY id \
             LIMIT 1"
        );
        sqlx::query_as::<_, Repository>(&query)
            .bind(workspace_id)
            .fetch_optional(pool)
            .await
    }
}
