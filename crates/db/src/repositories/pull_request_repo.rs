//! Repository for the `pull_requests` table.

use custodia_core::types::DbId;
use sqlx::PgPool;

use crate::models::pull_request::{CreatePullRequest, PullRequest};

/// Column list for `pull_requests` queries.
const COLUMNS: &str = "id, task_id, url, status, created_at, updated_at";

/// Read/create operations for task pull requests.
pub struct PullRequestRepo;

impl PullRequestRepo {
    /// Record a pull request against a task, initially `OPEN`.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePullRequest,
    ) -> Result<PullRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO pull_requests (task_id, url) \
             VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PullRequest>(&query)
            .bind(input.task_id)
            .bind(&input.url)
            .fetch_one(pool)
            .await
    }

    /// Update a pull request's status.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<PullRequest>, sqlx::Error> {
        let query = format!(
            "UPDATE pull_requests SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PullRequest>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}
