//! Repository for the `tasks` table.

use custodia_core::janitor::JanitorType;
use custodia_core::types::DbId;
use sqlx::PgPool;

use crate::models::task::{CreateTask, Task, TaskGateRow};

/// Column list for `tasks` queries.
const COLUMNS: &str =
    "id, workspace_id, title, janitor_type, status, workflow_status, created_at, updated_at";

/// Read/create operations for janitor-initiated tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task.
    pub async fn create(pool: &PgPool, input: &CreateTask) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks (workspace_id, title, janitor_type) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(input.workspace_id)
            .bind(&input.title)
            .bind(&input.janitor_type)
            .fetch_one(pool)
            .await
    }

    /// Update a task's lifecycle and workflow statuses.
    pub async fn set_statuses(
        pool: &PgPool,
        id: DbId,
        status: &str,
        workflow_status: &str,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET status = $2, workflow_status = $3 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(status)
            .bind(workflow_status)
            .fetch_optional(pool)
            .await
    }

    /// The sequential-gate snapshot: the newest task for the
    /// (workspace, janitor type) pair, joined with the status of its newest
    /// pull request. Returns `None` when the pair has no tasks at all.
    pub async fn latest_gate_snapshot(
        pool: &PgPool,
        workspace_id: DbId,
        janitor_type: JanitorType,
    ) -> Result<Option<TaskGateRow>, sqlx::Error> {
        sqlx::query_as::<_, TaskGateRow>(
            "SELECT t.status, t.workflow_status, \
                    (SELECT pr.status FROM pull_requests pr \
                     WHERE pr.task_id = t.id \
                     ORDER BY pr.created_at DESC, pr.id DESC \
                     LIMIT 1) AS pr_status \
             FROM tasks t \
             WHERE t.workspace_id = $1 AND t.janitor_type = $2 \
             ORDER BY t.created_at DESC, t.id DESC \
             LIMIT 1",
        )
        .bind(workspace_id)
        .bind(janitor_type.as_str())
        .fetch_optional(pool)
        .await
    }
}
