//! Sequential gate checker.
//!
//! For janitor types whose policy is sequential, at most one active task
//! may exist per workspace: dispatching a second workflow against the same
//! repository would produce colliding branches. The gate reads the newest
//! task snapshot for the pair and applies the core classification. The
//! read is a point-in-time snapshot, not a lock; invocations are assumed
//! not to overlap.

use custodia_core::error::CoreError;
use custodia_core::janitor::JanitorType;
use custodia_core::types::DbId;
use custodia_db::repositories::TaskRepo;
use sqlx::PgPool;

/// Errors from a gate check. The orchestration loop treats these as
/// pair-level: the pair is reported and skipped, never dispatched, since
/// proceeding on an unknown gate state could start a colliding workflow.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error(transparent)]
    Decode(#[from] CoreError),
}

/// Whether a new run of `janitor_type` for `workspace_id` must be skipped
/// because a prior task is still active.
///
/// Non-sequential types are never blocked. Sequential types are blocked
/// unless the pair has no task at all, or its newest task is discarded
/// (cancelled, failed workflow, or terminal pull request).
pub async fn is_blocked(
    pool: &PgPool,
    workspace_id: DbId,
    janitor_type: JanitorType,
) -> Result<bool, GateError> {
    if !janitor_type.policy().sequential {
        return Ok(false);
    }

    let Some(row) = TaskRepo::latest_gate_snapshot(pool, workspace_id, janitor_type).await?
    else {
        return Ok(false);
    };

    let snapshot = row.into_snapshot()?;
    let blocked = snapshot.blocks_new_run();

    if blocked {
        tracing::debug!(
            workspace_id,
            janitor_type = %janitor_type,
            "Sequential gate: active task found, pair blocked"
        );
    }

    Ok(blocked)
}
