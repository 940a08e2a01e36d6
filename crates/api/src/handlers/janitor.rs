//! Handlers for janitor orchestration endpoints: the scheduler trigger, the
//! manual run trigger, run listings, and the workflow engine's completion
//! webhook.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use custodia_core::error::CoreError;
use custodia_core::janitor::{JanitorType, RunTrigger};
use custodia_core::pagination::{clamp_limit, clamp_offset, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT};
use custodia_core::types::DbId;
use custodia_db::models::janitor_run::RunListParams;
use custodia_db::repositories::{JanitorConfigRepo, JanitorRunRepo, WorkspaceRepo};
use custodia_janitor::scanner::WorkspaceRef;
use custodia_janitor::{dispatcher, gate, orchestrator};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::CronAuth;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Request body for a manual janitor run.
#[derive(Debug, Default, Deserialize)]
pub struct ManualRunRequest {
    /// User to attribute the run to; defaults to the workspace owner.
    #[serde(default)]
    pub triggered_by: Option<DbId>,
}

/// Request body the workflow engine posts when a run finishes.
#[derive(Debug, Deserialize)]
pub struct RunWebhookRequest {
    /// Engine-side terminal status: `completed`, `failed`, `error`, or
    /// `halted`.
    pub status: String,
    /// Optional failure detail from the engine.
    #[serde(default)]
    pub error: Option<String>,
}

// ---------------------------------------------------------------------------
// POST /janitors/scheduler/run
// ---------------------------------------------------------------------------

/// Run one orchestration batch, invoked by a timer.
///
/// Always answers 200 with the report when the batch ran: partial failure
/// is `success: false` plus a populated `errors` array, never a non-200.
/// Only a scan-level failure (the batch could not run at all) yields 500,
/// with a generic body that never carries internal details.
pub async fn run_scheduler(_auth: CronAuth, State(state): State<AppState>) -> Response {
    match orchestrator::run(&state.pool, state.engine.as_ref(), &state.janitor).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "Orchestration batch could not run");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({
                    "success": false,
                    "error": "Internal server error",
                    "timestamp": chrono::Utc::now(),
                })),
            )
                .into_response()
        }
    }
}

// ---------------------------------------------------------------------------
// Workspace-scoped run endpoints
// ---------------------------------------------------------------------------

/// Resolve a workspace slug and janitor type from the path.
async fn resolve_pair(
    state: &AppState,
    slug: &str,
    janitor_type: &str,
) -> AppResult<(WorkspaceRef, JanitorType)> {
    let janitor_type = JanitorType::from_str(janitor_type)?;
    let workspace = WorkspaceRepo::find_by_slug(&state.pool, slug)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Workspace",
                key: slug.to_string(),
            })
        })?;
    Ok((
        WorkspaceRef {
            id: workspace.id,
            slug: workspace.slug,
            owner_id: workspace.owner_id,
        },
        janitor_type,
    ))
}

/// POST /workspaces/{slug}/janitors/{janitor_type}/runs
///
/// Manually trigger one janitor run. The sequential gate still applies: a
/// blocked pair answers 409 rather than silently skipping, since a human
/// asked for it explicitly.
pub async fn manual_run(
    _auth: CronAuth,
    State(state): State<AppState>,
    Path((slug, janitor_type)): Path<(String, String)>,
    Json(body): Json<ManualRunRequest>,
) -> AppResult<impl IntoResponse> {
    let (workspace, janitor_type) = resolve_pair(&state, &slug, &janitor_type).await?;

    let config = JanitorConfigRepo::get(&state.pool, workspace.id).await?;
    let enabled = config.is_some_and(|c| c.toggles().is_enabled(janitor_type));
    if !enabled {
        return Err(CoreError::Validation(format!(
            "Janitor {janitor_type} is not enabled for workspace '{}'",
            workspace.slug
        ))
        .into());
    }

    if gate::is_blocked(&state.pool, workspace.id, janitor_type).await? {
        return Err(CoreError::Conflict(format!(
            "Janitor {janitor_type} already has an active task for workspace '{}'",
            workspace.slug
        ))
        .into());
    }

    let triggered_by = body.triggered_by.unwrap_or(workspace.owner_id);
    let outcome = dispatcher::dispatch(
        &state.pool,
        state.engine.as_ref(),
        &state.janitor,
        &workspace,
        janitor_type,
        RunTrigger::Manual,
        triggered_by,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(DataResponse { data: outcome.run })))
}

/// GET /workspaces/{slug}/janitors/{janitor_type}/runs
///
/// List a workspace's runs of one janitor type, newest first.
pub async fn list_runs(
    _auth: CronAuth,
    State(state): State<AppState>,
    Path((slug, janitor_type)): Path<(String, String)>,
    Query(params): Query<RunListParams>,
) -> AppResult<impl IntoResponse> {
    let (workspace, janitor_type) = resolve_pair(&state, &slug, &janitor_type).await?;

    let limit = clamp_limit(params.limit, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT);
    let offset = clamp_offset(params.offset);

    let runs =
        JanitorRunRepo::list_for_workspace(&state.pool, workspace.id, janitor_type, limit, offset)
            .await?;

    Ok(Json(DataResponse { data: runs }))
}

// ---------------------------------------------------------------------------
// POST /janitors/runs/{id}/webhook
// ---------------------------------------------------------------------------

/// Completion callback from the workflow engine.
///
/// Maps the engine's terminal status onto the run state machine:
/// `RUNNING -> COMPLETED` or `RUNNING -> FAILED`. A run that is not in a
/// state to accept the transition answers 409; statuses never regress.
pub async fn run_webhook(
    _auth: CronAuth,
    State(state): State<AppState>,
    Path(run_id): Path<DbId>,
    Json(body): Json<RunWebhookRequest>,
) -> AppResult<impl IntoResponse> {
    let run = JanitorRunRepo::find_by_id(&state.pool, run_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "JanitorRun",
            id: run_id,
        }))?;

    let updated = match body.status.as_str() {
        "completed" => JanitorRunRepo::complete(&state.pool, run_id).await?,
        "failed" | "error" | "halted" => {
            let message = body
                .error
                .unwrap_or_else(|| "workflow engine reported failure".to_string());
            JanitorRunRepo::mark_failed(&state.pool, run_id, &message).await?
        }
        other => {
            return Err(CoreError::Validation(format!(
                "Unknown run outcome status: '{other}'"
            ))
            .into())
        }
    };

    let updated = updated.ok_or_else(|| {
        AppError::Core(CoreError::Conflict(format!(
            "Run {run_id} in status {} cannot accept outcome '{}'",
            run.status, body.status
        )))
    })?;

    tracing::info!(
        run_id,
        status = %updated.status,
        "Janitor run closed by engine webhook"
    );

    Ok(Json(DataResponse { data: updated }))
}
