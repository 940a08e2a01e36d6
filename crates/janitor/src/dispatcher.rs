//! Run dispatcher: one admitted (workspace, janitor type) pair in, one
//! `JanitorRun` row out.
//!
//! The row is created in `PENDING` before the engine is contacted, then
//! moved to `RUNNING` (with the engine's correlation id) or `FAILED` (with
//! a sanitized message). Engine failures are returned as values inside
//! [`DispatchOutcome`] so the batch loop can record them without
//! unwinding; only database errors propagate as `Err`.

use custodia_core::janitor::{JanitorType, RunTrigger};
use custodia_core::types::DbId;
use custodia_db::models::janitor_run::{CreateJanitorRun, JanitorRun};
use custodia_db::repositories::{
    JanitorRunRepo, RepositoryRepo, ScmCredentialRepo, SwarmRepo,
};
use custodia_workflow::{StartRunRequest, WorkflowDispatch};
use sqlx::PgPool;

use crate::scanner::WorkspaceRef;
use crate::settings::JanitorSettings;

/// The result of one dispatch attempt: the final run row, plus the
/// sanitized error message when the engine call failed.
#[derive(Debug)]
pub struct DispatchOutcome {
    pub run: JanitorRun,
    pub error: Option<String>,
}

/// Dispatch one janitor run for a workspace.
///
/// The pass-through parameters (repository URL, ignore dirs, swarm
/// connection, source-control credentials) come from read-only
/// collaborators; a missing record degrades to `null` fields in the
/// payload rather than failing the dispatch.
pub async fn dispatch(
    pool: &PgPool,
    engine: &dyn WorkflowDispatch,
    settings: &JanitorSettings,
    workspace: &WorkspaceRef,
    janitor_type: JanitorType,
    trigger: RunTrigger,
    triggered_by_user: DbId,
) -> Result<DispatchOutcome, sqlx::Error> {
    let run = JanitorRunRepo::create(
        pool,
        &CreateJanitorRun {
            workspace_id: workspace.id,
            janitor_type,
            triggered_by: trigger,
            metadata: serde_json::json!({
                "triggered_by_user_id": triggered_by_user,
                "workspace_id": workspace.id,
            }),
        },
    )
    .await?;

    let repository = RepositoryRepo::first_for_workspace(pool, workspace.id).await?;
    let swarm = SwarmRepo::find_by_workspace(pool, workspace.id).await?;
    let credentials = ScmCredentialRepo::find_by_user(pool, triggered_by_user).await?;

    let request = StartRunRequest {
        workflow_id: settings.workflow_ids.for_type(janitor_type),
        janitor_type,
        workspace_id: workspace.id,
        repository_url: repository.map(|r| r.repository_url),
        ignore_dirs: swarm.as_ref().and_then(|s| s.ignore_dirs.clone()),
        swarm_url: swarm.as_ref().map(|s| s.swarm_url.clone()),
        swarm_secret_alias: swarm.and_then(|s| s.swarm_secret_alias),
        username: credentials.as_ref().map(|c| c.username.clone()),
        pat: credentials.map(|c| c.pat),
        webhook_url: settings.run_webhook_url(run.id),
    };

    match engine.start_run(&request).await {
        Ok(started) => {
            let run = JanitorRunRepo::mark_running(pool, run.id, &started.external_id)
                .await?
                .unwrap_or(run);
            tracing::info!(
                run_id = run.id,
                workspace = %workspace.slug,
                janitor_type = %janitor_type,
                external_run_id = %started.external_id,
                "Janitor run dispatched"
            );
            Ok(DispatchOutcome { run, error: None })
        }
        Err(err) => {
            let message = err.sanitized();
            tracing::warn!(
                run_id = run.id,
                workspace = %workspace.slug,
                janitor_type = %janitor_type,
                error = %err,
                "Janitor dispatch failed"
            );
            let run = JanitorRunRepo::mark_failed(pool, run.id, &message)
                .await?
                .unwrap_or(run);
            Ok(DispatchOutcome {
                run,
                error: Some(message),
            })
        }
    }
}
