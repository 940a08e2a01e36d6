//! In-process scheduler for janitor orchestration.
//!
//! Spawns a loop that runs one orchestration batch per interval using
//! `tokio::time::interval`. Batches never overlap: each cycle awaits the
//! previous batch before the next tick is taken. The flag gate inside the
//! orchestrator makes every cycle a no-op while scheduled runs are
//! disabled, so the loop is safe to start unconditionally.

use std::sync::Arc;
use std::time::Duration;

use custodia_db::DbPool;
use custodia_janitor::{orchestrator, JanitorSettings};
use custodia_workflow::WorkflowDispatch;
use tokio_util::sync::CancellationToken;

/// Run the janitor scheduler loop until `cancel` is triggered.
pub async fn run(
    pool: DbPool,
    engine: Arc<dyn WorkflowDispatch>,
    settings: Arc<JanitorSettings>,
    cancel: CancellationToken,
) {
    tracing::info!(
        enabled = settings.scheduled_enabled,
        interval_secs = settings.interval_secs,
        "Janitor scheduler started"
    );

    let mut interval = tokio::time::interval(Duration::from_secs(settings.interval_secs));

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Janitor scheduler stopping");
                break;
            }
            _ = interval.tick() => {
                match orchestrator::run(&pool, engine.as_ref(), &settings).await {
                    Ok(report) => {
                        if report.runs_created > 0 || report.error_count > 0 {
                            tracing::info!(
                                workspaces_processed = report.workspaces_processed,
                                runs_created = report.runs_created,
                                error_count = report.error_count,
                                "Janitor scheduler cycle finished"
                            );
                        } else {
                            tracing::debug!("Janitor scheduler cycle: nothing to dispatch");
                        }
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Janitor scheduler cycle failed");
                    }
                }
            }
        }
    }
}
