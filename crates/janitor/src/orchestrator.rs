//! The orchestration loop: flag gate, scan, per-pair gate + dispatch,
//! aggregate report.

use std::collections::HashSet;

use chrono::Utc;
use custodia_core::janitor::{JanitorType, RunTrigger};
use custodia_core::types::Timestamp;
use custodia_workflow::WorkflowDispatch;
use serde::Serialize;
use sqlx::PgPool;

use crate::settings::JanitorSettings;
use crate::{dispatcher, gate, scanner};

/// One failed (workspace, janitor type) pair in a batch.
#[derive(Debug, Clone, Serialize)]
pub struct ReportError {
    pub workspace_slug: String,
    pub janitor_type: JanitorType,
    pub error: String,
}

/// Aggregate outcome of one orchestration invocation. Ephemeral: returned
/// to the caller and logged, never persisted.
#[derive(Debug, Serialize)]
pub struct OrchestrationReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub workspaces_processed: usize,
    pub runs_created: usize,
    pub error_count: usize,
    pub errors: Vec<ReportError>,
    pub timestamp: Timestamp,
}

impl OrchestrationReport {
    /// The short-circuit report when the scheduler flag is off: all-zero
    /// counts, successful, no reads or writes performed.
    pub fn disabled() -> Self {
        Self {
            success: true,
            message: Some("Scheduled janitor runs are disabled".to_string()),
            workspaces_processed: 0,
            runs_created: 0,
            error_count: 0,
            errors: Vec::new(),
            timestamp: Utc::now(),
        }
    }
}

/// Run one orchestration batch.
///
/// Per-pair failures (engine rejections, gate read errors, row-update
/// errors) are recorded in the report and never abort the batch. Only the
/// scan itself is fatal: a storage failure while listing workspaces
/// propagates as `Err` for the boundary handler to convert.
pub async fn run(
    pool: &PgPool,
    engine: &dyn WorkflowDispatch,
    settings: &JanitorSettings,
) -> Result<OrchestrationReport, sqlx::Error> {
    if !settings.scheduled_enabled {
        return Ok(OrchestrationReport::disabled());
    }

    let pairs = scanner::eligible_pairs(pool).await?;

    let mut processed: HashSet<i64> = HashSet::new();
    let mut runs_created = 0usize;
    let mut errors: Vec<ReportError> = Vec::new();

    for pair in &pairs {
        match gate::is_blocked(pool, pair.workspace.id, pair.janitor_type).await {
            // Blocked pairs are skipped quietly: not an error, no report entry.
            Ok(true) => continue,
            Ok(false) => {}
            Err(err) => {
                // Fail safe: an unknown gate state is treated as blocked,
                // but unlike a clean block it is surfaced in the report.
                tracing::error!(
                    workspace = %pair.workspace.slug,
                    janitor_type = %pair.janitor_type,
                    error = %err,
                    "Sequential gate check failed; skipping pair"
                );
                processed.insert(pair.workspace.id);
                errors.push(ReportError {
                    workspace_slug: pair.workspace.slug.clone(),
                    janitor_type: pair.janitor_type,
                    error: "sequential gate check failed".to_string(),
                });
                continue;
            }
        }

        match dispatcher::dispatch(
            pool,
            engine,
            settings,
            &pair.workspace,
            pair.janitor_type,
            RunTrigger::Scheduled,
            pair.workspace.owner_id,
        )
        .await
        {
            Ok(outcome) => {
                processed.insert(pair.workspace.id);
                match outcome.error {
                    None => runs_created += 1,
                    Some(error) => errors.push(ReportError {
                        workspace_slug: pair.workspace.slug.clone(),
                        janitor_type: pair.janitor_type,
                        error,
                    }),
                }
            }
            Err(err) => {
                processed.insert(pair.workspace.id);
                tracing::error!(
                    workspace = %pair.workspace.slug,
                    janitor_type = %pair.janitor_type,
                    error = %err,
                    "Janitor dispatch hit a storage error; continuing batch"
                );
                errors.push(ReportError {
                    workspace_slug: pair.workspace.slug.clone(),
                    janitor_type: pair.janitor_type,
                    error: "storage error during dispatch".to_string(),
                });
            }
        }
    }

    let report = OrchestrationReport {
        success: errors.is_empty(),
        message: None,
        workspaces_processed: processed.len(),
        runs_created,
        error_count: errors.len(),
        errors,
        timestamp: Utc::now(),
    };

    tracing::info!(
        workspaces_processed = report.workspaces_processed,
        runs_created = report.runs_created,
        error_count = report.error_count,
        "Orchestration batch finished"
    );

    Ok(report)
}
