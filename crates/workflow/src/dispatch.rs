//! The dispatch seam: request/response types and the engine trait.

use async_trait::async_trait;
use custodia_core::janitor::JanitorType;
use custodia_core::types::DbId;

/// Everything the engine needs to start one janitor workflow.
///
/// The nullable fields are opaque pass-through values from read-only
/// collaborators; their absence degrades to `null` in the payload rather
/// than failing the dispatch.
#[derive(Debug, Clone)]
pub struct StartRunRequest {
    /// Engine-side workflow definition to execute.
    pub workflow_id: i64,
    pub janitor_type: JanitorType,
    pub workspace_id: DbId,
    pub repository_url: Option<String>,
    pub ignore_dirs: Option<String>,
    pub swarm_url: Option<String>,
    pub swarm_secret_alias: Option<String>,
    pub username: Option<String>,
    pub pat: Option<String>,
    /// URL the engine calls back with the run outcome.
    pub webhook_url: String,
}

/// A successfully accepted start request.
#[derive(Debug, Clone)]
pub struct StartedRun {
    /// The engine's correlation id for the run; echoed back on the webhook.
    pub external_id: String,
}

/// Errors from the workflow engine layer.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The engine returned a non-2xx status code.
    #[error("Workflow engine error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for internal logging only.
        body: String,
    },

    /// A 2xx response whose body carried no run identifier. Without the id
    /// the completion webhook could never be correlated, so the dispatch
    /// counts as failed.
    #[error("Workflow engine response missing run identifier")]
    MissingRunId,
}

impl WorkflowError {
    /// A short message safe to persist and return to callers. Never
    /// includes response bodies or transport error chains, which can carry
    /// credentials.
    pub fn sanitized(&self) -> String {
        match self {
            Self::Request(_) => "request to workflow engine failed".to_string(),
            Self::Api { status, .. } => {
                format!("workflow engine returned status {status}")
            }
            Self::MissingRunId => {
                "workflow engine response missing run identifier".to_string()
            }
        }
    }
}

/// Seam trait for starting workflow runs.
///
/// [`crate::WorkflowApi`] is the production implementation; orchestrator
/// tests substitute a scripted mock.
#[async_trait]
pub trait WorkflowDispatch: Send + Sync {
    /// Ask the engine to start one run. Resolves as soon as the engine
    /// accepts the request; completion arrives later via webhook.
    async fn start_run(&self, request: &StartRunRequest) -> Result<StartedRun, WorkflowError>;
}
