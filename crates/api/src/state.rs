use std::sync::Arc;

use custodia_janitor::JanitorSettings;
use custodia_workflow::WorkflowDispatch;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: custodia_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Orchestration settings shared with the background scheduler.
    pub janitor: Arc<JanitorSettings>,
    /// Workflow engine client behind the dispatch seam, so tests can
    /// substitute a scripted engine.
    pub engine: Arc<dyn WorkflowDispatch>,
}
