//! Route definitions for janitor orchestration.
//!
//! All endpoints are machine-facing and require the shared-secret bearer
//! credential (enforced per-handler via the `CronAuth` extractor).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::janitor;
use crate::state::AppState;

/// Routes mounted under `/api/v1`.
///
/// ```text
/// POST   /janitors/scheduler/run                     -> run_scheduler
/// POST   /janitors/runs/{id}/webhook                 -> run_webhook
/// GET    /workspaces/{slug}/janitors/{type}/runs     -> list_runs
/// POST   /workspaces/{slug}/janitors/{type}/runs     -> manual_run
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/janitors/scheduler/run", post(janitor::run_scheduler))
        .route("/janitors/runs/{id}/webhook", post(janitor::run_webhook))
        .route(
            "/workspaces/{slug}/janitors/{janitor_type}/runs",
            get(janitor::list_runs).post(janitor::manual_run),
        )
}
