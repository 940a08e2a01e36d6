pub mod health;
pub mod janitor;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /janitors/scheduler/run                          run one batch (POST, cron)
/// /janitors/runs/{id}/webhook                      engine completion callback (POST)
///
/// /workspaces/{slug}/janitors/{type}/runs          list runs, manual trigger (GET, POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(janitor::router())
}
