//! Shared-secret bearer extractor for service-to-service endpoints.
//!
//! The scheduler trigger, the manual run endpoints, and the engine webhook
//! are all invoked by machines (a timer, ops tooling, the workflow engine),
//! so they authenticate with the shared `CRON_SECRET` credential rather
//! than a user session.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use custodia_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

/// Proof that the request carried the scheduler's shared-secret bearer
/// token. Use as an extractor parameter on any machine-facing handler:
///
/// ```ignore
/// async fn trigger(_auth: CronAuth, State(state): State<AppState>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct CronAuth;

impl FromRequestParts<AppState> for CronAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        if token != state.config.cron_secret {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid credential".into(),
            )));
        }

        Ok(CronAuth)
    }
}
