//! Shared response envelope types for API handlers.
//!
//! All resource responses use a `{ "data": ... }` envelope. Use
//! [`DataResponse`] instead of ad-hoc `serde_json::json!({ "data": ... })`
//! to get compile-time type safety and consistent serialization. The
//! orchestration report endpoint is the one exception: it returns the
//! report fields at the top level, since its callers are timers, not the
//! resource UI.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
