//! Source-control credential entity model.
//!
//! Read-only to this service: the dispatcher looks up the workspace owner's
//! credentials to pass through to the workflow engine, degrading to nulls
//! when absent. The `pat` value must never appear in logs, stored error
//! strings, or response bodies.

use custodia_core::types::{DbId, Timestamp};
use serde::Deserialize;
use sqlx::FromRow;

/// A row from the `scm_credentials` table (1:1 with a user).
#[derive(Debug, Clone, FromRow)]
pub struct ScmCredential {
    pub id: DbId,
    pub user_id: DbId,
    pub username: String,
    pub pat: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for storing a user's credentials.
#[derive(Debug, Deserialize)]
pub struct CreateScmCredential {
    pub user_id: DbId,
    pub username: String,
    pub pat: String,
}
