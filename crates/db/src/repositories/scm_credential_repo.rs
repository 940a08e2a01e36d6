//! Repository for the `scm_credentials` table.

use custodia_core::types::DbId;
use sqlx::PgPool;

use crate::models::scm_credential::{CreateScmCredential, ScmCredential};

/// Column list for `scm_credentials` queries.
const COLUMNS: &str = "id, user_id, username, pat, created_at, updated_at";

/// Read/upsert operations for per-user source-control credentials.
pub struct ScmCredentialRepo;

impl ScmCredentialRepo {
    /// Upsert a user's credentials. Replaces an existing row.
    pub async fn upsert(
        pool: &PgPool,
        input: &CreateScmCredential,
    ) -> Result<ScmCredential, sqlx::Error> {
        let query = format!(
            "INSERT INTO scm_credentials (user_id, username, pat) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id) DO UPDATE \
             SET username = EXCLUDED.username, pat = EXCLUDED.pat \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ScmCredential>(&query)
            .bind(input.user_id)
            .bind(&input.username)
            .bind(&input.pat)
            .fetch_one(pool)
            .await
    }

    /// A user's credentials, if stored.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<ScmCredential>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scm_credentials WHERE user_id = $1");
        sqlx::query_as::<_, ScmCredential>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
