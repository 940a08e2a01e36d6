//! Repository for the `swarms` table.

use custodia_core::types::DbId;
use sqlx::PgPool;

use crate::models::swarm::{CreateSwarm, Swarm};

/// Column list for `swarms` queries.
const COLUMNS: &str = "id, workspace_id, swarm_url, swarm_secret_alias, ignore_dirs, \
                       created_at, updated_at";

/// Read/create operations for swarm connection records.
pub struct SwarmRepo;

impl SwarmRepo {
    /// Insert a swarm record for a workspace.
    pub async fn create(pool: &PgPool, input: &CreateSwarm) -> Result<Swarm, sqlx::Error> {
        let query = format!(
            "INSERT INTO swarms (workspace_id, swarm_url, swarm_secret_alias, ignore_dirs) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Swarm>(&query)
            .bind(input.workspace_id)
            .bind(&input.swarm_url)
            .bind(&input.swarm_secret_alias)
            .bind(&input.ignore_dirs)
            .fetch_one(pool)
            .await
    }

    /// The swarm record for a workspace, if provisioned.
    pub async fn find_by_workspace(
        pool: &PgPool,
        workspace_id: DbId,
    ) -> Result<Option<Swarm>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM swarms WHERE workspace_id = $1");
        sqlx::query_as::<_, Swarm>(&query)
            .bind(workspace_id)
            .fetch_optional(pool)
            .await
    }
}
