//! Eligibility scanner: which (workspace, janitor type) pairs are candidates
//! for this batch.

use custodia_core::janitor::JanitorType;
use custodia_core::types::DbId;
use custodia_db::repositories::WorkspaceRepo;
use sqlx::PgPool;

/// The slice of a workspace the engine needs downstream.
#[derive(Debug, Clone)]
pub struct WorkspaceRef {
    pub id: DbId,
    pub slug: String,
    pub owner_id: DbId,
}

/// One candidate unit of work: a workspace paired with an enabled janitor
/// type. Candidates still have to pass the sequential gate before dispatch.
#[derive(Debug, Clone)]
pub struct CandidatePair {
    pub workspace: WorkspaceRef,
    pub janitor_type: JanitorType,
}

/// Scan every live, configured workspace and expand its enabled janitor
/// types into candidate pairs.
///
/// A workspace whose config has every flag off contributes zero pairs and
/// does not appear in the batch at all. Order is stable within one batch
/// (workspace id, then type declaration order) but callers must not depend
/// on it across batches.
pub async fn eligible_pairs(pool: &PgPool) -> Result<Vec<CandidatePair>, sqlx::Error> {
    let candidates = WorkspaceRepo::list_janitor_candidates(pool).await?;

    let mut pairs = Vec::new();
    for candidate in candidates {
        let workspace = WorkspaceRef {
            id: candidate.workspace_id,
            slug: candidate.slug.clone(),
            owner_id: candidate.owner_id,
        };
        for janitor_type in candidate.toggles().enabled_types() {
            pairs.push(CandidatePair {
                workspace: workspace.clone(),
                janitor_type,
            });
        }
    }

    tracing::debug!(pair_count = pairs.len(), "Eligibility scan complete");
    Ok(pairs)
}
