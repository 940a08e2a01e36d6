//! Integration tests for workspace tenancy: slugs, soft delete, the
//! eligibility scan query, and the sequential-gate snapshot query.

use assert_matches::assert_matches;
use custodia_core::janitor::JanitorType;
use custodia_db::models::janitor_config::UpdateJanitorConfig;
use custodia_db::models::pull_request::CreatePullRequest;
use custodia_db::models::task::CreateTask;
use custodia_db::models::user::CreateUser;
use custodia_db::models::workspace::{CreateWorkspace, Workspace};
use custodia_db::repositories::{
    JanitorConfigRepo, PullRequestRepo, TaskRepo, UserRepo, WorkspaceRepo,
};
use sqlx::PgPool;

async fn seed_workspace(pool: &PgPool, slug: &str) -> Workspace {
    let owner = UserRepo::create(
        pool,
        &CreateUser {
            display_name: format!("{slug} owner"),
        },
    )
    .await
    .unwrap();
    WorkspaceRepo::create(
        pool,
        &CreateWorkspace {
            slug: slug.to_string(),
            name: slug.to_string(),
            owner_id: owner.id,
        },
    )
    .await
    .unwrap()
}

// ---------------------------------------------------------------------------
// Slugs and soft delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_slug_violates_unique_constraint(pool: PgPool) {
    seed_workspace(&pool, "acme").await;
    let owner = UserRepo::create(
        &pool,
        &CreateUser {
            display_name: "other".to_string(),
        },
    )
    .await
    .unwrap();

    let result = WorkspaceRepo::create(
        &pool,
        &CreateWorkspace {
            slug: "acme".to_string(),
            name: "Acme clone".to_string(),
            owner_id: owner.id,
        },
    )
    .await;

    assert_matches!(result, Err(sqlx::Error::Database(_)), "slug must be unique");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn soft_deleted_workspace_is_hidden_from_lookups(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;

    assert!(WorkspaceRepo::soft_delete(&pool, workspace.id).await.unwrap());
    assert!(WorkspaceRepo::find_by_id(&pool, workspace.id)
        .await
        .unwrap()
        .is_none());
    assert!(WorkspaceRepo::find_by_slug(&pool, "acme")
        .await
        .unwrap()
        .is_none());

    // Second delete is a no-op.
    assert!(!WorkspaceRepo::soft_delete(&pool, workspace.id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Eligibility scan query
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn scan_joins_only_configured_live_workspaces(pool: PgPool) {
    let configured = seed_workspace(&pool, "configured").await;
    JanitorConfigRepo::upsert(
        &pool,
        configured.id,
        &UpdateJanitorConfig {
            unit_tests_enabled: Some(true),
            ..UpdateJanitorConfig::default()
        },
    )
    .await
    .unwrap();

    // No config row: excluded by the join.
    seed_workspace(&pool, "unconfigured").await;

    // Configured but deleted: excluded by the soft-delete filter.
    let deleted = seed_workspace(&pool, "deleted").await;
    JanitorConfigRepo::upsert(&pool, deleted.id, &UpdateJanitorConfig::default())
        .await
        .unwrap();
    WorkspaceRepo::soft_delete(&pool, deleted.id).await.unwrap();

    let candidates = WorkspaceRepo::list_janitor_candidates(&pool).await.unwrap();

    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].slug, "configured");
    assert!(candidates[0].unit_tests_enabled);
    assert!(!candidates[0].security_review_enabled);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn config_upsert_merges_partial_updates(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;

    JanitorConfigRepo::upsert(
        &pool,
        workspace.id,
        &UpdateJanitorConfig {
            unit_tests_enabled: Some(true),
            ..UpdateJanitorConfig::default()
        },
    )
    .await
    .unwrap();

    // A later partial update must not reset the earlier flag.
    let config = JanitorConfigRepo::upsert(
        &pool,
        workspace.id,
        &UpdateJanitorConfig {
            security_review_enabled: Some(true),
            ..UpdateJanitorConfig::default()
        },
    )
    .await
    .unwrap();

    assert!(config.unit_tests_enabled);
    assert!(config.security_review_enabled);
    assert!(!config.e2e_tests_enabled);
}

// ---------------------------------------------------------------------------
// Gate snapshot query
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn gate_snapshot_is_none_without_tasks(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;

    let row = TaskRepo::latest_gate_snapshot(&pool, workspace.id, JanitorType::UnitTests)
        .await
        .unwrap();
    assert!(row.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gate_snapshot_pairs_newest_task_with_newest_pr(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;
    let task = TaskRepo::create(
        &pool,
        &CreateTask {
            workspace_id: workspace.id,
            title: "Add unit tests".to_string(),
            janitor_type: Some("UNIT_TESTS".to_string()),
        },
    )
    .await
    .unwrap();

    let first_pr = PullRequestRepo::create(
        &pool,
        &CreatePullRequest {
            task_id: task.id,
            url: "https://github.com/acme/widget/pull/1".to_string(),
        },
    )
    .await
    .unwrap();
    PullRequestRepo::set_status(&pool, first_pr.id, "CLOSED")
        .await
        .unwrap();
    PullRequestRepo::create(
        &pool,
        &CreatePullRequest {
            task_id: task.id,
            url: "https://github.com/acme/widget/pull/2".to_string(),
        },
    )
    .await
    .unwrap();

    let row = TaskRepo::latest_gate_snapshot(&pool, workspace.id, JanitorType::UnitTests)
        .await
        .unwrap()
        .unwrap();

    // The newest PR (still OPEN) decides, not the closed one.
    assert_eq!(row.pr_status.as_deref(), Some("OPEN"));
    let snapshot = row.into_snapshot().unwrap();
    assert!(snapshot.blocks_new_run());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn gate_snapshot_ignores_other_janitor_types(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;
    TaskRepo::create(
        &pool,
        &CreateTask {
            workspace_id: workspace.id,
            title: "Security sweep".to_string(),
            janitor_type: Some("SECURITY_REVIEW".to_string()),
        },
    )
    .await
    .unwrap();

    let row = TaskRepo::latest_gate_snapshot(&pool, workspace.id, JanitorType::UnitTests)
        .await
        .unwrap();
    assert!(row.is_none());
}
