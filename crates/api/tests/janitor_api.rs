//! Integration tests for the janitor orchestration endpoints: scheduler
//! trigger auth and report shapes, manual runs, run listing, and the
//! engine's completion webhook.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{body_json, get_authed, post_json, StubEngine};
use custodia_core::janitor::{JanitorType, RunTrigger};
use custodia_db::models::janitor_config::UpdateJanitorConfig;
use custodia_db::models::janitor_run::CreateJanitorRun;
use custodia_db::models::user::CreateUser;
use custodia_db::models::workspace::{CreateWorkspace, Workspace};
use custodia_db::repositories::{JanitorConfigRepo, JanitorRunRepo, UserRepo, WorkspaceRepo};
use sqlx::PgPool;
use tower::ServiceExt;

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

async fn enable_unit_tests(pool: &PgPool, workspace_id: i64) {
    JanitorConfigRepo::upsert(
        pool,
        workspace_id,
        &UpdateJanitorConfig {
            unit_tests_enabled: Some(true),
            ..UpdateJanitorConfig::default()
        },
    )
    .await
    .unwrap();
}

// ---------------------------------------------------------------------------
// Scheduler trigger: authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn trigger_without_bearer_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/janitors/scheduler/run")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    common::assert_unauthorized(response).await;
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn trigger_with_wrong_bearer_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/janitors/scheduler/run")
                .header("authorization", "Bearer not-the-secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    common::assert_unauthorized(response).await;
}

// ---------------------------------------------------------------------------
// Scheduler trigger: report shapes
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn disabled_flag_answers_short_form_report(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;
    enable_unit_tests(&pool, workspace.id).await;

    let engine = StubEngine::new();
    let app = common::build_test_app_with(pool, common::test_settings(false), engine.clone());
    let response = post_json(app, "/api/v1/janitors/scheduler/run", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "Scheduled janitor runs are disabled");
    assert_eq!(json["workspaces_processed"], 0);
    assert_eq!(json["runs_created"], 0);
    assert_eq!(json["errors"], serde_json::json!([]));
    assert_eq!(engine.call_count(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn enabled_flag_runs_the_batch_and_reports(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;
    enable_unit_tests(&pool, workspace.id).await;

    let engine = StubEngine::new();
    let app =
        common::build_test_app_with(pool.clone(), common::test_settings(true), engine.clone());
    let response = post_json(app, "/api/v1/janitors/scheduler/run", serde_json::json!({})).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["workspaces_processed"], 1);
    assert_eq!(json["runs_created"], 1);
    assert_eq!(json["error_count"], 0);
    assert!(json.get("message").is_none());
    assert_eq!(engine.call_count(), 1);

    let runs =
        JanitorRunRepo::list_for_workspace(&pool, workspace.id, JanitorType::UnitTests, 10, 0)
            .await
            .unwrap();
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].status, "RUNNING");
}

// ---------------------------------------------------------------------------
// Manual runs
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn manual_run_on_unknown_workspace_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/workspaces/nope/janitors/UNIT_TESTS/runs",
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn manual_run_with_bad_type_is_400(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;
    enable_unit_tests(&pool, workspace.id).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/workspaces/acme/janitors/LINT/runs",
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn manual_run_on_disabled_type_is_400(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;
    enable_unit_tests(&pool, workspace.id).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/workspaces/acme/janitors/SECURITY_REVIEW/runs",
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn manual_run_dispatches_and_returns_created(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;
    enable_unit_tests(&pool, workspace.id).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/workspaces/acme/janitors/UNIT_TESTS/runs",
        serde_json::json!({}),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "RUNNING");
    assert_eq!(json["data"]["triggered_by"], "MANUAL");
    assert_eq!(json["data"]["janitor_type"], "UNIT_TESTS");
    assert!(json["data"]["external_run_id"].is_string());
}

// ---------------------------------------------------------------------------
// Run listing
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn run_listing_returns_data_envelope(pool: PgPool) {
    let workspace = seed_workspace(&pool, "acme").await;
    enable_unit_tests(&pool, workspace.id).await;
    JanitorRunRepo::create(
        &pool,
        &CreateJanitorRun {
            workspace_id: workspace.id,
            janitor_type: JanitorType::UnitTests,
            triggered_by: RunTrigger::Scheduled,
            metadata: serde_json::json!({}),
        },
    )
    .await
    .unwrap();

    let app = common::build_test_app(pool);
    let response = get_authed(app, "/api/v1/workspaces/acme/janitors/UNIT_TESTS/runs").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
    assert_eq!(json["data"][0]["status"], "PENDING");
}

// ---------------------------------------------------------------------------
// Engine completion webhook
// ---------------------------------------------------------------------------

async fn seed_running_run(pool: &PgPool) -> i64 {
    let workspace = seed_workspace(pool, "acme").await;
    let run = JanitorRunRepo::create(
        pool,
        &CreateJanitorRun {
            workspace_id: workspace.id,
            janitor_type: JanitorType::UnitTests,
            triggered_by: RunTrigger::Scheduled,
            metadata: serde_json::json!({}),
        },
    )
    .await
    .unwrap();
    JanitorRunRepo::mark_running(pool, run.id, "run-1")
        .await
        .unwrap()
        .unwrap();
    run.id
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_completes_a_running_run(pool: PgPool) {
    let run_id = seed_running_run(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/janitors/runs/{run_id}/webhook"),
        serde_json::json!({ "status": "completed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "COMPLETED");
    assert!(json["data"]["completed_at"].is_string());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_failure_marks_run_failed(pool: PgPool) {
    let run_id = seed_running_run(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        &format!("/api/v1/janitors/runs/{run_id}/webhook"),
        serde_json::json!({ "status": "error", "error": "workflow halted at step 3" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "FAILED");
    assert_eq!(json["data"]["error"], "workflow halted at step 3");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_on_terminal_run_is_conflict(pool: PgPool) {
    let run_id = seed_running_run(&pool).await;

    let app = common::build_test_app(pool.clone());
    let first = post_json(
        app.clone(),
        &format!("/api/v1/janitors/runs/{run_id}/webhook"),
        serde_json::json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(first.status(), StatusCode::OK);

    // A second completion must not regress or double-close the run.
    let second = post_json(
        app,
        &format!("/api/v1/janitors/runs/{run_id}/webhook"),
        serde_json::json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_with_unknown_status_is_400(pool: PgPool) {
    let run_id = seed_running_run(&pool).await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/janitors/runs/{run_id}/webhook"),
        serde_json::json!({ "status": "paused" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn webhook_for_unknown_run_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/janitors/runs/424242/webhook",
        serde_json::json!({ "status": "completed" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
