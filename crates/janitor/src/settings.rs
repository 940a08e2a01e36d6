//! Orchestration settings.
//!
//! An explicit struct passed into the engine at construction time, so tests
//! inject values instead of mutating process-wide environment state. Only
//! `from_env` touches the environment.

use custodia_core::janitor::{scheduler_flag_enabled, JanitorType};

/// Engine-side workflow definition ids, one per janitor type.
#[derive(Debug, Clone)]
pub struct WorkflowIds {
    pub unit_tests: i64,
    pub integration_tests: i64,
    pub e2e_tests: i64,
    pub security_review: i64,
}

impl WorkflowIds {
    /// The workflow id to start for the given janitor type.
    pub fn for_type(&self, janitor_type: JanitorType) -> i64 {
        match janitor_type {
            JanitorType::UnitTests => self.unit_tests,
            JanitorType::IntegrationTests => self.integration_tests,
            JanitorType::E2eTests => self.e2e_tests,
            JanitorType::SecurityReview => self.security_review,
        }
    }
}

/// Settings for the orchestration engine and its background scheduler.
#[derive(Debug, Clone)]
pub struct JanitorSettings {
    /// Whether scheduled orchestration is enabled. Parsed strictly: only
    /// the exact literal `"true"` enables it (see
    /// [`scheduler_flag_enabled`]).
    pub scheduled_enabled: bool,
    /// Seconds between scheduler cycles (default: `600`).
    pub interval_secs: u64,
    /// Public base URL of this service, used to build the per-run webhook
    /// callback URL handed to the engine.
    pub webhook_base_url: String,
    /// Per-type workflow definition ids.
    pub workflow_ids: WorkflowIds,
}

impl JanitorSettings {
    /// Load settings from environment variables with defaults.
    ///
    /// | Env Var                            | Default                  |
    /// |------------------------------------|--------------------------|
    /// | `JANITOR_SCHEDULED_ENABLED`        | disabled                 |
    /// | `JANITOR_SCHEDULER_INTERVAL_SECS`  | `600`                    |
    /// | `JANITOR_WEBHOOK_BASE_URL`         | `http://localhost:3000`  |
    /// | `JANITOR_WORKFLOW_ID`              | `1`                      |
    /// | `JANITOR_<TYPE>_WORKFLOW_ID`       | falls back to the shared id |
    pub fn from_env() -> Self {
        let scheduled_enabled = scheduler_flag_enabled(
            std::env::var("JANITOR_SCHEDULED_ENABLED").ok().as_deref(),
        );

        let interval_secs: u64 = std::env::var("JANITOR_SCHEDULER_INTERVAL_SECS")
            .unwrap_or_else(|_| "600".into())
            .parse()
            .expect("JANITOR_SCHEDULER_INTERVAL_SECS must be a valid u64");

        let webhook_base_url = std::env::var("JANITOR_WEBHOOK_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000".into());

        let shared_id: i64 = std::env::var("JANITOR_WORKFLOW_ID")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("JANITOR_WORKFLOW_ID must be a valid i64");

        let override_id = |var: &str| -> i64 {
            std::env::var(var)
                .ok()
                .map(|v| {
                    v.parse()
                        .unwrap_or_else(|_| panic!("{var} must be a valid i64"))
                })
                .unwrap_or(shared_id)
        };

        Self {
            scheduled_enabled,
            interval_secs,
            webhook_base_url,
            workflow_ids: WorkflowIds {
                unit_tests: override_id("JANITOR_UNIT_TESTS_WORKFLOW_ID"),
                integration_tests: override_id("JANITOR_INTEGRATION_TESTS_WORKFLOW_ID"),
                e2e_tests: override_id("JANITOR_E2E_TESTS_WORKFLOW_ID"),
                security_review: override_id("JANITOR_SECURITY_REVIEW_WORKFLOW_ID"),
            },
        }
    }

    /// The webhook URL the engine calls back with the outcome of one run.
    pub fn run_webhook_url(&self, run_id: i64) -> String {
        format!(
            "{}/api/v1/janitors/runs/{}/webhook",
            self.webhook_base_url, run_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> JanitorSettings {
        JanitorSettings {
            scheduled_enabled: true,
            interval_secs: 600,
            webhook_base_url: "https://custodia.example".to_string(),
            workflow_ids: WorkflowIds {
                unit_tests: 10,
                integration_tests: 11,
                e2e_tests: 12,
                security_review: 13,
            },
        }
    }

    #[test]
    fn workflow_id_lookup_follows_type() {
        let s = settings();
        assert_eq!(s.workflow_ids.for_type(JanitorType::UnitTests), 10);
        assert_eq!(s.workflow_ids.for_type(JanitorType::SecurityReview), 13);
    }

    #[test]
    fn webhook_url_embeds_run_id() {
        assert_eq!(
            settings().run_webhook_url(42),
            "https://custodia.example/api/v1/janitors/runs/42/webhook"
        );
    }
}
