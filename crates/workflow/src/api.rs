//! REST client for the workflow engine's HTTP API.

use async_trait::async_trait;
use serde::Deserialize;

use crate::dispatch::{StartRunRequest, StartedRun, WorkflowDispatch, WorkflowError};

/// Connection settings for the workflow engine.
#[derive(Debug, Clone)]
pub struct WorkflowApiConfig {
    /// Base HTTP URL, e.g. `https://engine.example.com`.
    pub base_url: String,
    /// API token sent as a bearer credential.
    pub token: String,
}

/// HTTP client for the workflow engine.
pub struct WorkflowApi {
    client: reqwest::Client,
    config: WorkflowApiConfig,
}

/// Response body for a start-run request.
///
/// The engine is tolerant about what it returns; every field is optional
/// here so partial payloads deserialize instead of erroring. Only the run
/// identifier is load-bearing.
#[derive(Debug, Deserialize)]
struct StartRunResponse {
    #[serde(default)]
    data: Option<StartRunResponseData>,
}

#[derive(Debug, Deserialize)]
struct StartRunResponseData {
    #[serde(default)]
    run_id: Option<i64>,
}

impl WorkflowApi {
    /// Create a new client for the engine.
    pub fn new(config: WorkflowApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`] (connection
    /// pooling across callers).
    pub fn with_client(client: reqwest::Client, config: WorkflowApiConfig) -> Self {
        Self { client, config }
    }

    /// Build the engine's start-run payload. The engine injects the `vars`
    /// bag into the workflow unchanged; absent values are serialized as
    /// `null` rather than omitted.
    fn build_payload(request: &StartRunRequest) -> serde_json::Value {
        serde_json::json!({
            "workflow_id": request.workflow_id,
            "workflow_params": {
                "set_var": {
                    "attributes": {
                        "vars": {
                            "janitorType": request.janitor_type.as_str(),
                            "workspaceId": request.workspace_id,
                            "repositoryUrl": request.repository_url,
                            "ignoreDirs": request.ignore_dirs,
                            "swarmUrl": request.swarm_url,
                            "swarmSecretAlias": request.swarm_secret_alias,
                            "username": request.username,
                            "pat": request.pat,
                            "webhookUrl": request.webhook_url,
                        }
                    }
                }
            }
        })
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or a [`WorkflowError::Api`] containing the
    /// status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, WorkflowError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(WorkflowError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl WorkflowDispatch for WorkflowApi {
    async fn start_run(&self, request: &StartRunRequest) -> Result<StartedRun, WorkflowError> {
        let payload = Self::build_payload(request);

        let response = self
            .client
            .post(format!("{}/api/v1/runs", self.config.base_url))
            .bearer_auth(&self.config.token)
            .json(&payload)
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let body = response.json::<StartRunResponse>().await?;

        let run_id = body
            .data
            .and_then(|d| d.run_id)
            .ok_or(WorkflowError::MissingRunId)?;

        tracing::debug!(
            workspace_id = request.workspace_id,
            janitor_type = %request.janitor_type,
            external_run_id = run_id,
            "Workflow engine accepted start request"
        );

        Ok(StartedRun {
            external_id: run_id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use custodia_core::janitor::JanitorType;

    fn request() -> StartRunRequest {
        StartRunRequest {
            workflow_id: 42,
            janitor_type: JanitorType::UnitTests,
            workspace_id: 7,
            repository_url: Some("https://github.com/acme/widget".to_string()),
            ignore_dirs: None,
            swarm_url: Some("https://swarm.acme.example".to_string()),
            swarm_secret_alias: Some("{{SWARM_API_KEY}}".to_string()),
            username: None,
            pat: None,
            webhook_url: "https://custodia.example/api/v1/janitors/runs/9/webhook".to_string(),
        }
    }

    #[test]
    fn payload_nests_vars_under_set_var_attributes() {
        let payload = WorkflowApi::build_payload(&request());
        let vars = &payload["workflow_params"]["set_var"]["attributes"]["vars"];

        assert_eq!(payload["workflow_id"], 42);
        assert_eq!(vars["janitorType"], "UNIT_TESTS");
        assert_eq!(vars["workspaceId"], 7);
        assert_eq!(vars["repositoryUrl"], "https://github.com/acme/widget");
        assert_eq!(
            vars["webhookUrl"],
            "https://custodia.example/api/v1/janitors/runs/9/webhook"
        );
    }

    #[test]
    fn absent_values_serialize_as_null_not_omitted() {
        let payload = WorkflowApi::build_payload(&request());
        let vars = &payload["workflow_params"]["set_var"]["attributes"]["vars"];

        assert!(vars["ignoreDirs"].is_null());
        assert!(vars["username"].is_null());
        assert!(vars["pat"].is_null());
        assert!(vars.get("ignoreDirs").is_some());
    }

    #[test]
    fn partial_response_bodies_deserialize() {
        let parsed: StartRunResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.data.is_none());

        let parsed: StartRunResponse =
            serde_json::from_str(r#"{"data": {"queue_position": 3}}"#).unwrap();
        assert!(parsed.data.unwrap().run_id.is_none());

        let parsed: StartRunResponse =
            serde_json::from_str(r#"{"data": {"run_id": 123}}"#).unwrap();
        assert_eq!(parsed.data.unwrap().run_id, Some(123));
    }
}
