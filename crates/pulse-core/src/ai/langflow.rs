//! Langflow workflow backend
//!
//! HTTP client for a hosted Langflow run-flow API. The request envelope is
//! serialized into the flow's `input_value`; the reply text is pulled out of
//! the response JSON leniently, since hosted deployments have returned both a
//! flat `{"result": "..."}` shape and the nested run-flow output tree.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

use super::{AnalysisRequest, InsightBackend};

const DEFAULT_HOST: &str = "https://api.langflow.astra.datastax.com";

/// Langflow run-flow backend
#[derive(Clone)]
pub struct LangflowBackend {
    http_client: Client,
    base_url: String,
    workspace_id: String,
    flow_id: String,
    token: String,
}

impl LangflowBackend {
    /// Create a new Langflow backend
    pub fn new(base_url: &str, workspace_id: &str, flow_id: &str, token: &str) -> Self {
        Self {
            http_client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            workspace_id: workspace_id.to_string(),
            flow_id: flow_id.to_string(),
            token: token.to_string(),
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Option<Self> {
        let workspace_id = std::env::var("LANGFLOW_WORKSPACE_ID").ok()?;
        let flow_id = std::env::var("LANGFLOW_FLOW_ID").ok()?;
        let token = std::env::var("LANGFLOW_TOKEN").ok()?;
        let host = std::env::var("LANGFLOW_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Some(Self::new(&host, &workspace_id, &flow_id, &token))
    }

    fn run_url(&self) -> String {
        format!(
            "{}/lf/{}/api/v1/run/{}",
            self.base_url, self.workspace_id, self.flow_id
        )
    }
}

/// Request to the run-flow API
#[derive(Debug, Serialize)]
struct RunFlowRequest {
    input_value: String,
    output_type: String,
    input_type: String,
    tweaks: serde_json::Value,
}

/// Pull the reply text out of a run-flow response
///
/// Tries the flat `result` field first, then the nested
/// `outputs[0].outputs[0].results.message.text` tree.
fn extract_reply_text(body: &serde_json::Value) -> Option<String> {
    if let Some(text) = body.get("result").and_then(|v| v.as_str()) {
        return Some(text.to_string());
    }
    body.get("outputs")?
        .get(0)?
        .get("outputs")?
        .get(0)?
        .get("results")?
        .get("message")?
        .get("text")?
        .as_str()
        .map(|s| s.to_string())
}

#[async_trait]
impl InsightBackend for LangflowBackend {
    async fn run_analysis(&self, request: &AnalysisRequest) -> Result<String> {
        let payload = RunFlowRequest {
            input_value: serde_json::to_string(request)?,
            output_type: "chat".to_string(),
            input_type: "chat".to_string(),
            tweaks: serde_json::json!({}),
        };

        let response = self
            .http_client
            .post(self.run_url())
            .bearer_auth(&self.token)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Http(response.error_for_status().unwrap_err()));
        }

        let body: serde_json::Value = response.json().await?;
        debug!("Langflow response: {}", body);

        extract_reply_text(&body)
            .ok_or_else(|| Error::InvalidData("No reply text in workflow response".into()))
    }

    async fn health_check(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http_client.get(url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    fn host(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_flat_result() {
        let body = serde_json::json!({"result": "### Metrics\nLikes: 5"});
        assert_eq!(
            extract_reply_text(&body).as_deref(),
            Some("### Metrics\nLikes: 5")
        );
    }

    #[test]
    fn test_extract_nested_run_flow_output() {
        let body = serde_json::json!({
            "outputs": [{
                "outputs": [{
                    "results": {"message": {"text": "reply text"}}
                }]
            }]
        });
        assert_eq!(extract_reply_text(&body).as_deref(), Some("reply text"));
    }

    #[test]
    fn test_extract_missing_text_is_none() {
        assert_eq!(extract_reply_text(&serde_json::json!({})), None);
        assert_eq!(
            extract_reply_text(&serde_json::json!({"outputs": []})),
            None
        );
    }

    #[test]
    fn test_run_url_shape() {
        let backend = LangflowBackend::new("https://host/", "ws-1", "flow-2", "tok");
        assert_eq!(backend.run_url(), "https://host/lf/ws-1/api/v1/run/flow-2");
    }
}
