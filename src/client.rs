use std::time::{Duration, Instant};

use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::error::ClientError;
use crate::settings::Settings;

/// `data.outputs` of a workflow run.
pub type Outputs = Map<String, Value>;

/// Blocking-mode client for the workflow `run` endpoint.
pub struct WorkflowClient {
    http: reqwest::Client,
    api_url: String,
    user_id: String,
}

impl WorkflowClient {
    pub fn new(settings: &Settings) -> Result<Self, ClientError> {
        if settings.accept_invalid_certs {
            warn!("TLS certificate verification disabled for {}", settings.api_url);
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()
            .map_err(ClientError::Build)?;
        Ok(WorkflowClient {
            http,
            api_url: settings.api_url.clone(),
            user_id: settings.user_id.clone(),
        })
    }

    /// Run one workflow app and return its outputs.
    pub async fn run(&self, app_key: &str, inputs: Value) -> Result<Outputs, ClientError> {
        let body = request_body(inputs, &self.user_id);
        let start = Instant::now();

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(app_key)
            .json(&body)
            .send()
            .await
            .map_err(|source| self.request_error(source))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|source| self.request_error(source))?;
        info!(
            "Workflow run finished in {:.1}s",
            start.elapsed().as_secs_f64()
        );
        extract_outputs(payload)
    }

    fn request_error(&self, source: reqwest::Error) -> ClientError {
        ClientError::Request {
            url: self.api_url.clone(),
            source,
        }
    }
}

pub fn request_body(inputs: Value, user_id: &str) -> Value {
    json!({
        "inputs": inputs,
        "response_mode": "blocking",
        "user": user_id,
    })
}

pub fn extract_outputs(payload: Value) -> Result<Outputs, ClientError> {
    match payload {
        Value::Object(mut root) => match root.remove("data") {
            Some(Value::Object(mut data)) => match data.remove("outputs") {
                Some(Value::Object(outputs)) => Ok(outputs),
                _ => Err(ClientError::MissingOutputs),
            },
            _ => Err(ClientError::MissingOutputs),
        },
        _ => Err(ClientError::MissingOutputs),
    }
}

/// Text output under `key`; missing or non-string values read as empty.
pub fn output_text<'a>(outputs: &'a Outputs, key: &str) -> &'a str {
    outputs.get(key).and_then(Value::as_str).unwrap_or("")
}
