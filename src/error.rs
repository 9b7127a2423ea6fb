use thiserror::Error;

/// Failures talking to the recommendation workflow service.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("workflow service returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Response JSON has no `data.outputs` object.
    #[error("workflow response has no data.outputs object")]
    MissingOutputs,

    #[error("app key for the {app} workflow is not configured")]
    MissingKey { app: &'static str },

    #[error("malformed clinical guideline payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccessError {
    #[error("no access codes configured")]
    NotConfigured,

    #[error("invalid access code")]
    Denied,
}
