//! Error handling for the backend module

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a body that does not match the expected shape.
    #[error("Decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Reqwest error, typically related to network issues or request failures.
    #[error("Reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP error with status {status}: {message}")]
    Http { status: u16, message: String },
}

impl BackendError {
    pub async fn from_response(response: reqwest::Response) -> BackendError {
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read response text".to_string());

        BackendError::Http { status, message }
    }

    /// Whether the backend rejected the bearer token.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, BackendError::Http { status: 401 | 403, .. })
    }

    /// Extracts the `detail` field of an HTTP error body, if there is one.
    pub fn to_pretty(&self) -> Option<String> {
        match self {
            BackendError::Http { status, message } => {
                let detail = serde_json::from_str::<serde_json::Value>(message)
                    .ok()
                    .and_then(|body| body.get("detail").cloned())
                    .map(|detail| match detail {
                        serde_json::Value::String(s) => s,
                        other => other.to_string(),
                    })?;
                Some(format!("[{}] {}", status, detail))
            }
            _ => None,
        }
    }
}
