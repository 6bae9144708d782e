use serde::Deserialize;
use thiserror::Error;

use crate::{
    models::{GenerateContentRequest, GenerateContentResponse},
    GeminiUrl,
};

pub struct GeminiClient {
    api_key: String,
    base_url: GeminiUrl,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: GeminiUrl::default(),
            http: reqwest::Client::new(),
        }
    }

    /// Point the client at a different base URL (stub server in tests).
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.base_url = GeminiUrl::with_base(base);
        self
    }

    /// Single `generateContent` call against the given model.
    ///
    /// A non-success status is surfaced as [`GeminiError::Api`] carrying the
    /// upstream's own error message when one can be parsed out of the body.
    pub async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, GeminiError> {
        let url = self.base_url.generate_content(model, &self.api_key);

        let resp = self
            .http
            .post(url.as_ref())
            .json(request)
            .send()
            .await
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| GeminiError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&body)
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|_| "Failed to get response from Gemini".to_string());
            tracing::warn!(model, status = status.as_u16(), "Gemini call failed");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<GenerateContentResponse>(&body).map_err(|e| {
            GeminiError::Parsing(format!("Failed to parse response as JSON: {}", e))
        })
    }
}

#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("Missing API key")]
    MissingApiKey,
    #[error("RequestError: {0}")]
    Request(String),
    #[error("{message}")]
    Api { status: u16, message: String },
    #[error("ParsingError: {0}")]
    Parsing(String),
}

impl GeminiError {
    /// Upstream HTTP status, when the failure came from a completed call.
    pub fn status(&self) -> Option<u16> {
        match self {
            GeminiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Error body shape returned by the API on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_envelope_extracts_upstream_message() {
        let envelope: ErrorEnvelope = serde_json::from_str(
            r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.error.message, "Resource has been exhausted");
    }

    #[test]
    fn api_error_exposes_status() {
        let err = GeminiError::Api {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "overloaded");
        assert_eq!(GeminiError::MissingApiKey.status(), None);
    }
}
