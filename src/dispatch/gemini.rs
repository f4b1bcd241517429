// Google Gemini client
//
// Single-shot `generateContent` calls over a blocking HTTP client. The whole
// response is received before anything is returned.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{DispatchError, GenerationClient};
use crate::domain::{
    Candidate, GenerationResponse, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};

/// Blocking client for the Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl GeminiClient {
    /// Create a client for `api_key`.
    ///
    /// Fails with [`DispatchError::Auth`] when the key is blank.
    pub fn new(api_key: impl Into<String>) -> Result<Self, DispatchError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DispatchError::Auth("GEMINI_API_KEY is not set".to_string()));
        }

        let client = Client::builder().build().map_err(|e| DispatchError::Transport {
            message: "failed to create HTTP client".to_string(),
            source: Some(e),
        })?;

        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        let model = model.into();
        self.model = model.strip_prefix("models/").map(str::to_string).unwrap_or(model);
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Upper bound for one request, connection included.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

impl GenerationClient for GeminiClient {
    fn generate(&self, prompt: &str) -> Result<GenerationResponse, DispatchError> {
        let url = self.endpoint();
        let request = GeminiRequest {
            contents: vec![GeminiContent {
                role: "user",
                parts: vec![GeminiRequestPart { text: prompt }],
            }],
        };

        tracing::debug!("Sending {} byte prompt to {}", prompt.len(), url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .map_err(|e| {
                let message = if e.is_timeout() {
                    format!("request timed out after {}s", self.timeout.as_secs())
                } else {
                    "failed to send request to Gemini API".to_string()
                };
                DispatchError::Transport { message, source: Some(e) }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(classify_failure(status, body));
        }

        let body: GeminiResponse = response.json().map_err(|e| DispatchError::Transport {
            message: "failed to parse Gemini API response".to_string(),
            source: Some(e),
        })?;

        tracing::debug!("Gemini returned {} candidates", body.candidates.len());
        Ok(body.into())
    }
}

fn classify_failure(status: StatusCode, body: String) -> DispatchError {
    let rejected_key = status == StatusCode::UNAUTHORIZED
        || status == StatusCode::FORBIDDEN
        || (status == StatusCode::BAD_REQUEST && body.contains("API_KEY_INVALID"));

    if rejected_key {
        DispatchError::Auth(format!(
            "Gemini rejected the API key (status {status}): {}",
            body.trim()
        ))
    } else {
        DispatchError::transport(format!("Gemini API returned status {status}: {}", body.trim()))
    }
}

// Gemini API types

#[derive(Debug, Serialize)]
struct GeminiRequest<'a> {
    contents: Vec<GeminiContent<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiContent<'a> {
    role: &'static str,
    parts: Vec<GeminiRequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct GeminiRequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiCandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Debug, Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl From<GeminiResponse> for GenerationResponse {
    fn from(response: GeminiResponse) -> Self {
        let candidates = response
            .candidates
            .into_iter()
            .map(|candidate| Candidate {
                text: candidate
                    .content
                    .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect::<String>())
                    .unwrap_or_default(),
                finish_reason: candidate.finish_reason,
            })
            .collect();

        GenerationResponse {
            candidates,
            block_reason: response.prompt_feedback.and_then(|f| f.block_reason),
        }
    }
}
