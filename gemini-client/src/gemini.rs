//! Gemini implementation of [`GenerativeClient`]: wraps the `generateContent` REST
//! endpoint, translating turns to wire contents and mapping HTTP failures to
//! [`GenerateError`].

use std::time::Duration;

use async_trait::async_trait;
use jarvis_core::Turn;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{EnvGeminiConfig, GenerateError, GenerativeClient, MAX_OUTPUT_TOKENS, TEMPERATURE};
use crate::config::{DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

/// Gemini-backed [`GenerativeClient`].
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self, GenerateError> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(api_key: String, timeout: Duration) -> Result<Self, GenerateError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GenerateError::Network(format!("HTTP client build failed: {}", e)))?;
        Ok(Self {
            client,
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn from_config(config: &EnvGeminiConfig) -> Result<Self, GenerateError> {
        let mut client = Self::with_timeout(
            config.api_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        client.model = config.model.clone();
        client.base_url = config.base_url.clone();
        Ok(client)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            self.api_key
        )
    }
}

/// Builds the wire request: prior turns followed by the new input as a user content,
/// with the fixed generation config.
pub(crate) fn build_request(prior_turns: &[Turn], new_input: &str) -> GeminiRequest {
    let mut contents: Vec<GeminiContent> = prior_turns
        .iter()
        .map(|turn| GeminiContent {
            role: turn.role.as_str().to_string(),
            parts: vec![GeminiPart {
                text: turn.text.clone(),
            }],
        })
        .collect();
    contents.push(GeminiContent {
        role: "user".to_string(),
        parts: vec![GeminiPart {
            text: new_input.to_string(),
        }],
    });
    GeminiRequest {
        contents,
        generation_config: GeminiGenerationConfig {
            max_output_tokens: MAX_OUTPUT_TOKENS,
            temperature: TEMPERATURE,
        },
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    #[instrument(skip(self, prior_turns, new_input), fields(model = %self.model, prior = prior_turns.len()))]
    async fn generate(
        &self,
        prior_turns: &[Turn],
        new_input: &str,
    ) -> Result<String, GenerateError> {
        let request = build_request(prior_turns, new_input);

        let response = self
            .client
            .post(self.endpoint())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GenerateError::Timeout(e.to_string())
                } else {
                    GenerateError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GenerateError::Network(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiErrorResponse>(&body)
                .map(|r| r.error.message)
                .unwrap_or(body);
            return Err(match status.as_u16() {
                429 => GenerateError::RateLimit(message),
                code => GenerateError::Api {
                    status: code,
                    message,
                },
            });
        }

        let parsed: GeminiResponse = serde_json::from_str(&body)
            .map_err(|e| GenerateError::MalformedResponse(format!("{}: {}", e, body)))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                GenerateError::MalformedResponse("no candidate text in response".to_string())
            })?;

        Ok(text)
    }
}

// Gemini API wire types

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    pub generation_config: GeminiGenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiContent {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GeminiGenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorResponse {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}
