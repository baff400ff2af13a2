//! # Generative backend client
//!
//! Defines the [`GenerativeClient`] trait and a Google Gemini implementation over the
//! `generateContent` REST API. Used by chat-handlers; tests substitute mock clients.

use async_trait::async_trait;
use jarvis_core::Turn;
use thiserror::Error;

mod config;
mod gemini;

pub use config::EnvGeminiConfig;
pub use gemini::GeminiClient;

/// Maximum output length requested from the backend, in tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 1000;

/// Sampling temperature; favors varied phrasing over determinism for a conversational
/// persona.
pub const TEMPERATURE: f32 = 0.7;

/// Backend failure taxonomy. Callers are expected to fail soft: every variant maps to
/// the same user-facing fallback reply.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Rate limit or quota exceeded: {0}")]
    RateLimit(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Generative-text backend: prior turns as context, one new input, one reply.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Returns the model reply for `new_input` given `prior_turns` as conversation
    /// context, oldest first.
    async fn generate(&self, prior_turns: &[Turn], new_input: &str)
        -> Result<String, GenerateError>;
}
