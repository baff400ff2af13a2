//! Shared test doubles: mock transport, mock generative clients, message builder.
//! No messaging-client or Gemini network calls in tests.
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use gemini_client::{GenerateError, GenerativeClient};
use jarvis_core::{Message, Result as JarvisResult, Transport, Turn};
use std::sync::Mutex;

/// Mock transport: records (chat_id, text) pairs instead of sending.
#[derive(Default)]
pub struct MockTransport {
    pub sent: Mutex<Vec<(String, String)>>,
}

#[async_trait]
impl Transport for MockTransport {
    async fn send_message(&self, chat_id: &str, text: &str) -> JarvisResult<()> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

/// Mock backend: records every request and echoes the new input back.
#[derive(Default)]
pub struct EchoClient {
    pub requests: Mutex<Vec<(Vec<Turn>, String)>>,
}

#[async_trait]
impl GenerativeClient for EchoClient {
    async fn generate(
        &self,
        prior_turns: &[Turn],
        new_input: &str,
    ) -> Result<String, GenerateError> {
        self.requests
            .lock()
            .unwrap()
            .push((prior_turns.to_vec(), new_input.to_string()));
        Ok(format!("eco: {}", new_input))
    }
}

/// Mock backend that always fails with a network error.
pub struct FailingClient;

#[async_trait]
impl GenerativeClient for FailingClient {
    async fn generate(
        &self,
        _prior_turns: &[Turn],
        _new_input: &str,
    ) -> Result<String, GenerateError> {
        Err(GenerateError::Network("connection refused".to_string()))
    }
}

pub fn make_message(sender: &str, content: &str) -> Message {
    Message {
        id: format!("msg_{}", Utc::now().timestamp_nanos_opt().unwrap_or_default()),
        sender: sender.to_string(),
        content: content.to_string(),
        created_at: Utc::now(),
        is_status: false,
        is_group: false,
    }
}
