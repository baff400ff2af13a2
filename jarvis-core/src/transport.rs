//! Outbound messaging abstraction.
//!
//! [`Transport`] is transport-agnostic; the CLI ships a local REPL implementation and
//! tests substitute mocks. The real messaging client (session handling, pairing) lives
//! outside this workspace and only needs to implement this trait.

use crate::error::Result;
use crate::types::Message;
use async_trait::async_trait;

/// Sends text back to a chat. Implementations map to a concrete messaging client.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends a text message to the given chat id.
    async fn send_message(&self, chat_id: &str, text: &str) -> Result<()>;

    /// Sends a reply to the conversation the message came from.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.sender, text).await
    }
}
