//! Inbound filter: status broadcasts and group chats never reach the handlers.

use async_trait::async_trait;
use jarvis_core::{Message, Middleware, Result};
use tracing::debug;

/// Middleware that drops status-broadcast messages and messages from group chats.
/// The rest of the chain relies on this precondition: every message it sees is a
/// one-to-one chat message.
pub struct BroadcastFilter;

fn is_group_sender(sender: &str) -> bool {
    sender.ends_with("@g.us")
}

#[async_trait]
impl Middleware for BroadcastFilter {
    async fn before(&self, message: &Message) -> Result<bool> {
        if message.is_status || message.is_group || is_group_sender(&message.sender) {
            debug!(
                user_id = %message.sender,
                is_status = message.is_status,
                "message dropped by broadcast filter"
            );
            return Ok(false);
        }
        Ok(true)
    }
}
