//! Chain handler for plain (non-command) messages: delegates to [`ResponseGenerator`].

use std::sync::Arc;

use async_trait::async_trait;
use jarvis_core::{Handler, HandlerResponse, Message, Result};

use crate::ResponseGenerator;

/// Replies to every non-empty, non-command message. Placed after [`crate::CommandHandler`]
/// in the chain, so slash commands never reach it.
pub struct ChatHandler {
    generator: Arc<ResponseGenerator>,
}

impl ChatHandler {
    pub fn new(generator: Arc<ResponseGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl Handler for ChatHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if text.is_empty() {
            return Ok(HandlerResponse::Stop);
        }
        let reply = self.generator.generate(&message.sender, text, None).await;
        Ok(HandlerResponse::Reply(reply))
    }
}
