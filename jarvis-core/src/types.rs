//! Core types: conversation turns, inbound messages, handler response, and the
//! Handler/Middleware traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Speaker of a [`Turn`]. Values map one-to-one to the Gemini wire role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

impl Role {
    /// Wire role name (`"user"` / `"model"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Model => "model",
        }
    }
}

/// One message exchanged in a conversation, tagged with its speaker. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// An inbound chat message as delivered by the messaging transport.
///
/// `sender` doubles as the conversation key: one-to-one chats reply to the sender.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    /// Transport identifier of the sender (e.g. `5511999999999@c.us`); used as the user id.
    pub sender: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Status-broadcast messages are dropped before reaching the handlers.
    pub is_status: bool,
    /// Group-origin messages are dropped before reaching the handlers.
    pub is_group: bool,
}

/// Handler result for the chain. `Reply(text)` carries the response body to send back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResponse {
    /// Pass to next handler.
    Continue,
    /// Stop the chain; no response body.
    Stop,
    /// Stop the chain and attach reply text.
    Reply(String),
}

/// Single handler in the chain. The first handler returning Stop or Reply ends the
/// handle phase; Continue passes the message on.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, message: &Message) -> crate::error::Result<HandlerResponse>;
}

/// Middleware around the handler phase: `before` can veto the message (return false to
/// drop it), `after` observes the final response in reverse registration order.
#[async_trait]
pub trait Middleware: Send + Sync {
    async fn before(&self, _message: &Message) -> crate::error::Result<bool> {
        Ok(true)
    }

    async fn after(
        &self,
        _message: &Message,
        _response: &HandlerResponse,
    ) -> crate::error::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(Role::User.as_str(), "user");
        assert_eq!(Role::Model.as_str(), "model");
    }

    #[test]
    fn test_turn_constructors() {
        let t = Turn::user("oi");
        assert_eq!(t.role, Role::User);
        assert_eq!(t.text, "oi");
        let t = Turn::model("olá");
        assert_eq!(t.role, Role::Model);
    }
}
