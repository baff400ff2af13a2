//! Local REPL session: stdin lines become inbound messages for one user id, replies are
//! printed to stdout. Exercises the same chain a real messaging client would.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chat_handlers::{
    BroadcastFilter, ChatHandler, CommandHandler, ResponseGenerator, UserDispatcher,
};
use chrono::Utc;
use conversation::InMemoryConversationStore;
use gemini_client::{EnvGeminiConfig, GeminiClient, GenerativeClient};
use handler_chain::HandlerChain;
use jarvis_core::{Message, Result as JarvisResult, Transport};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use uuid::Uuid;

/// Prints replies to stdout.
struct StdoutTransport;

#[async_trait]
impl Transport for StdoutTransport {
    async fn send_message(&self, _chat_id: &str, text: &str) -> JarvisResult<()> {
        println!("jarvis> {}", text);
        Ok(())
    }
}

/// Builds the chain and runs the read loop until EOF or `/sair`.
pub async fn run(user: String, config: EnvGeminiConfig) -> Result<()> {
    let store = Arc::new(InMemoryConversationStore::new());
    let client: Arc<dyn GenerativeClient> = Arc::new(GeminiClient::from_config(&config)?);
    let generator = Arc::new(ResponseGenerator::new(store.clone(), client));

    let chain = Arc::new(
        HandlerChain::new()
            .add_middleware(Arc::new(BroadcastFilter))
            .add_handler(Arc::new(CommandHandler::new(store)))
            .add_handler(Arc::new(ChatHandler::new(generator))),
    );
    let dispatcher = UserDispatcher::new(chain, Arc::new(StdoutTransport));

    info!(user_id = %user, model = %config.model, "session started");
    println!("Sessão local iniciada. /help para comandos, /sair para encerrar.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let text = line.trim();
        if text.is_empty() {
            continue;
        }
        if text == "/sair" {
            break;
        }
        dispatcher
            .dispatch(Message {
                id: Uuid::new_v4().to_string(),
                sender: user.clone(),
                content: text.to_string(),
                created_at: Utc::now(),
                is_status: false,
                is_group: false,
            })
            .await?;
    }

    info!(user_id = %user, "session ended");
    Ok(())
}
