//! Per-user dispatch: one single-consumer queue and worker task per user id.
//!
//! Guarantees that messages from the same user are handled strictly in arrival order
//! while different users run in parallel. No error crosses the handling boundary: the
//! worker logs failures and answers with a fixed error reply.

use std::collections::HashMap;
use std::sync::Arc;

use handler_chain::HandlerChain;
use jarvis_core::{HandlerResponse, JarvisError, Message, Result, Transport};
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error};

/// Reply sent when message handling itself errors (distinct from the generator's
/// backend fallback, which is already a reply).
pub(crate) const HANDLING_ERROR_REPLY: &str =
    "❌ Ocorreu um erro. Tente novamente em alguns segundos.";

const QUEUE_CAPACITY: usize = 32;

/// Routes inbound messages to per-user worker tasks, lazily spawned.
pub struct UserDispatcher {
    chain: Arc<HandlerChain>,
    transport: Arc<dyn Transport>,
    senders: Mutex<HashMap<String, mpsc::Sender<Message>>>,
}

impl UserDispatcher {
    pub fn new(chain: Arc<HandlerChain>, transport: Arc<dyn Transport>) -> Self {
        Self {
            chain,
            transport,
            senders: Mutex::new(HashMap::new()),
        }
    }

    /// Enqueues a message on its user's queue, spawning the worker on first contact.
    /// Backpressure: awaits when the user's queue is full.
    pub async fn dispatch(&self, message: Message) -> Result<()> {
        let sender = {
            let mut senders = self.senders.lock().await;
            match senders.get(&message.sender) {
                Some(tx) if !tx.is_closed() => tx.clone(),
                _ => {
                    let tx = self.spawn_worker(message.sender.clone());
                    senders.insert(message.sender.clone(), tx.clone());
                    tx
                }
            }
        };
        sender
            .send(message)
            .await
            .map_err(|_| JarvisError::Transport("user worker queue closed".to_string()))
    }

    fn spawn_worker(&self, user_id: String) -> mpsc::Sender<Message> {
        let (tx, mut rx) = mpsc::channel::<Message>(QUEUE_CAPACITY);
        let chain = self.chain.clone();
        let transport = self.transport.clone();

        tokio::spawn(async move {
            debug!(user_id = %user_id, "user worker started");
            while let Some(message) = rx.recv().await {
                match chain.handle(&message).await {
                    Ok(HandlerResponse::Reply(text)) => {
                        if let Err(e) = transport.reply_to(&message, &text).await {
                            error!(user_id = %message.sender, error = %e, "failed to send reply");
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        error!(user_id = %message.sender, error = %e, "message handling failed");
                        if let Err(e) = transport.reply_to(&message, HANDLING_ERROR_REPLY).await {
                            error!(user_id = %message.sender, error = %e, "failed to send error reply");
                        }
                    }
                }
            }
            debug!(user_id = %user_id, "user worker stopped");
        });

        tx
    }
}
