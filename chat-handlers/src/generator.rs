//! Response generation: resolves the effective prompt context, maintains the bounded
//! per-user history, and calls the generative backend.

use std::sync::Arc;

use conversation::ConversationStore;
use gemini_client::GenerativeClient;
use jarvis_core::Turn;
use tracing::{error, info, instrument};

/// Fixed user-facing apology on any backend failure. Causes are logged, never surfaced.
pub const FALLBACK_REPLY: &str =
    "Desculpe, ocorreu um erro ao processar sua mensagem. Tente novamente.";

/// Produces a reply for one user message. Fail-soft: never returns an error, every
/// failure path resolves to [`FALLBACK_REPLY`].
pub struct ResponseGenerator {
    store: Arc<dyn ConversationStore>,
    client: Arc<dyn GenerativeClient>,
}

impl ResponseGenerator {
    pub fn new(store: Arc<dyn ConversationStore>, client: Arc<dyn GenerativeClient>) -> Self {
        Self { store, client }
    }

    /// Generates a reply for `text` from `user_id`.
    ///
    /// Context resolution order: an explicit override re-seeds history and wins; else
    /// the override stored by a prior command; else the keyword-classified catalog
    /// template. The resolved context leads the backend request as a transient user
    /// turn unless history already starts with it (the seed turn placed by
    /// `reset_override`, until the cap evicts it). Only override seeding touches
    /// stored history; classified templates never do.
    ///
    /// The user turn is appended before the backend call and retained even when the
    /// call fails, so the next call has continuity.
    #[instrument(skip(self, text, explicit_override))]
    pub async fn generate(
        &self,
        user_id: &str,
        text: &str,
        explicit_override: Option<&str>,
    ) -> String {
        let context = match explicit_override {
            Some(prompt) => {
                self.store
                    .reset_override(user_id, Some(prompt.to_string()));
                prompt.to_string()
            }
            None => match self.store.override_for(user_id) {
                Some(stored) => stored,
                None => {
                    let category = prompt_catalog::classify(text);
                    info!(category = category.name(), "message classified");
                    prompt_catalog::template(category).to_string()
                }
            },
        };

        self.store.append_turn(user_id, Turn::user(text));

        // prior context: stored history minus the just-appended turn, with the
        // resolved context as the leading turn; skipped only when the override's
        // seed turn still opens the history
        let mut prior = self.store.history(user_id);
        prior.pop();
        if prior.first().map(|t| t.text != context).unwrap_or(true) {
            prior.insert(0, Turn::user(context));
        }

        match self.client.generate(&prior, text).await {
            Ok(reply) => {
                self.store.append_turn(user_id, Turn::model(reply.clone()));
                reply
            }
            Err(e) => {
                error!(error = %e, "backend generation failed");
                FALLBACK_REPLY.to_string()
            }
        }
    }
}
