//! Slash-command router: parses leading-slash commands and mutates per-user state.
//!
//! Commands are case-sensitive. `/prompt_<nome>` resolves a catalog category,
//! `/prompt_custom <texto>` stores the literal trailing text as the override. Every
//! command resolves to a reply; unknown commands get a fixed "não reconhecido" message.

use std::sync::Arc;

use async_trait::async_trait;
use conversation::ConversationStore;
use jarvis_core::{Handler, HandlerError, HandlerResponse, Message, Result};
use tracing::info;

pub(crate) const HELP_REPLY: &str = "\
🤖 *Jarvis - Comandos Disponíveis:*

*Comandos Básicos:*
• /help - Mostra esta ajuda
• /clear - Limpa histórico da conversa
• /stats - Mostra estatísticas do bot

*Prompts Especializados:*
• /prompt_tecnico - Modo suporte técnico
• /prompt_educacional - Modo educacional
• /prompt_vendas - Modo vendas
• /prompt_criativo - Modo criativo
• /prompt_padrao - Volta ao modo padrão

*Prompt Personalizado:*
• /prompt_custom [seu prompt] - Define prompt personalizado

*Exemplo:*
/prompt_custom Você é um chef especializado em culinária brasileira

✨ *Dica:* O bot detecta automaticamente o contexto e ajusta suas respostas!";

pub(crate) const CLEAR_REPLY: &str = "Histórico da conversa limpo! 🧹";

pub(crate) const UNRECOGNIZED_REPLY: &str =
    "❓ Comando não reconhecido. Use /help para ver comandos disponíveis.";

pub(crate) const EMPTY_CUSTOM_PROMPT_REPLY: &str =
    "❌ O prompt personalizado não pode ser vazio. Use /prompt_custom [seu prompt].";

pub(crate) const CUSTOM_PROMPT_SET_REPLY: &str = "✅ Prompt personalizado definido!";

/// Handles messages starting with `/`; everything else continues down the chain.
pub struct CommandHandler {
    store: Arc<dyn ConversationStore>,
}

impl CommandHandler {
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    /// Executes one command for the user and returns the reply text.
    pub fn run_command(&self, user_id: &str, command: &str) -> String {
        match command {
            "/help" => HELP_REPLY.to_string(),
            "/clear" => {
                self.store.clear(user_id);
                info!(user_id, "conversation cleared by command");
                CLEAR_REPLY.to_string()
            }
            "/stats" => {
                let stats = self.store.stats();
                format!(
                    "📊 *Estatísticas do Bot:*\n\n• Conversas ativas: {}\n• Mensagens processadas: {}",
                    stats.active_conversations, stats.total_messages
                )
            }
            _ => {
                if command == "/prompt_custom" || command.starts_with("/prompt_custom ") {
                    let trailing = command.strip_prefix("/prompt_custom").unwrap_or("");
                    return match self.set_custom_prompt(user_id, trailing) {
                        Ok(reply) => reply,
                        Err(HandlerError::EmptyCustomPrompt) => {
                            EMPTY_CUSTOM_PROMPT_REPLY.to_string()
                        }
                        Err(e) => e.to_string(),
                    };
                }
                if let Some(name) = command.strip_prefix("/prompt_") {
                    if let Ok(template) = prompt_catalog::resolve(name) {
                        self.store
                            .reset_override(user_id, Some(template.to_string()));
                        info!(user_id, category = name, "prompt override set");
                        return format!("✅ Prompt alterado para: *{}*", name);
                    }
                }
                UNRECOGNIZED_REPLY.to_string()
            }
        }
    }

    /// Stores the literal trailing text as the user's override. Whitespace-only text is
    /// rejected without mutating any state.
    fn set_custom_prompt(
        &self,
        user_id: &str,
        trailing: &str,
    ) -> std::result::Result<String, HandlerError> {
        let text = trailing.trim();
        if text.is_empty() {
            return Err(HandlerError::EmptyCustomPrompt);
        }
        self.store.reset_override(user_id, Some(text.to_string()));
        info!(user_id, "custom prompt override set");
        Ok(CUSTOM_PROMPT_SET_REPLY.to_string())
    }
}

#[async_trait]
impl Handler for CommandHandler {
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let text = message.content.trim();
        if !text.starts_with('/') {
            return Ok(HandlerResponse::Continue);
        }
        Ok(HandlerResponse::Reply(
            self.run_command(&message.sender, text),
        ))
    }
}
