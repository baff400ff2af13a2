//! # Conversation store
//!
//! Per-user bounded message history plus per-user prompt override, behind the
//! [`ConversationStore`] trait so handlers can share it as `Arc<dyn ConversationStore>`.
//!
//! The cap is turn-count based (10 turns), not token based; per-message size is already
//! bounded by the messaging transport. Nothing here persists across restarts.

use std::collections::HashMap;
use std::sync::RwLock;

use jarvis_core::Turn;
use tracing::debug;

/// Hard cap on stored turns per user; oldest turns are evicted first.
pub const MAX_TURNS: usize = 10;

/// Aggregate counters over all stored conversations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    /// Users with at least one stored turn.
    pub active_conversations: usize,
    /// Sum of stored turn counts across all users.
    pub total_messages: usize,
}

/// Per-user conversation state: bounded history and optional prompt override.
pub trait ConversationStore: Send + Sync {
    /// Returns the stored history for the user, oldest first; empty if none. No mutation.
    fn history(&self, user_id: &str) -> Vec<Turn>;

    /// Appends a turn, then trims to the most recent [`MAX_TURNS`].
    fn append_turn(&self, user_id: &str, turn: Turn);

    /// `Some(text)`: stores the override marker and replaces history with a single
    /// synthetic user turn carrying the text, seeding context for the next generation
    /// call. `None`: clears the override marker only; history is untouched.
    fn reset_override(&self, user_id: &str, override_text: Option<String>);

    /// Current override marker for the user, if any.
    fn override_for(&self, user_id: &str) -> Option<String>;

    /// Deletes history and override for the user. Idempotent.
    fn clear(&self, user_id: &str);

    /// Counters over all stored conversations.
    fn stats(&self) -> StoreStats;
}

#[derive(Default)]
struct UserState {
    turns: Vec<Turn>,
    override_text: Option<String>,
}

/// In-memory [`ConversationStore`] keyed by user id.
#[derive(Default)]
pub struct InMemoryConversationStore {
    users: RwLock<HashMap<String, UserState>>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConversationStore for InMemoryConversationStore {
    fn history(&self, user_id: &str) -> Vec<Turn> {
        let users = self.users.read().unwrap();
        users
            .get(user_id)
            .map(|s| s.turns.clone())
            .unwrap_or_default()
    }

    fn append_turn(&self, user_id: &str, turn: Turn) {
        let mut users = self.users.write().unwrap();
        let state = users.entry(user_id.to_string()).or_default();
        state.turns.push(turn);
        if state.turns.len() > MAX_TURNS {
            let excess = state.turns.len() - MAX_TURNS;
            state.turns.drain(..excess);
        }
        debug!(user_id, turns = state.turns.len(), "turn appended");
    }

    fn reset_override(&self, user_id: &str, override_text: Option<String>) {
        let mut users = self.users.write().unwrap();
        match override_text {
            Some(text) => {
                let state = users.entry(user_id.to_string()).or_default();
                state.turns = vec![Turn::user(text.clone())];
                state.override_text = Some(text);
                debug!(user_id, "override set, history re-seeded");
            }
            None => {
                if let Some(state) = users.get_mut(user_id) {
                    state.override_text = None;
                }
                debug!(user_id, "override cleared");
            }
        }
    }

    fn override_for(&self, user_id: &str) -> Option<String> {
        let users = self.users.read().unwrap();
        users.get(user_id).and_then(|s| s.override_text.clone())
    }

    fn clear(&self, user_id: &str) {
        let mut users = self.users.write().unwrap();
        users.remove(user_id);
        debug!(user_id, "conversation cleared");
    }

    fn stats(&self) -> StoreStats {
        let users = self.users.read().unwrap();
        let active = users.values().filter(|s| !s.turns.is_empty()).count();
        let total = users.values().map(|s| s.turns.len()).sum();
        StoreStats {
            active_conversations: active,
            total_messages: total,
        }
    }
}
