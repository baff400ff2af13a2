//! # Chat handlers
//!
//! The conversation core of the relay, wired as handler-chain members:
//!
//! - [`BroadcastFilter`]: middleware dropping status-broadcast and group messages.
//! - [`CommandHandler`]: leading-slash commands (`/help`, `/clear`, `/stats`,
//!   `/prompt_*`).
//! - [`ChatHandler`] + [`ResponseGenerator`]: prompt resolution, bounded history, backend
//!   call, fail-soft fallback reply.
//! - [`UserDispatcher`]: per-user single-consumer queues so messages from one user are
//!   handled in order; different users run in parallel.

mod chat_handler;
mod command_handler;
mod dispatch;
mod filter;
mod generator;

pub use chat_handler::ChatHandler;
pub use command_handler::CommandHandler;
pub use dispatch::UserDispatcher;
pub use filter::BroadcastFilter;
pub use generator::{ResponseGenerator, FALLBACK_REPLY};
