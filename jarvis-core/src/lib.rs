//! # jarvis-core
//!
//! Core types and traits for the Jarvis relay: [`Turn`], [`Message`], [`Handler`],
//! [`Middleware`], the outbound [`Transport`] trait, error taxonomy, and tracing
//! initialization. Transport-agnostic; used by handler-chain and chat-handlers.

pub mod error;
pub mod logger;
pub mod transport;
pub mod types;

pub use error::{HandlerError, JarvisError, Result};
pub use logger::init_tracing;
pub use transport::Transport;
pub use types::{Handler, HandlerResponse, Message, Middleware, Role, Turn};
