//! # Handler chain
//!
//! Runs a sequence of middleware (before/after) and handlers for each message.
//! Middleware can drop the message; the first handler that returns Stop or Reply ends
//! handler execution; after callbacks run in reverse order.

use jarvis_core::{Handler, HandlerResponse, Message, Middleware, Result};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Chain of middleware and handlers: middleware run in order (before), then handlers;
/// middleware after run in reverse order.
#[derive(Clone, Default)]
pub struct HandlerChain {
    middleware: Vec<Arc<dyn Middleware>>,
    handlers: Vec<Arc<dyn Handler>>,
}

impl HandlerChain {
    /// Creates an empty chain (no middleware, no handlers).
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a middleware (runs before handlers, after in reverse).
    pub fn add_middleware(mut self, middleware: Arc<dyn Middleware>) -> Self {
        self.middleware.push(middleware);
        self
    }

    /// Appends a handler (runs in order; first Stop/Reply ends the handler phase).
    pub fn add_handler(mut self, handler: Arc<dyn Handler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Runs middleware before, then handlers, then middleware after in reverse.
    /// Returns the first Stop or Reply, or Continue if no handler claimed the message.
    #[instrument(skip(self, message), fields(user_id = %message.sender, message_id = %message.id))]
    pub async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let mut final_response = HandlerResponse::Continue;

        for mw in &self.middleware {
            let mw_name = std::any::type_name_of_val(mw.as_ref());
            if !mw.before(message).await? {
                info!(middleware = %mw_name, "chain stopped by middleware");
                return Ok(HandlerResponse::Stop);
            }
        }

        for handler in &self.handlers {
            let handler_name = std::any::type_name_of_val(handler.as_ref());
            let response = handler.handle(message).await?;
            debug!(handler = %handler_name, response = ?response, "handler processed");

            match response {
                HandlerResponse::Stop | HandlerResponse::Reply(_) => {
                    final_response = response;
                    break;
                }
                HandlerResponse::Continue => continue,
            }
        }

        for mw in self.middleware.iter().rev() {
            mw.after(message, &final_response).await?;
        }

        Ok(final_response)
    }
}

// Unit/integration tests live in tests/handler_chain_test.rs
