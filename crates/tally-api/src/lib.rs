//! Tally API crate - the HTTP surface over the chat dispatcher.
//!
//! Exposes `POST /chat` (the conversational endpoint) and `GET /health`.
//! Handlers are thin: deserialize, call the dispatcher, serialize the reply.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::{create_router, start_server};
pub use state::AppState;
