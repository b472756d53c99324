//! Application state shared across all route handlers.
//!
//! AppState holds the dispatcher and configuration. It is passed to
//! handlers via axum's State extractor.

use std::sync::Arc;
use std::time::Instant;

use tally_chat::ChatDispatcher;
use tally_core::TallyConfig;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. The
/// dispatcher is immutable after startup; no locks needed.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<TallyConfig>,
    /// The message dispatcher, trained classifier included.
    pub dispatcher: Arc<ChatDispatcher>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given components.
    pub fn new(config: TallyConfig, dispatcher: ChatDispatcher) -> Self {
        Self {
            config: Arc::new(config),
            dispatcher: Arc::new(dispatcher),
            start_time: Instant::now(),
        }
    }
}
