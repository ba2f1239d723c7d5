// src/web/state.rs
// Web server state management

use crate::experts::{ExpertClient, ExpertRegistry};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Shared application state. Everything in here is read-only after startup.
#[derive(Clone)]
pub struct AppState {
    /// Completion client (owns the registry and model settings)
    pub client: Arc<ExpertClient>,

    /// Cancelled on shutdown; each model call runs under a child token
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(client: Arc<ExpertClient>) -> Self {
        Self::with_shutdown(client, CancellationToken::new())
    }

    pub fn with_shutdown(client: Arc<ExpertClient>, shutdown: CancellationToken) -> Self {
        Self { client, shutdown }
    }

    pub fn registry(&self) -> &ExpertRegistry {
        self.client.registry()
    }

    /// Token for one model call
    pub fn call_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }
}
