//! HTTP webhook surface

mod handlers;

pub use handlers::create_router;

use crate::config::Config;
use crate::runtime::ProductionSessionManager;
use crate::telegram::Client;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<ProductionSessionManager>,
    pub telegram: Arc<Client>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        sessions: Arc<ProductionSessionManager>,
        telegram: Arc<Client>,
        config: Arc<Config>,
    ) -> Self {
        Self {
            sessions,
            telegram,
            config,
        }
    }
}
