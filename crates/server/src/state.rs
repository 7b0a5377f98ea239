//! Application State
//!
//! Shared state across all handlers.

use std::sync::Arc;

use lead_agent_agent::LeadAgent;
use lead_agent_config::Settings;
use parking_lot::RwLock;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Settings the process started with
    pub config: Arc<RwLock<Settings>>,
    /// Owns the conversation registry
    pub agent: Arc<LeadAgent>,
}

impl AppState {
    /// State with default collaborators (template replies, log-only dispatch)
    pub fn new(config: Settings) -> Self {
        let agent = LeadAgent::with_defaults(&config);
        Self::with_agent(config, agent)
    }

    pub fn with_agent(config: Settings, agent: LeadAgent) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            agent: Arc::new(agent),
        }
    }

    /// Get a read guard to the current configuration
    pub fn get_config(&self) -> parking_lot::RwLockReadGuard<'_, Settings> {
        self.config.read()
    }
}
