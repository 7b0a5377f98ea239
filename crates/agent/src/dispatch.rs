//! Notification Dispatch Gate
//!
//! At most one notification per conversation. The caller claims the
//! conversation's `notification_sent` flag under the registry lock
//! (`ConversationState::claim_notification`) before anything is awaited, so
//! two deliveries of the same message cannot both pass the check. The flag
//! stays set whatever the dispatcher returns: a failed delivery is not
//! retried until the conversation is reset.

use std::sync::Arc;

use async_trait::async_trait;
use lead_agent_core::{LeadPayload, NotificationDispatcher};
use serde::{Deserialize, Serialize};

/// Result of the gate for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchOutcome {
    /// No trigger fired
    NotEscalated,
    /// Triggers fired but this conversation was already notified
    AlreadyNotified,
    /// Dispatcher accepted the notification
    Sent,
    /// Dispatcher failed; the flag is set anyway
    Failed,
}

impl DispatchOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, DispatchOutcome::Sent)
    }
}

/// Wraps the dispatcher and turns its errors into an outcome
#[derive(Clone)]
pub struct DispatchGate {
    dispatcher: Arc<dyn NotificationDispatcher>,
}

impl DispatchGate {
    pub fn new(dispatcher: Arc<dyn NotificationDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Deliver a payload whose conversation has already been claimed
    pub async fn deliver(&self, payload: &LeadPayload) -> DispatchOutcome {
        match self.dispatcher.dispatch(payload).await {
            Ok(()) => {
                tracing::info!(
                    user_id = %payload.identity.user_id,
                    dispatcher = %self.dispatcher.name(),
                    score = payload.score,
                    priority = %payload.priority,
                    "Lead notification dispatched"
                );
                DispatchOutcome::Sent
            }
            Err(e) => {
                tracing::warn!(
                    user_id = %payload.identity.user_id,
                    dispatcher = %self.dispatcher.name(),
                    error = %e,
                    "Lead notification failed; not retrying"
                );
                DispatchOutcome::Failed
            }
        }
    }
}

impl std::fmt::Debug for DispatchGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatchGate")
            .field("dispatcher", &self.dispatcher.name())
            .finish()
    }
}

/// Dispatcher that only writes the summary to the log
#[derive(Debug, Clone, Default)]
pub struct LoggingDispatcher;

impl LoggingDispatcher {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl NotificationDispatcher for LoggingDispatcher {
    async fn dispatch(&self, payload: &LeadPayload) -> lead_agent_core::Result<()> {
        tracing::info!(
            user_id = %payload.identity.user_id,
            reason = %payload.reason,
            summary = %payload.summary,
            "Escalating lead to operator"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "log"
    }
}
