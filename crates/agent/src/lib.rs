//! Lead Qualification Agent
//!
//! Features:
//! - Per-user conversation state with incremental field extraction
//! - Explicitly owned conversation registry
//! - Additive lead scoring with a per-criterion breakdown
//! - Escalation policy combining the score with keyword triggers
//! - At-most-once notification gate
//! - Default collaborators: log-only dispatcher, in-memory lead store,
//!   template reply generator

pub mod agent;
pub mod conversation;
pub mod dispatch;
pub mod escalation;
pub mod lead_scoring;
pub mod registry;
pub mod replies;
pub mod store;

pub use agent::{ConversationSnapshot, HandleOutcome, InboundEvent, LeadAgent};
pub use conversation::ConversationState;
pub use dispatch::{DispatchGate, DispatchOutcome, LoggingDispatcher};
pub use escalation::{EscalationPolicy, EscalationTrigger, TriggerInput};
pub use lead_scoring::{LeadScorer, ScoreBreakdown};
pub use registry::ConversationRegistry;
pub use replies::TemplateReplyGenerator;
pub use store::InMemoryLeadStore;

use thiserror::Error;

/// Agent errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error(transparent)]
    Core(#[from] lead_agent_core::Error),
}
