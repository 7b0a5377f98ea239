//! Collaborator boundaries
//!
//! The qualification core is synchronous. Anything that suspends (reply
//! generation, notification delivery, persistence) sits behind one of these
//! traits so it can be swapped for a test double.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::conversation::Turn;
use crate::lead::{LeadFields, LeadIdentity, LeadPayload, LeadRecord};
use crate::Result;

/// Delivers an escalation to a human operator
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    /// Deliver the payload. Errors are caught by the dispatch gate.
    async fn dispatch(&self, payload: &LeadPayload) -> Result<()>;

    /// Short name for logs
    fn name(&self) -> &str;
}

/// Persists lead records
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Store a payload and return the generated record id
    async fn save(&self, payload: &LeadPayload) -> Result<String>;

    /// List stored records, oldest first
    async fn list(&self) -> Result<Vec<LeadRecord>>;
}

/// What the reply generator sees for one turn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyContext {
    pub identity: LeadIdentity,
    pub fields: LeadFields,
    pub history: Vec<Turn>,
    pub score: u8,
    /// True when the score alone already clears the escalation threshold
    pub qualified: bool,
}

/// Produces the conversational reply for a user message
#[async_trait]
pub trait ReplyGenerator: Send + Sync {
    async fn generate(&self, context: &ReplyContext) -> Result<String>;
}
