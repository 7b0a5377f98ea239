//! In-memory lead store

use async_trait::async_trait;
use lead_agent_core::{LeadPayload, LeadRecord, LeadStore, Result};
use parking_lot::RwLock;

/// Lead records kept for the life of the process, keyed by a v4 uuid
#[derive(Debug, Default)]
pub struct InMemoryLeadStore {
    records: RwLock<Vec<LeadRecord>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn save(&self, payload: &LeadPayload) -> Result<String> {
        let id = uuid::Uuid::new_v4().to_string();
        self.records.write().push(LeadRecord {
            id: id.clone(),
            payload: payload.clone(),
        });
        tracing::debug!(lead_id = %id, user_id = %payload.identity.user_id, "Lead stored");
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<LeadRecord>> {
        Ok(self.records.read().clone())
    }
}
