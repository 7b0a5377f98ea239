//! Conversation Registry
//!
//! Owns every live `ConversationState`, keyed by user id. States are created
//! lazily on the first message and dropped only by an explicit `remove`.
//! There is no eviction: memory grows with the number of distinct users.

use std::collections::HashMap;

use crate::conversation::ConversationState;

#[derive(Debug, Default)]
pub struct ConversationRegistry {
    conversations: HashMap<String, ConversationState>,
}

impl ConversationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing state for `user_id`, or a fresh one
    pub fn get_or_create(&mut self, user_id: &str, username: &str) -> &mut ConversationState {
        self.conversations
            .entry(user_id.to_string())
            .or_insert_with(|| {
                tracing::debug!(user_id = %user_id, "Creating conversation state");
                ConversationState::new(user_id, username)
            })
    }

    pub fn get(&self, user_id: &str) -> Option<&ConversationState> {
        self.conversations.get(user_id)
    }

    pub fn contains(&self, user_id: &str) -> bool {
        self.conversations.contains_key(user_id)
    }

    /// Discard all state for `user_id`
    pub fn remove(&mut self, user_id: &str) -> Option<ConversationState> {
        self.conversations.remove(user_id)
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }
}
