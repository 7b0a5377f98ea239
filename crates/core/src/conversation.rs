//! Conversation turn types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::Error;

/// Role in a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// Prospective customer message
    User,
    /// Reply authored by the agent
    Assistant,
}

impl TurnRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnRole::User => "user",
            TurnRole::Assistant => "assistant",
        }
    }
}

impl FromStr for TurnRole {
    type Err = Error;

    /// Parse a transport role label. `bot` is an alias of `assistant`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(TurnRole::User),
            "assistant" | "bot" => Ok(TurnRole::Assistant),
            other => Err(Error::InvalidInput(format!("unknown turn role: {}", other))),
        }
    }
}

impl std::fmt::Display for TurnRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single entry in a conversation history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Role of the author
    pub role: TurnRole,
    /// Text of the message
    pub content: String,
    /// When the turn was appended
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    /// Create a new turn stamped with the current time
    pub fn new(role: TurnRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing_normalizes_bot() {
        assert_eq!("bot".parse::<TurnRole>().unwrap(), TurnRole::Assistant);
        assert_eq!("Assistant".parse::<TurnRole>().unwrap(), TurnRole::Assistant);
        assert_eq!(" user ".parse::<TurnRole>().unwrap(), TurnRole::User);
        assert!("system".parse::<TurnRole>().is_err());
    }

    #[test]
    fn test_turn_is_stamped_on_creation() {
        let before = Utc::now();
        let turn = Turn::new(TurnRole::User, "from London to Paris");
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "from London to Paris");
        assert!(turn.timestamp >= before);

        let turn = Turn::new(TurnRole::Assistant, "Noted.");
        assert_eq!(turn.role.to_string(), "assistant");
    }
}
