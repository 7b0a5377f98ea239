//! Escalation Policy
//!
//! Decides whether a conversation should be handed to a human and with what
//! priority. The score threshold is one trigger among several; all triggers
//! are OR-combined and the ones that fired become the escalation reason.

use lead_agent_config::{QualificationConfig, TriggerConfig};
use lead_agent_core::Priority;
use serde::{Deserialize, Serialize};

/// Why a conversation escalated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscalationTrigger {
    /// Score reached the escalation threshold
    ScoreThreshold,
    /// Handoff command or API call
    ManualRequest,
    /// User message asked for a person or accepted an offer
    UserKeyword,
    /// Generated reply promised a handoff
    AssistantReply,
    /// Test keyword
    ForcedTest,
}

impl EscalationTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            EscalationTrigger::ScoreThreshold => "score_threshold",
            EscalationTrigger::ManualRequest => "manual_request",
            EscalationTrigger::UserKeyword => "user_keyword",
            EscalationTrigger::AssistantReply => "assistant_reply",
            EscalationTrigger::ForcedTest => "forced_test",
        }
    }

    /// Comma-separated reason text for a set of triggers
    pub fn reason(triggers: &[EscalationTrigger]) -> String {
        triggers
            .iter()
            .map(EscalationTrigger::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for EscalationTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What one turn offers to the trigger scan
#[derive(Debug, Clone, Copy, Default)]
pub struct TriggerInput<'a> {
    pub score: u8,
    pub user_text: Option<&'a str>,
    pub assistant_reply: Option<&'a str>,
    pub manual: bool,
}

/// Escalation policy
#[derive(Debug, Clone)]
pub struct EscalationPolicy {
    threshold: u8,
    medium_min: u8,
    user_keywords: Vec<String>,
    user_exact_phrases: Vec<String>,
    assistant_phrases: Vec<String>,
    force_keyword: String,
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::new(&QualificationConfig::default(), &TriggerConfig::default())
    }
}

impl EscalationPolicy {
    pub fn new(qualification: &QualificationConfig, triggers: &TriggerConfig) -> Self {
        let lower = |items: &[String]| -> Vec<String> {
            items.iter().map(|s| s.to_lowercase()).collect()
        };
        Self {
            threshold: qualification.escalation_threshold,
            medium_min: qualification.medium_priority_min,
            user_keywords: lower(&triggers.user_keywords),
            user_exact_phrases: lower(&triggers.user_exact_phrases),
            assistant_phrases: lower(&triggers.assistant_phrases),
            force_keyword: triggers.force_keyword.to_lowercase(),
        }
    }

    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    /// True iff the score alone qualifies the lead
    pub fn should_escalate(&self, score: u8) -> bool {
        score >= self.threshold
    }

    /// Priority tier: high at the threshold, medium from `medium_min`
    pub fn priority(&self, score: u8) -> Priority {
        if score >= self.threshold {
            Priority::High
        } else if score >= self.medium_min {
            Priority::Medium
        } else {
            Priority::Low
        }
    }

    /// Every trigger that fires for this turn, in a fixed order
    pub fn evaluate(&self, input: &TriggerInput<'_>) -> Vec<EscalationTrigger> {
        let mut fired = Vec::new();

        if self.should_escalate(input.score) {
            fired.push(EscalationTrigger::ScoreThreshold);
        }
        if input.manual {
            fired.push(EscalationTrigger::ManualRequest);
        }

        if let Some(text) = input.user_text {
            let lower = text.to_lowercase();
            if self.user_asks_for_handoff(&lower) {
                fired.push(EscalationTrigger::UserKeyword);
            }
            if !self.force_keyword.is_empty() && lower.contains(&self.force_keyword) {
                fired.push(EscalationTrigger::ForcedTest);
            }
        }

        if let Some(reply) = input.assistant_reply {
            let lower = reply.to_lowercase();
            if self.assistant_phrases.iter().any(|p| lower.contains(p.as_str())) {
                fired.push(EscalationTrigger::AssistantReply);
            }
        }

        fired
    }

    fn user_asks_for_handoff(&self, lower: &str) -> bool {
        if self.user_keywords.iter().any(|k| lower.contains(k.as_str())) {
            return true;
        }
        let normalized = lower
            .trim()
            .trim_end_matches(|c: char| c == '.' || c == '!')
            .trim();
        self.user_exact_phrases.iter().any(|p| p == normalized)
    }
}
