//! Conversation State
//!
//! One `ConversationState` per user identity. It owns the message history
//! and the trip fields accumulated from the customer's messages.
//!
//! ## Update rules
//!
//! Extraction proposes, the state decides:
//! - explicit origin/destination matches overwrite
//! - the generic `X to Y` pair only fills fields that are still unset
//! - every other non-boolean field overwrites when a new value is found
//! - boolean signals are OR-accumulated and never switch back off
//! - a name is only taken while the first or last name is missing

use chrono::{DateTime, Utc};
use lead_agent_core::{ExtractedFields, LeadFields, LeadIdentity, Turn, TurnRole};
use lead_agent_text_processing::LeadExtractor;

/// Accumulated state for one customer conversation
#[derive(Debug, Clone)]
pub struct ConversationState {
    pub identity: LeadIdentity,
    /// Append-only
    history: Vec<Turn>,
    pub fields: LeadFields,
    /// Set once a notification has been attempted; cleared only by reset
    pub notification_sent: bool,
    pub last_activity: DateTime<Utc>,
}

impl ConversationState {
    /// Fresh state for a previously unseen identity
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            identity: LeadIdentity::new(user_id, username),
            history: Vec::new(),
            fields: LeadFields::default(),
            notification_sent: false,
            last_activity: Utc::now(),
        }
    }

    /// Message history, oldest first
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// True while the name extractor should still run
    pub fn wants_name(&self) -> bool {
        self.identity.first_name.is_none() || self.identity.last_name.is_none()
    }

    /// Append a message. User messages are run through the extractor.
    ///
    /// Returns what the extractor proposed (empty for assistant messages).
    pub fn add_message(&mut self, text: &str, role: TurnRole) -> ExtractedFields {
        let turn = Turn::new(role, text);
        self.last_activity = turn.timestamp;
        self.history.push(turn);

        if role != TurnRole::User {
            return ExtractedFields::default();
        }

        let extracted = LeadExtractor::new().extract(text, self.wants_name());
        self.apply(&extracted);
        extracted
    }

    /// Merge one extraction result into the accumulated fields
    pub fn apply(&mut self, extracted: &ExtractedFields) {
        let fields = &mut self.fields;

        // Explicit direction always wins
        if let Some(origin) = &extracted.origin {
            fields.origin = Some(origin.clone());
        }
        if let Some(destination) = &extracted.destination {
            fields.destination = Some(destination.clone());
        }
        // Generic pair is fill-only
        if fields.origin.is_none() {
            fields.origin = extracted.pair_origin.clone();
        }
        if fields.destination.is_none() {
            fields.destination = extracted.pair_destination.clone();
        }

        overwrite(&mut fields.exact_date, &extracted.exact_date);
        overwrite(&mut fields.date_range, &extracted.date_range);
        overwrite(&mut fields.pax, &extracted.pax);
        overwrite(&mut fields.aircraft_model, &extracted.aircraft_model);
        overwrite(&mut fields.aircraft_category, &extracted.aircraft_category);
        overwrite(&mut fields.country, &extracted.country);

        fields.mentioned_timing |= extracted.mentioned_timing;
        fields.asked_detailed_questions |= extracted.asked_detailed_questions;
        fields.urgency_signals |= extracted.urgency_signals;
        fields.handoff_requested |= extracted.handoff_requested;

        if let Some(name) = &extracted.name {
            if self.wants_name() {
                self.identity.first_name = Some(name.first.clone());
                if let Some(last) = &name.last {
                    self.identity.last_name = Some(last.clone());
                }
            }
        }
    }

    /// Fill identity names supplied by the transport
    pub fn seed_name(&mut self, first_name: Option<String>, last_name: Option<String>) {
        if self.identity.first_name.is_none() {
            self.identity.first_name = first_name;
        }
        if self.identity.last_name.is_none() {
            self.identity.last_name = last_name;
        }
    }

    /// Atomically claim the right to notify
    ///
    /// Returns true exactly once per state lifetime.
    pub fn claim_notification(&mut self) -> bool {
        if self.notification_sent {
            return false;
        }
        self.notification_sent = true;
        true
    }
}

fn overwrite<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        slot.clone_from(value);
    }
}
