//! Lead data: identity, extracted trip fields and the outbound payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Inclusive travel window mentioned by the customer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Aircraft size class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AircraftCategory {
    Light,
    Midsize,
    Heavy,
}

impl AircraftCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AircraftCategory::Light => "light",
            AircraftCategory::Midsize => "midsize",
            AircraftCategory::Heavy => "heavy",
        }
    }
}

impl std::fmt::Display for AircraftCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Escalation priority tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Who the customer is
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadIdentity {
    /// Stable external identifier from the transport
    pub user_id: String,
    /// Transport handle
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl LeadIdentity {
    pub fn new(user_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            first_name: None,
            last_name: None,
        }
    }

    /// Display name, falling back to the username
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{} {}", first, last),
            (Some(first), None) => first.clone(),
            _ => self.username.clone(),
        }
    }
}

/// Trip attributes and signals accumulated over a conversation
///
/// Non-boolean fields hold the latest successful match. Boolean signals are
/// monotonic: extraction only ever ORs `true` into them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadFields {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub exact_date: Option<String>,
    pub date_range: Option<DateRange>,
    pub mentioned_timing: bool,
    pub pax: Option<u32>,
    pub aircraft_model: Option<String>,
    pub aircraft_category: Option<AircraftCategory>,
    pub country: Option<String>,
    pub asked_detailed_questions: bool,
    pub urgency_signals: bool,
    pub handoff_requested: bool,
}

impl LeadFields {
    /// Route rendered as `Origin → Destination` with `?` for missing ends
    pub fn route_label(&self) -> Option<String> {
        match (&self.origin, &self.destination) {
            (None, None) => None,
            (origin, destination) => Some(format!(
                "{} → {}",
                origin.as_deref().unwrap_or("?"),
                destination.as_deref().unwrap_or("?")
            )),
        }
    }

    /// Best available description of when the customer wants to fly
    pub fn date_label(&self) -> Option<String> {
        if let Some(date) = &self.exact_date {
            return Some(date.clone());
        }
        if let Some(range) = &self.date_range {
            return Some(format!("{} – {}", range.start, range.end));
        }
        if self.mentioned_timing {
            return Some("timing mentioned (relative)".to_string());
        }
        None
    }

    /// Best available aircraft description
    pub fn aircraft_label(&self) -> Option<String> {
        match (&self.aircraft_model, self.aircraft_category) {
            (Some(model), _) => Some(model.clone()),
            (None, Some(category)) => Some(format!("{} jet", category)),
            (None, None) => None,
        }
    }
}

/// Structured lead handed to the dispatcher and the lead store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadPayload {
    pub identity: LeadIdentity,
    pub fields: LeadFields,
    pub score: u8,
    pub priority: Priority,
    /// Why the lead was escalated
    pub reason: String,
    /// Pre-rendered human-readable summary
    pub summary: String,
    pub created_at: DateTime<Utc>,
}

impl LeadPayload {
    /// Build a payload and render its summary
    pub fn new(
        identity: LeadIdentity,
        fields: LeadFields,
        score: u8,
        priority: Priority,
        reason: impl Into<String>,
    ) -> Self {
        let mut payload = Self {
            identity,
            fields,
            score,
            priority,
            reason: reason.into(),
            summary: String::new(),
            created_at: Utc::now(),
        };
        payload.summary = payload.render_summary();
        payload
    }

    /// Render the operator-facing summary text
    pub fn render_summary(&self) -> String {
        let mut out = String::new();
        let fields = &self.fields;

        let _ = writeln!(
            out,
            "New charter lead [{} priority, score {}/100]",
            self.priority.as_str().to_uppercase(),
            self.score
        );
        let _ = writeln!(out, "Name: {}", self.identity.display_name());
        let _ = writeln!(out, "Username: @{}", self.identity.username);
        let _ = writeln!(out, "User ID: {}", self.identity.user_id);
        let _ = writeln!(out, "Route: {}", fields.route_label().unwrap_or_else(|| "-".into()));
        let _ = writeln!(out, "Date: {}", fields.date_label().unwrap_or_else(|| "-".into()));
        let _ = writeln!(
            out,
            "Passengers: {}",
            fields.pax.map(|p| p.to_string()).unwrap_or_else(|| "-".into())
        );
        let _ = writeln!(
            out,
            "Aircraft: {}",
            fields.aircraft_label().unwrap_or_else(|| "-".into())
        );
        let _ = writeln!(out, "Country: {}", fields.country.as_deref().unwrap_or("-"));

        let mut signals = Vec::new();
        if fields.urgency_signals {
            signals.push("urgent");
        }
        if fields.asked_detailed_questions {
            signals.push("detailed questions");
        }
        if fields.handoff_requested {
            signals.push("handoff requested");
        }
        if !signals.is_empty() {
            let _ = writeln!(out, "Signals: {}", signals.join(", "));
        }
        let _ = write!(out, "Reason: {}", self.reason);
        out
    }
}

/// A stored lead, keyed by a generated identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: String,
    pub payload: LeadPayload,
}
