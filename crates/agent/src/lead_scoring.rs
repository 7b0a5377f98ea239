//! Lead Scoring
//!
//! Purely additive model over the accumulated trip fields. Tiers inside a
//! criterion are mutually exclusive (the highest applicable one counts);
//! criteria are independent and summed. The maximum is 100.
//!
//! | Criterion  | Condition                               | Points |
//! |------------|-----------------------------------------|--------|
//! | Route      | origin and destination                  | 30     |
//! | Route      | only one of them                        | 10     |
//! | Passengers | pax                                     | 20     |
//! | Date       | exact date                              | 25     |
//! | Date       | date range                              | 15     |
//! | Date       | relative timing only                    | 5      |
//! | Aircraft   | model                                   | 10     |
//! | Aircraft   | category only                           | 5      |
//! | Contact    | first name, not the anonymous sentinel  | 5      |
//! | Engagement | detailed questions                      | 5      |
//! | Urgency    | urgency signals                         | 5      |

use lead_agent_core::{LeadFields, LeadIdentity};
use serde::{Deserialize, Serialize};

use crate::conversation::ConversationState;

const ROUTE_FULL: u8 = 30;
const ROUTE_PARTIAL: u8 = 10;
const PAX: u8 = 20;
const DATE_EXACT: u8 = 25;
const DATE_RANGE: u8 = 15;
const DATE_TIMING: u8 = 5;
const AIRCRAFT_MODEL: u8 = 10;
const AIRCRAFT_CATEGORY: u8 = 5;
const CONTACT: u8 = 5;
const ENGAGEMENT: u8 = 5;
const URGENCY: u8 = 5;

/// Points per criterion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub route: u8,
    pub passengers: u8,
    pub date: u8,
    pub aircraft: u8,
    pub contact: u8,
    pub engagement: u8,
    pub urgency: u8,
}

impl ScoreBreakdown {
    pub fn total(&self) -> u8 {
        self.route
            + self.passengers
            + self.date
            + self.aircraft
            + self.contact
            + self.engagement
            + self.urgency
    }
}

/// Lead scorer
#[derive(Debug, Clone)]
pub struct LeadScorer {
    /// First name that counts as "no name given"
    anonymous_name: String,
}

impl Default for LeadScorer {
    fn default() -> Self {
        Self::new("Anonymous")
    }
}

impl LeadScorer {
    pub fn new(anonymous_name: impl Into<String>) -> Self {
        Self {
            anonymous_name: anonymous_name.into(),
        }
    }

    /// Score for a conversation, 0..=100
    pub fn score(&self, state: &ConversationState) -> u8 {
        self.breakdown(&state.fields, &state.identity).total()
    }

    /// Per-criterion points for a set of fields
    pub fn breakdown(&self, fields: &LeadFields, identity: &LeadIdentity) -> ScoreBreakdown {
        let route = match (&fields.origin, &fields.destination) {
            (Some(_), Some(_)) => ROUTE_FULL,
            (Some(_), None) | (None, Some(_)) => ROUTE_PARTIAL,
            (None, None) => 0,
        };

        let date = if fields.exact_date.is_some() {
            DATE_EXACT
        } else if fields.date_range.is_some() {
            DATE_RANGE
        } else if fields.mentioned_timing {
            DATE_TIMING
        } else {
            0
        };

        let aircraft = if fields.aircraft_model.is_some() {
            AIRCRAFT_MODEL
        } else if fields.aircraft_category.is_some() {
            AIRCRAFT_CATEGORY
        } else {
            0
        };

        let named = identity
            .first_name
            .as_deref()
            .is_some_and(|name| name != self.anonymous_name);

        ScoreBreakdown {
            route,
            passengers: if fields.pax.is_some() { PAX } else { 0 },
            date,
            aircraft,
            contact: if named { CONTACT } else { 0 },
            engagement: if fields.asked_detailed_questions { ENGAGEMENT } else { 0 },
            urgency: if fields.urgency_signals { URGENCY } else { 0 },
        }
    }
}
