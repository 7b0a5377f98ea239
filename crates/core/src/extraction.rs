//! Per-message extraction proposal
//!
//! Extractors never touch conversation state directly. They return an
//! `ExtractedFields` proposal and the conversation applies it, which keeps
//! the overwrite and fill-only rules in one place.

use serde::{Deserialize, Serialize};

use crate::lead::{AircraftCategory, DateRange};

/// A person's name as captured from free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    pub first: String,
    pub last: Option<String>,
}

/// Everything one message proposed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    /// From an explicit-direction pattern; overwrites
    pub origin: Option<String>,
    /// From an explicit-direction pattern; overwrites
    pub destination: Option<String>,
    /// From the generic `X to Y` pair; only fills an unset origin
    pub pair_origin: Option<String>,
    /// From the generic `X to Y` pair; only fills an unset destination
    pub pair_destination: Option<String>,
    pub exact_date: Option<String>,
    pub date_range: Option<DateRange>,
    pub mentioned_timing: bool,
    pub pax: Option<u32>,
    pub aircraft_model: Option<String>,
    pub aircraft_category: Option<AircraftCategory>,
    pub country: Option<String>,
    pub name: Option<PersonName>,
    pub asked_detailed_questions: bool,
    pub urgency_signals: bool,
    pub handoff_requested: bool,
}

impl ExtractedFields {
    /// True when the message yielded nothing at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the fields this proposal carries, for logging
    pub fn field_names(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.origin.is_some() || self.pair_origin.is_some() {
            names.push("origin");
        }
        if self.destination.is_some() || self.pair_destination.is_some() {
            names.push("destination");
        }
        if self.exact_date.is_some() {
            names.push("exact_date");
        }
        if self.date_range.is_some() {
            names.push("date_range");
        }
        if self.mentioned_timing {
            names.push("mentioned_timing");
        }
        if self.pax.is_some() {
            names.push("pax");
        }
        if self.aircraft_model.is_some() {
            names.push("aircraft_model");
        }
        if self.aircraft_category.is_some() {
            names.push("aircraft_category");
        }
        if self.country.is_some() {
            names.push("country");
        }
        if self.name.is_some() {
            names.push("name");
        }
        if self.asked_detailed_questions {
            names.push("asked_detailed_questions");
        }
        if self.urgency_signals {
            names.push("urgency_signals");
        }
        if self.handoff_requested {
            names.push("handoff_requested");
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_proposal() {
        let fields = ExtractedFields::default();
        assert!(fields.is_empty());
        assert!(fields.field_names().is_empty());
    }

    #[test]
    fn test_field_names() {
        let fields = ExtractedFields {
            pair_origin: Some("London".into()),
            pax: Some(3),
            urgency_signals: true,
            ..Default::default()
        };
        assert!(!fields.is_empty());
        assert_eq!(fields.field_names(), vec!["origin", "pax", "urgency_signals"]);
    }
}
