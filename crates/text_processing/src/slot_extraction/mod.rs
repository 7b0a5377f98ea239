//! Trip Field Extraction for Conversations
//!
//! Implements rule-based extraction of trip attributes from customer messages.
//! Every matcher runs on every user message. Each one is an ordered list of
//! rules where the first rule that yields a value wins for that field.
//!
//! ## Optimization: Static Regex Patterns
//!
//! Patterns are compiled once at first use with `once_cell::sync::Lazy`.
//!
//! ## Case handling
//!
//! All matchers except the name matcher see the lowercased message. Name
//! extraction needs the original casing because capitalisation is part of
//! what makes a word look like a name.

mod aircraft;
mod country;
mod dates;
mod location;
mod name;
mod passengers;
mod signals;

pub use aircraft::{extract_aircraft_category, extract_aircraft_model};
pub use country::extract_country;
pub use dates::{extract_date_range, extract_exact_date, mentions_timing};
pub use location::{extract_locations, LocationMatch};
pub use name::extract_name;
pub use passengers::extract_pax;
pub use signals::{asks_detailed_questions, has_urgency, requests_handoff};

use lead_agent_core::ExtractedFields;
use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Words that are never a place, a country or a name on their own
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "i", "me", "my", "we", "us", "our", "you", "your", "it", "is", "are",
        "am", "be", "to", "from", "and", "or", "but", "for", "of", "in", "on", "at", "with",
        "by", "via", "so", "if", "then", "than", "that", "this", "these", "those", "there",
        "here", "home", "want", "need", "like", "would", "could", "should", "will", "can",
        "go", "going", "fly", "flying", "travel", "travelling", "traveling", "get", "back",
        "now", "today", "tonight", "tomorrow", "soon", "asap", "please", "thanks", "thank",
        "yes", "no", "ok", "okay", "sure", "hi", "hello", "hey", "just", "not", "also",
        "jet", "jets", "plane", "flight", "trip", "charter", "return", "one", "way",
        "book", "booking", "looking", "something", "anything",
        "january", "february", "march", "april", "may", "june", "july", "august",
        "september", "october", "november", "december", "monday", "tuesday", "wednesday",
        "thursday", "friday", "saturday", "sunday", "week", "weekend", "month", "next",
    ]
    .into_iter()
    .collect()
});

/// Check a single lowercase word against the stop list
pub(crate) fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}

/// True when a captured phrase starts or ends with a stop word
pub(crate) fn is_rejected_phrase(phrase: &str) -> bool {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    match (words.first(), words.last()) {
        (Some(first), Some(last)) => is_stop_word(first) || is_stop_word(last),
        _ => true,
    }
}

/// Title-case a lowercase phrase: `new york` -> `New York`
pub(crate) fn title_case(phrase: &str) -> String {
    phrase
        .split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character and lowercase the rest
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
        None => String::new(),
    }
}

/// Trim whitespace and trailing punctuation from a capture
pub(crate) fn clean_capture(capture: &str) -> String {
    capture
        .trim()
        .trim_end_matches(|c: char| matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
        .trim()
        .to_string()
}

/// Lead field extractor
///
/// Stateless; all patterns are module-level statics, so construction is free.
#[derive(Debug, Clone, Default)]
pub struct LeadExtractor;

impl LeadExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Run the full battery against one user message
    ///
    /// `include_name` is false once the conversation already holds both a
    /// first and a last name; the name matcher is skipped in that case.
    pub fn extract(&self, text: &str, include_name: bool) -> ExtractedFields {
        let lower = text.to_lowercase();
        let mut fields = ExtractedFields::default();

        let locations = extract_locations(&lower);
        fields.origin = locations.origin;
        fields.destination = locations.destination;
        fields.pair_origin = locations.pair_origin;
        fields.pair_destination = locations.pair_destination;

        fields.exact_date = extract_exact_date(&lower);
        fields.date_range = extract_date_range(&lower);
        fields.mentioned_timing = mentions_timing(&lower);

        fields.pax = extract_pax(&lower);

        fields.aircraft_model = extract_aircraft_model(&lower);
        fields.aircraft_category = extract_aircraft_category(&lower);

        fields.country = extract_country(&lower, text);

        if include_name {
            fields.name = extract_name(text);
        }

        fields.asked_detailed_questions = asks_detailed_questions(&lower);
        fields.urgency_signals = has_urgency(&lower);
        fields.handoff_requested = requests_handoff(&lower);

        if !fields.is_empty() {
            tracing::debug!(fields = ?fields.field_names(), "Extracted lead fields");
        }

        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lead_agent_core::{AircraftCategory, PersonName};

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("new york"), "New York");
        assert_eq!(title_case("st. moritz"), "St. Moritz");
        assert_eq!(capitalize("dAPHNE"), "Daphne");
    }

    #[test]
    fn test_rejected_phrases() {
        assert!(is_rejected_phrase("i want"));
        assert!(is_rejected_phrase("go"));
        assert!(is_rejected_phrase(""));
        assert!(!is_rejected_phrase("new york"));
    }

    #[test]
    fn test_full_message() {
        let extractor = LeadExtractor::new();
        let fields = extractor.extract(
            "My name is Daphne Blake, I need a light jet from London to Nice on 12th June for 4 passengers",
            true,
        );

        assert_eq!(fields.origin.as_deref(), Some("London"));
        assert_eq!(fields.destination.as_deref(), Some("Nice"));
        assert_eq!(fields.exact_date.as_deref(), Some("12 June"));
        assert_eq!(fields.pax, Some(4));
        assert_eq!(fields.aircraft_category, Some(AircraftCategory::Light));
        assert_eq!(
            fields.name,
            Some(PersonName {
                first: "Daphne".into(),
                last: Some("Blake".into())
            })
        );
        assert!(!fields.urgency_signals);
    }

    #[test]
    fn test_name_skipped_when_not_requested() {
        let extractor = LeadExtractor::new();
        let fields = extractor.extract("My name is Daphne", false);
        assert!(fields.name.is_none());
    }

    #[test]
    fn test_nothing_extracted() {
        let extractor = LeadExtractor::new();
        let fields = extractor.extract("hmm", true);
        assert!(fields.is_empty());
    }
}
