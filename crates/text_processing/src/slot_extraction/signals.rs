//! Boolean signal detectors
//!
//! Each detector answers for a single message. The conversation state ORs
//! the answers together so a signal never switches back off.

use once_cell::sync::Lazy;
use regex::Regex;

static DETAILED_QUESTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\bhow\s+(?:much|long|many)\b").unwrap(),
        Regex::new(r"\b(?:price|prices|pricing|cost|costs|quote|quotes|rates?|fees?)\b").unwrap(),
        Regex::new(r"\bwhat\s+(?:is|are|would)\b").unwrap(),
        Regex::new(
            r"\b(?:catering|wifi|wi-fi|baggage|luggage|pets?|amenities|range|availability|insurance|cancellation)\b",
        )
        .unwrap(),
        Regex::new(r"\bcan\s+(?:i|we|you)\b").unwrap(),
        Regex::new(r"\bdo\s+you\s+(?:have|offer)\b").unwrap(),
    ]
});

static URGENCY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b(?:urgent|urgently|asap|immediately|emergency)\b").unwrap(),
        Regex::new(r"\bas\s+soon\s+as\s+possible\b").unwrap(),
        Regex::new(r"\bright\s+away\b").unwrap(),
        Regex::new(r"\b(?:today|tonight|tomorrow)\b").unwrap(),
        Regex::new(r"\blast[- ]minute\b").unwrap(),
        Regex::new(r"\bwithin\s+the\s+hour\b").unwrap(),
    ]
});

static HANDOFF_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(
            r"\b(?:speak|talk|chat)\s+(?:to|with)\s+(?:an?\s+|the\s+|your\s+|a\s+real\s+)?(?:agent|human|person|someone|somebody|specialist|broker|team)\b",
        )
        .unwrap(),
        Regex::new(r"\bconnect\s+me\b").unwrap(),
        Regex::new(r"\bcall\s+me\b").unwrap(),
        Regex::new(r"\b(?:book\s+it|go\s+ahead|proceed)\b").unwrap(),
    ]
});

/// Plain substring fallback for handoff intent.
///
/// Deliberately loose: `ok` also matches inside "book" and "looking", and
/// `person` inside "persons". High recall is the point here.
const HANDOFF_KEYWORDS: &[&str] = &[
    "agent", "human", "team", "yes", "ok", "connect", "specialist", "call me", "contact",
    "person",
];

/// Pricing, logistics or availability questions
pub fn asks_detailed_questions(text: &str) -> bool {
    DETAILED_QUESTION_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Time pressure ("asap", "today", "last minute", ...)
pub fn has_urgency(text: &str) -> bool {
    URGENCY_PATTERNS.iter().any(|re| re.is_match(text))
}

/// Any hint that the customer wants a person or wants to proceed
pub fn requests_handoff(text: &str) -> bool {
    HANDOFF_PATTERNS.iter().any(|re| re.is_match(text))
        || HANDOFF_KEYWORDS.iter().any(|k| text.contains(k))
}
