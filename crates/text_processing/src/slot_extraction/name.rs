//! Customer name extraction
//!
//! Runs on the original-case message. Patterns are tried in order and the
//! first one yielding an acceptable first name wins.

use lead_agent_core::PersonName;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use super::{capitalize, is_stop_word};

const WORD: &str = r"([A-Za-z][A-Za-z'\-]*)";
const CAP_WORD: &str = r"([A-Z][a-z'\-]+)";

/// Capitalised words that open a sentence without being a name
static NOT_A_NAME: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "hi", "hello", "hey", "thanks", "thank", "cheers", "yes", "yeah", "yep", "no", "nope",
        "ok", "okay", "sure", "great", "good", "fine", "perfect", "sorry", "looking", "interested",
        "planning", "hoping", "trying", "thinking", "wondering", "ready", "available", "free",
        "busy", "here", "back", "tomorrow", "today", "tonight", "weekdays", "weekends", "flexible",
        "traveling", "travelling", "flying", "going", "leaving", "heading", "based", "from",
        "just", "still", "also", "not", "maybe", "possibly", "help", "agent", "human",
    ]
    .into_iter()
    .collect()
});

static NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"(?i)\bmy\s+name\s+is\s+{WORD}(?:\s+{WORD})?"),
        format!(r"\b(?:I\s+am|I['’]m|Im)\s+{CAP_WORD}(?:\s+{CAP_WORD})?"),
        format!(r"^\s*{CAP_WORD}(?:\s+{CAP_WORD})?\s*[.!]?\s*$"),
        format!(r"(?i)\bname\s*:\s*{WORD}(?:\s+{WORD})?"),
        format!(r"(?i)\b(?:call|address)\s+me\s+(?:as\s+)?{WORD}(?:\s+{WORD})?"),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

fn accept_word(raw: &str) -> Option<String> {
    let lower = raw.to_lowercase();
    if lower.len() < 2 || is_stop_word(&lower) || NOT_A_NAME.contains(lower.as_str()) {
        return None;
    }
    Some(capitalize(raw))
}

/// Extract a first name and optional last name
pub fn extract_name(text: &str) -> Option<PersonName> {
    NAME_PATTERNS.iter().find_map(|re| {
        let caps = re.captures(text)?;
        let first = accept_word(caps.get(1)?.as_str())?;
        let last = caps.get(2).and_then(|m| accept_word(m.as_str()));
        Some(PersonName { first, last })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(text: &str) -> Option<(String, Option<String>)> {
        extract_name(text).map(|n| (n.first, n.last))
    }

    fn full(first: &str, last: Option<&str>) -> Option<(String, Option<String>)> {
        Some((first.to_string(), last.map(str::to_string)))
    }

    #[test]
    fn test_my_name_is() {
        assert_eq!(name("my name is daphne blake"), full("Daphne", Some("Blake")));
        assert_eq!(
            name("My name is Daphne and I need a jet"),
            full("Daphne", None)
        );
    }

    #[test]
    fn test_i_am_requires_capitalised_name() {
        assert_eq!(name("Hi, I'm Fred"), full("Fred", None));
        assert_eq!(name("I am Velma Dinkley"), full("Velma", Some("Dinkley")));
        assert_eq!(name("i'm fred"), None);
        assert_eq!(name("I'm looking for a jet"), None);
        assert_eq!(name("I am Interested in a quote"), None);
    }

    #[test]
    fn test_bare_capitalised_message() {
        assert_eq!(name("Daphne Blake"), full("Daphne", Some("Blake")));
        assert_eq!(name("Shaggy."), full("Shaggy", None));
        assert_eq!(name("Hello"), None);
        assert_eq!(name("Yes"), None);
    }

    #[test]
    fn test_name_label_and_call_me() {
        assert_eq!(name("name: Fred Jones"), full("Fred", Some("Jones")));
        assert_eq!(name("please call me Dee"), full("Dee", None));
        assert_eq!(name("call me tomorrow"), None);
    }

    #[test]
    fn test_no_name() {
        assert_eq!(name("I need a jet from London to Paris"), None);
        assert_eq!(name("Next Friday, 4 people"), None);
        assert_eq!(name("Yes please"), None);
    }
}
