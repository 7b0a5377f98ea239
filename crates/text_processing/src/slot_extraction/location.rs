//! Origin / destination extraction
//!
//! Explicit-direction patterns (`from X to Y`, `flying from X`,
//! `departing from X`, `flying to Y`, ...) produce values that overwrite.
//! The generic `X to|and Y` pair, tried at every connector in the message,
//! produces fill-only candidates.
//!
//! Captures are greedy runs of up to three words. A place ends at the first
//! digit, punctuation mark or stop word, so `to paris 12th june` and
//! `to nice friday` both yield the bare place.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{clean_capture, is_stop_word, title_case};

/// One to three words starting with a letter, optionally after `st.`
const PLACE: &str = r"((?:st\.?\s+)?[a-z][a-z'\-]*(?:\s+[a-z][a-z'\-]*){0,2})\b";

/// Lazy, uncaptured `PLACE` used to skip the origin
const PLACE_SKIP: &str = r"(?:st\.?\s+)?[a-z][a-z'\-]*(?:\s+[a-z][a-z'\-]*){0,2}?";

fn compile(pattern: String) -> Regex {
    Regex::new(&pattern).unwrap()
}

static ORIGIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(format!(r"\bfrom\s+{PLACE}\s+(?:to|and)\s")),
        compile(format!(r"\bflying\s+(?:out\s+)?from\s+{PLACE}")),
        compile(format!(r"\bdeparting\s+(?:from\s+)?{PLACE}")),
        compile(format!(r"\bleaving\s+from\s+{PLACE}")),
    ]
});

static DESTINATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(format!(r"\bfrom\s+{PLACE_SKIP}\s+(?:to|and)\s+{PLACE}")),
        compile(format!(r"\bflying\s+(?:in)?to\s+{PLACE}")),
        compile(format!(r"\b(?:going|headed|heading|travell?ing)\s+to\s+{PLACE}")),
        compile(format!(r"\barriving\s+(?:in|at)\s+{PLACE}")),
        compile(format!(r"\bdestination\s+(?:is\s+)?{PLACE}")),
    ]
});

static PAIR_CONNECTOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:to|and)\b").unwrap());

/// Up to three words ending right before a connector
static PAIR_LEFT: Lazy<Regex> = Lazy::new(|| compile(format!(r"\b{PLACE}\s+$")));

/// Up to three words starting right after a connector
static PAIR_RIGHT: Lazy<Regex> = Lazy::new(|| compile(format!(r"^\s+{PLACE}")));

/// Location candidates from one message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocationMatch {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub pair_origin: Option<String>,
    pub pair_destination: Option<String>,
}

fn finish_place(words: &[&str]) -> Option<String> {
    let place = clean_capture(&words.join(" "));
    if place.len() < 2 {
        return None;
    }
    Some(title_case(&place))
}

/// Leading words of a capture, cut at the first stop word
fn accept_place(capture: &str) -> Option<String> {
    let words: Vec<&str> = capture
        .split_whitespace()
        .take_while(|w| !is_stop_word(w))
        .collect();
    finish_place(&words)
}

/// Trailing words of a capture, cut after the last stop word
fn accept_trailing_place(capture: &str) -> Option<String> {
    let words: Vec<&str> = capture.split_whitespace().collect();
    let start = words
        .iter()
        .rposition(|w| is_stop_word(w))
        .map_or(0, |i| i + 1);
    finish_place(&words[start..])
}

fn first_capture(patterns: &[Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| accept_place(m.as_str()))
    })
}

/// First connector with a place on both sides
fn first_pair(text: &str) -> Option<(String, String)> {
    PAIR_CONNECTOR.find_iter(text).find_map(|connector| {
        let left = PAIR_LEFT
            .captures(&text[..connector.start()])
            .and_then(|caps| caps.get(1))
            .and_then(|m| accept_trailing_place(m.as_str()))?;
        let right = PAIR_RIGHT
            .captures(&text[connector.end()..])
            .and_then(|caps| caps.get(1))
            .and_then(|m| accept_place(m.as_str()))?;
        Some((left, right))
    })
}

/// Extract location candidates from a lowercased message
pub fn extract_locations(text: &str) -> LocationMatch {
    let (pair_origin, pair_destination) = match first_pair(text) {
        Some((from, to)) => (Some(from), Some(to)),
        None => (None, None),
    };

    LocationMatch {
        origin: first_capture(&ORIGIN_PATTERNS, text),
        destination: first_capture(&DESTINATION_PATTERNS, text),
        pair_origin,
        pair_destination,
    }
}
