//! Passenger count extraction

use once_cell::sync::Lazy;
use regex::Regex;

const COUNT: &str = r"(\d{1,3}|one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|thirteen|fourteen|fifteen|sixteen|seventeen|eighteen|nineteen|twenty)";

const NUMBER_WORDS: [&str; 20] = [
    "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven",
    "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen",
    "twenty",
];

// Order matters: the first pattern that matches sets the count
static PAX_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        format!(r"\b{COUNT}\s*(?:passengers?|people|persons?|pax|guests?|adults?|travell?ers?)\b"),
        format!(r"\bfor\s+{COUNT}\s+(?:of\s+us|people|persons?|passengers?)\b"),
        format!(r"\bwe\s+are\s+{COUNT}(?:\s+of\s+us)?\b"),
        format!(r"\bthere\s+(?:are|will\s+be)\s+{COUNT}\s+of\s+us\b"),
        format!(r"\b{COUNT}\s+of\s+us\b"),
        format!(r"\b(?:party|group)\s+of\s+{COUNT}\b"),
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

fn parse_count(token: &str) -> Option<u32> {
    if let Ok(n) = token.parse::<u32>() {
        return Some(n);
    }
    NUMBER_WORDS
        .iter()
        .position(|w| *w == token)
        .map(|i| i as u32 + 1)
}

/// Extract the passenger count from a lowercased message
pub fn extract_pax(text: &str) -> Option<u32> {
    PAX_PATTERNS.iter().find_map(|re| {
        re.captures(text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| parse_count(m.as_str()))
            .filter(|n| *n > 0)
    })
}
