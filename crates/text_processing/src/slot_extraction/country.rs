//! Country extraction
//!
//! A fixed alias table is checked first, in order. Aliases are matched as
//! whole words so that `uk` does not fire inside unrelated words. The bare
//! `US` acronym is only accepted in upper case from the original text, since
//! lowercase `us` is an ordinary pronoun.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{clean_capture, is_rejected_phrase, is_stop_word, title_case};

/// (alias, canonical name); `None` means title-case the alias
const COUNTRY_ALIASES: &[(&str, Option<&str>)] = &[
    ("united states", Some("United States")),
    ("usa", Some("United States")),
    ("america", Some("United States")),
    ("united kingdom", Some("United Kingdom")),
    ("uk", Some("United Kingdom")),
    ("great britain", Some("United Kingdom")),
    ("britain", Some("United Kingdom")),
    ("england", Some("United Kingdom")),
    ("scotland", Some("United Kingdom")),
    ("united arab emirates", Some("United Arab Emirates")),
    ("uae", Some("United Arab Emirates")),
    ("saudi arabia", None),
    ("saudi", Some("Saudi Arabia")),
    ("south africa", None),
    ("new zealand", None),
    ("france", None),
    ("germany", None),
    ("italy", None),
    ("spain", None),
    ("portugal", None),
    ("switzerland", None),
    ("austria", None),
    ("monaco", None),
    ("netherlands", None),
    ("belgium", None),
    ("ireland", None),
    ("greece", None),
    ("turkey", None),
    ("cyprus", None),
    ("malta", None),
    ("croatia", None),
    ("qatar", None),
    ("kuwait", None),
    ("bahrain", None),
    ("oman", None),
    ("israel", None),
    ("egypt", None),
    ("morocco", None),
    ("nigeria", None),
    ("kenya", None),
    ("india", None),
    ("china", None),
    ("japan", None),
    ("singapore", None),
    ("thailand", None),
    ("australia", None),
    ("canada", None),
    ("mexico", None),
    ("brazil", None),
    ("argentina", None),
    ("russia", None),
    ("ukraine", None),
    ("poland", None),
    ("sweden", None),
    ("norway", None),
    ("denmark", None),
];

static ALIAS_PATTERNS: Lazy<Vec<(Regex, String)>> = Lazy::new(|| {
    COUNTRY_ALIASES
        .iter()
        .map(|(alias, canonical)| {
            let re = Regex::new(&format!(r"\b{}\b", regex::escape(alias))).unwrap();
            let name = canonical.map(str::to_string).unwrap_or_else(|| title_case(alias));
            (re, name)
        })
        .collect()
});

static US_ACRONYM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bU\.?S\.?(?:A\b|\b)").unwrap());

static FALLBACK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b(?:based|located|living)\s+in\s+([a-z][a-z'\-]*(?:\s+[a-z][a-z'\-]*){0,2})")
            .unwrap(),
        Regex::new(r"\b(?:i'?m|i\s+am|we'?re|we\s+are)\s+from\s+([a-z][a-z'\-]*(?:\s+[a-z][a-z'\-]*){0,2})")
            .unwrap(),
    ]
});

/// Keep words up to the first connector ("based in kenya and ..." -> "kenya")
fn trim_phrase(capture: &str) -> String {
    clean_capture(capture)
        .split_whitespace()
        .take_while(|w| !is_stop_word(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract a country from a message
///
/// `lower` is the lowercased message, `original` the message as typed.
pub fn extract_country(lower: &str, original: &str) -> Option<String> {
    if let Some((_, name)) = ALIAS_PATTERNS.iter().find(|(re, _)| re.is_match(lower)) {
        return Some(name.clone());
    }

    if US_ACRONYM.is_match(original) {
        return Some("United States".to_string());
    }

    FALLBACK_PATTERNS.iter().find_map(|re| {
        let phrase = trim_phrase(re.captures(lower)?.get(1)?.as_str());
        if phrase.len() < 3 || is_rejected_phrase(&phrase) {
            return None;
        }
        Some(title_case(&phrase))
    })
}
