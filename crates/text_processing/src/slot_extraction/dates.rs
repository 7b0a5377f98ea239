//! Date and timing extraction

use lead_agent_core::DateRange;
use once_cell::sync::Lazy;
use regex::Regex;

use super::clean_capture;

const MONTH: &str = r"(jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

const MONTH_SKIP: &str = r"(?:jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

// Exact dates: "5th june", "5 of june 2025", "june 5th, 2025"
static DAY_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?{MONTH}\b(?:,?\s+(\d{{4}}))?"
    ))
    .unwrap()
});

/// Month-first dates. The month table includes `may`, so the modal verb
/// followed by a number ("we may 2 ...") also reads as a date.
static MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b{MONTH}\s+(\d{{1,2}})(?:st|nd|rd|th)?\b(?:,?\s+(\d{{4}}))?"
    ))
    .unwrap()
});

// Ranges: "between 5th and 9th june", "from june 5 until june 9", "10-14 july"
static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let day = format!(
        r"\d{{1,2}}(?:st|nd|rd|th)?(?:\s+(?:of\s+)?{MONTH_SKIP})?|{MONTH_SKIP}\s+\d{{1,2}}(?:st|nd|rd|th)?"
    );
    Regex::new(&format!(
        r"\b(?:between|from)\s+({day})\s*(?:to|and|until|till|-|–)\s*({day})\b"
    ))
    .unwrap()
});

// Relative timing keywords
static TIMING_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\b(?:next|this)\s+(?:week|weekend|month)\b").unwrap(),
        Regex::new(r"\b(?:mon|tues|wednes|thurs|fri|satur|sun)days?\b").unwrap(),
        Regex::new(r"\btomorrow\b").unwrap(),
        Regex::new(r"\btonight\b").unwrap(),
        Regex::new(r"\bin\s+(?:\d+|a\s+few|a\s+couple\s+of)\s+(?:days?|weeks?)\b").unwrap(),
        Regex::new(r"\bthis\s+(?:morning|afternoon|evening)\b").unwrap(),
    ]
});

fn month_name(token: &str) -> Option<&'static str> {
    let prefix: String = token.chars().take(3).collect();
    let index = match prefix.as_str() {
        "jan" => 0,
        "feb" => 1,
        "mar" => 2,
        "apr" => 3,
        "may" => 4,
        "jun" => 5,
        "jul" => 6,
        "aug" => 7,
        "sep" => 8,
        "oct" => 9,
        "nov" => 10,
        "dec" => 11,
        _ => return None,
    };
    Some(MONTH_NAMES[index])
}

fn format_date(day: &str, month: &str, year: Option<&str>) -> Option<String> {
    let day: u32 = day.parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    let month = month_name(month)?;
    Some(match year {
        Some(year) => format!("{} {} {}", day, month, year),
        None => format!("{} {}", day, month),
    })
}

/// Extract an exact date (day + month name, optional year)
///
/// Returned as `"<day> <Month>[ <year>]"`.
pub fn extract_exact_date(text: &str) -> Option<String> {
    if let Some(caps) = DAY_MONTH.captures(text) {
        let date = format_date(
            caps.get(1)?.as_str(),
            caps.get(2)?.as_str(),
            caps.get(3).map(|m| m.as_str()),
        );
        if date.is_some() {
            return date;
        }
    }

    let caps = MONTH_DAY.captures(text)?;
    format_date(
        caps.get(2)?.as_str(),
        caps.get(1)?.as_str(),
        caps.get(3).map(|m| m.as_str()),
    )
}

/// Normalise one end of a range when it is a full date, else keep the text
fn normalize_range_end(raw: &str) -> String {
    let raw = clean_capture(raw);
    extract_exact_date(&raw).unwrap_or(raw)
}

/// Extract a date range (`between D1 and D2`, `from D1 to D2`, ...)
pub fn extract_date_range(text: &str) -> Option<DateRange> {
    let caps = DATE_RANGE.captures(text)?;
    let start = normalize_range_end(caps.get(1)?.as_str());
    let end = normalize_range_end(caps.get(2)?.as_str());
    Some(DateRange::new(start, end))
}

/// True when the message mentions relative timing ("next week", "friday", ...)
pub fn mentions_timing(text: &str) -> bool {
    TIMING_PATTERNS.iter().any(|re| re.is_match(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_date_day_first() {
        assert_eq!(extract_exact_date("on the 5th of june").as_deref(), Some("5 June"));
        assert_eq!(extract_exact_date("12 dec 2025 please").as_deref(), Some("12 December 2025"));
        assert_eq!(extract_exact_date("21st march, 2026").as_deref(), Some("21 March 2026"));
    }

    #[test]
    fn test_exact_date_month_first() {
        assert_eq!(extract_exact_date("july 4th").as_deref(), Some("4 July"));
        assert_eq!(extract_exact_date("sept 30, 2025").as_deref(), Some("30 September 2025"));
    }

    #[test]
    fn test_exact_date_rejects_invalid() {
        assert!(extract_exact_date("45 june").is_none());
        assert!(extract_exact_date("sometime in june").is_none());
        assert!(extract_exact_date("4 people").is_none());
    }

    #[test]
    fn test_modal_may_reads_as_date() {
        // Known false positive of the month-first rule
        assert_eq!(extract_exact_date("we may 2 more join").as_deref(), Some("2 May"));
        assert!(extract_exact_date("we may need a bigger jet").is_none());
    }

    #[test]
    fn test_date_range() {
        let range = extract_date_range("between 5th june and 9th june").unwrap();
        assert_eq!(range, DateRange::new("5 June", "9 June"));

        let range = extract_date_range("from 10th until 14th august").unwrap();
        assert_eq!(range, DateRange::new("10th", "14 August"));

        let range = extract_date_range("from may 2 - may 6").unwrap();
        assert_eq!(range, DateRange::new("2 May", "6 May"));

        assert!(extract_date_range("from london to paris").is_none());
    }

    #[test]
    fn test_range_also_yields_exact_date() {
        // Both matchers run independently on the same text
        let text = "between 5th june and 9th june";
        assert_eq!(extract_exact_date(text).as_deref(), Some("5 June"));
        assert!(extract_date_range(text).is_some());
    }

    #[test]
    fn test_relative_timing() {
        assert!(mentions_timing("next friday, 4 people"));
        assert!(mentions_timing("this weekend"));
        assert!(mentions_timing("tomorrow morning"));
        assert!(mentions_timing("in 3 days"));
        assert!(mentions_timing("sometime next month"));
        assert!(!mentions_timing("from london to paris"));
    }
}
