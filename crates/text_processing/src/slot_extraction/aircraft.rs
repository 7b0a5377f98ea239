//! Aircraft model and size category extraction

use lead_agent_core::AircraftCategory;
use once_cell::sync::Lazy;
use regex::Regex;

/// Named models in priority order: (needle, display name)
const AIRCRAFT_MODELS: &[(&str, &str)] = &[
    ("global 7500", "Bombardier Global 7500"),
    ("global 6000", "Bombardier Global 6000"),
    ("global 5000", "Bombardier Global 5000"),
    ("gulfstream g700", "Gulfstream G700"),
    ("gulfstream g650", "Gulfstream G650"),
    ("g650", "Gulfstream G650"),
    ("gulfstream g550", "Gulfstream G550"),
    ("g550", "Gulfstream G550"),
    ("g450", "Gulfstream G450"),
    ("g280", "Gulfstream G280"),
    ("falcon 8x", "Dassault Falcon 8X"),
    ("falcon 7x", "Dassault Falcon 7X"),
    ("falcon 2000", "Dassault Falcon 2000"),
    ("falcon 900", "Dassault Falcon 900"),
    ("challenger 650", "Bombardier Challenger 650"),
    ("challenger 605", "Bombardier Challenger 605"),
    ("challenger 350", "Bombardier Challenger 350"),
    ("legacy 600", "Embraer Legacy 600"),
    ("praetor 600", "Embraer Praetor 600"),
    ("praetor 500", "Embraer Praetor 500"),
    ("citation x", "Cessna Citation X"),
    ("citation latitude", "Cessna Citation Latitude"),
    ("citation xls", "Cessna Citation XLS"),
    ("citation cj4", "Cessna Citation CJ4"),
    ("citation cj3", "Cessna Citation CJ3"),
    ("citation mustang", "Cessna Citation Mustang"),
    ("learjet 75", "Learjet 75"),
    ("learjet 45", "Learjet 45"),
    ("hawker 900", "Hawker 900XP"),
    ("hawker 800", "Hawker 800XP"),
    ("phenom 300", "Embraer Phenom 300"),
    ("phenom 100", "Embraer Phenom 100"),
    ("pilatus pc-12", "Pilatus PC-12"),
    ("pc-12", "Pilatus PC-12"),
    ("king air", "Beechcraft King Air"),
    ("hondajet", "HondaJet"),
    ("honda jet", "HondaJet"),
];

static CATEGORY_PATTERNS: Lazy<Vec<(Regex, AircraftCategory)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"\blight\s+jets?\b").unwrap(), AircraftCategory::Light),
        (
            Regex::new(r"\b(?:super\s+)?mid[- ]?size\s+jets?\b").unwrap(),
            AircraftCategory::Midsize,
        ),
        (
            Regex::new(r"\bheavy\s+jets?\b|\blarge\s+(?:cabin|jets?)\b").unwrap(),
            AircraftCategory::Heavy,
        ),
    ]
});

/// First listed model whose name the message contains
pub fn extract_aircraft_model(text: &str) -> Option<String> {
    AIRCRAFT_MODELS
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, display)| display.to_string())
}

/// First matching size category, checked light → midsize → heavy
pub fn extract_aircraft_category(text: &str) -> Option<AircraftCategory> {
    CATEGORY_PATTERNS
        .iter()
        .find(|(re, _)| re.is_match(text))
        .map(|(_, category)| *category)
}
