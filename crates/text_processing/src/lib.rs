//! Text processing for the lead agent
//!
//! This crate turns one free-text customer message into an
//! [`ExtractedFields`](lead_agent_core::ExtractedFields) proposal using
//! ordered regex ladders:
//! - **Locations**: explicit `from X to Y` style patterns and a fill-only pair pattern
//! - **Dates**: exact dates, date ranges and relative timing keywords
//! - **Passengers**: head counts
//! - **Aircraft**: named models and size categories
//! - **Country**: alias table with a `based in` fallback
//! - **Name**: self-introductions
//! - **Signals**: detailed questions, urgency and handoff requests
//!
//! # Example
//!
//! ```
//! use lead_agent_text_processing::LeadExtractor;
//!
//! let extractor = LeadExtractor::new();
//! let fields = extractor.extract("Flying from London to Paris, 4 passengers", false);
//! assert_eq!(fields.origin.as_deref(), Some("London"));
//! assert_eq!(fields.pax, Some(4));
//! ```

pub mod slot_extraction;

pub use slot_extraction::LeadExtractor;
