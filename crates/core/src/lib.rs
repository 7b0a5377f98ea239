//! Core traits and types for the lead qualification agent
//!
//! This crate provides foundational types used across all other crates:
//! - Conversation turns and roles
//! - Extracted lead fields and the per-message extraction proposal
//! - Lead payloads with a rendered human-readable summary
//! - Collaborator traits (notification dispatch, lead storage, reply generation)
//! - Error types

pub mod conversation;
pub mod error;
pub mod extraction;
pub mod lead;
pub mod traits;

pub use conversation::{Turn, TurnRole};
pub use error::{Error, Result};
pub use extraction::{ExtractedFields, PersonName};
pub use lead::{
    AircraftCategory, DateRange, LeadFields, LeadIdentity, LeadPayload, LeadRecord, Priority,
};
pub use traits::{LeadStore, NotificationDispatcher, ReplyContext, ReplyGenerator};
