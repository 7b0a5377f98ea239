//! Template reply generator
//!
//! Asks for the next missing trip detail. Once the lead is qualified it
//! answers with a hand-over sentence instead.

use async_trait::async_trait;
use lead_agent_core::{LeadFields, ReplyContext, ReplyGenerator, Result};

/// Sent when reply generation fails
pub const FALLBACK_REPLY: &str =
    "Sorry, I didn't quite catch that. Could you tell me a little more about your trip?";

#[derive(Debug, Clone, Default)]
pub struct TemplateReplyGenerator;

impl TemplateReplyGenerator {
    pub fn new() -> Self {
        Self
    }

    fn next_question(fields: &LeadFields, has_name: bool) -> String {
        match (&fields.origin, &fields.destination) {
            (None, None) => return "Where would you like to fly from, and to?".to_string(),
            (Some(origin), None) => {
                return format!("Where will you be flying to from {}?", origin);
            }
            (None, Some(destination)) => {
                return format!("Where will you be departing from for {}?", destination);
            }
            (Some(_), Some(_)) => {}
        }

        if fields.exact_date.is_none() && fields.date_range.is_none() {
            if fields.mentioned_timing {
                return "Do you have an exact date in mind?".to_string();
            }
            return "When are you looking to travel?".to_string();
        }
        if fields.pax.is_none() {
            return "How many passengers will be travelling?".to_string();
        }
        if fields.aircraft_model.is_none() && fields.aircraft_category.is_none() {
            return "Do you have a preferred aircraft, or a size such as a light, midsize or heavy jet?"
                .to_string();
        }
        if !has_name {
            return "May I take your name?".to_string();
        }
        "Thanks, that covers the essentials. Is there anything else we should know about the trip?"
            .to_string()
    }
}

#[async_trait]
impl ReplyGenerator for TemplateReplyGenerator {
    async fn generate(&self, context: &ReplyContext) -> Result<String> {
        let greeting = match &context.identity.first_name {
            Some(name) => format!("Thank you, {}.", name),
            None => "Thank you.".to_string(),
        };

        if context.qualified {
            return Ok(format!(
                "{} I've noted your request and a charter specialist will be in touch shortly.",
                greeting
            ));
        }

        let question = Self::next_question(&context.fields, context.identity.first_name.is_some());
        Ok(format!("{} {}", greeting, question))
    }
}
