//! Lead Agent
//!
//! Drives one inbound message through the pipeline:
//! registry → history + extraction → reply → score → triggers → gate →
//! dispatcher → lead store.
//!
//! Registry access happens under a short `parking_lot::Mutex` section that is
//! never held across an await. The gate flag is claimed inside that section,
//! before the dispatcher is called.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use lead_agent_config::{CommandConfig, Settings};
use lead_agent_core::{
    LeadFields, LeadIdentity, LeadPayload, LeadRecord, LeadStore, NotificationDispatcher,
    Priority, ReplyContext, ReplyGenerator, Turn, TurnRole,
};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::conversation::ConversationState;
use crate::dispatch::{DispatchGate, DispatchOutcome, LoggingDispatcher};
use crate::escalation::{EscalationPolicy, EscalationTrigger, TriggerInput};
use crate::lead_scoring::{LeadScorer, ScoreBreakdown};
use crate::registry::ConversationRegistry;
use crate::replies::{TemplateReplyGenerator, FALLBACK_REPLY};
use crate::store::InMemoryLeadStore;
use crate::AgentError;

const HANDOFF_REPLY: &str =
    "I've noted your request. A charter specialist will be in touch shortly.";
const ALREADY_NOTIFIED_REPLY: &str =
    "Your request is already with our charter team. They will be in touch shortly.";
const RESET_REPLY: &str = "Conversation reset. Where would you like to fly next?";
const DISPATCH_FAILED_NOTICE: &str =
    "I couldn't reach our charter team just now, so please contact us directly if it's urgent.";

/// A message from the transport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundEvent {
    pub user_id: String,
    #[serde(default)]
    pub username: String,
    pub text: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
    /// Names known to the transport; only used when the state is created
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

impl InboundEvent {
    pub fn new(
        user_id: impl Into<String>,
        username: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            username: username.into(),
            text: text.into(),
            timestamp: Utc::now(),
            first_name: None,
            last_name: None,
        }
    }

    pub fn with_name(mut self, first_name: impl Into<String>, last_name: Option<String>) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = last_name;
        self
    }

    fn validate(&self) -> Result<(), AgentError> {
        if self.user_id.trim().is_empty() {
            return Err(AgentError::InvalidEvent("user_id is empty".into()));
        }
        if self.text.trim().is_empty() {
            return Err(AgentError::InvalidEvent("text is empty".into()));
        }
        Ok(())
    }
}

/// What happened for one inbound message
#[derive(Debug, Clone, Serialize)]
pub struct HandleOutcome {
    pub user_id: String,
    pub reply: String,
    pub score: u8,
    pub priority: Priority,
    /// Triggers that fired on this turn
    pub triggers: Vec<EscalationTrigger>,
    pub dispatch: DispatchOutcome,
    /// Stored lead id when a notification was attempted and saved
    pub lead_id: Option<String>,
    pub reset: bool,
}

impl HandleOutcome {
    pub fn escalated(&self) -> bool {
        !self.triggers.is_empty()
    }
}

/// Read-only view of a conversation
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSnapshot {
    pub identity: LeadIdentity,
    pub fields: LeadFields,
    pub history: Vec<Turn>,
    pub notification_sent: bool,
    pub last_activity: DateTime<Utc>,
    pub score: u8,
    pub breakdown: ScoreBreakdown,
    pub priority: Priority,
}

/// Gate decision taken under the registry lock
struct Decision {
    score: u8,
    priority: Priority,
    triggers: Vec<EscalationTrigger>,
    payload: Option<LeadPayload>,
    already_notified: bool,
}

/// Lead qualification agent
pub struct LeadAgent {
    registry: Mutex<ConversationRegistry>,
    scorer: LeadScorer,
    policy: EscalationPolicy,
    commands: CommandConfig,
    replies: Arc<dyn ReplyGenerator>,
    gate: DispatchGate,
    store: Arc<dyn LeadStore>,
}

impl LeadAgent {
    pub fn new(
        settings: &Settings,
        replies: Arc<dyn ReplyGenerator>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        store: Arc<dyn LeadStore>,
    ) -> Self {
        Self {
            registry: Mutex::new(ConversationRegistry::new()),
            scorer: LeadScorer::new(settings.qualification.anonymous_name.clone()),
            policy: EscalationPolicy::new(&settings.qualification, &settings.triggers),
            commands: settings.commands.clone(),
            replies,
            gate: DispatchGate::new(dispatcher),
            store,
        }
    }

    /// Template replies, log-only dispatch and in-memory storage
    pub fn with_defaults(settings: &Settings) -> Self {
        Self::new(
            settings,
            Arc::new(TemplateReplyGenerator::new()),
            Arc::new(LoggingDispatcher::new()),
            Arc::new(InMemoryLeadStore::new()),
        )
    }

    pub fn policy(&self) -> &EscalationPolicy {
        &self.policy
    }

    pub fn conversation_count(&self) -> usize {
        self.registry.lock().len()
    }

    /// Process one inbound message
    pub async fn handle_event(&self, event: InboundEvent) -> Result<HandleOutcome, AgentError> {
        event.validate()?;
        tracing::debug!(
            user_id = %event.user_id,
            received_at = %event.timestamp,
            "Inbound message"
        );

        let command = event.text.trim();
        if command.eq_ignore_ascii_case(&self.commands.reset) {
            self.reset(&event.user_id);
            return Ok(HandleOutcome {
                user_id: event.user_id,
                reply: RESET_REPLY.to_string(),
                score: 0,
                priority: self.policy.priority(0),
                triggers: Vec::new(),
                dispatch: DispatchOutcome::NotEscalated,
                lead_id: None,
                reset: true,
            });
        }
        if command.eq_ignore_ascii_case(&self.commands.handoff) {
            return Ok(self.escalate_manually(&event).await);
        }

        let context = {
            let mut registry = self.registry.lock();
            let state = Self::resolve(&mut registry, &event);
            state.add_message(&event.text, TurnRole::User);
            self.reply_context(state)
        };

        let reply = match self.replies.generate(&context).await {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(user_id = %event.user_id, error = %e, "Reply generation failed");
                FALLBACK_REPLY.to_string()
            }
        };

        let decision = {
            let mut registry = self.registry.lock();
            let state = Self::resolve(&mut registry, &event);
            state.add_message(&reply, TurnRole::Assistant);

            let score = self.scorer.score(state);
            let triggers = self.policy.evaluate(&TriggerInput {
                score,
                user_text: Some(&event.text),
                assistant_reply: Some(&reply),
                manual: false,
            });
            self.decide(state, score, triggers)
        };

        Ok(self.finish(event.user_id, reply, decision).await)
    }

    /// Escalate a conversation on request, whatever its score
    pub async fn request_handoff(&self, user_id: &str) -> Result<HandleOutcome, AgentError> {
        let event = InboundEvent::new(user_id, user_id, self.commands.handoff.clone());
        event.validate()?;
        Ok(self.escalate_manually(&event).await)
    }

    /// Drop all state for a user. Returns false if there was none.
    pub fn reset(&self, user_id: &str) -> bool {
        let removed = self.registry.lock().remove(user_id).is_some();
        tracing::info!(user_id = %user_id, removed, "Conversation reset");
        removed
    }

    pub fn snapshot(&self, user_id: &str) -> Option<ConversationSnapshot> {
        let registry = self.registry.lock();
        let state = registry.get(user_id)?;
        let breakdown = self.scorer.breakdown(&state.fields, &state.identity);
        let score = breakdown.total();

        Some(ConversationSnapshot {
            identity: state.identity.clone(),
            fields: state.fields.clone(),
            history: state.history().to_vec(),
            notification_sent: state.notification_sent,
            last_activity: state.last_activity,
            score,
            breakdown,
            priority: self.policy.priority(score),
        })
    }

    /// Stored lead records
    pub async fn leads(&self) -> Result<Vec<LeadRecord>, AgentError> {
        Ok(self.store.list().await?)
    }

    async fn escalate_manually(&self, event: &InboundEvent) -> HandleOutcome {
        let (decision, reply) = {
            let mut registry = self.registry.lock();
            let state = Self::resolve(&mut registry, event);

            let score = self.scorer.score(state);
            let triggers = self.policy.evaluate(&TriggerInput {
                score,
                manual: true,
                ..Default::default()
            });
            let decision = self.decide(state, score, triggers);

            let reply = if decision.already_notified {
                ALREADY_NOTIFIED_REPLY
            } else {
                HANDOFF_REPLY
            };
            state.add_message(reply, TurnRole::Assistant);
            (decision, reply.to_string())
        };

        self.finish(event.user_id.clone(), reply, decision).await
    }

    fn resolve<'a>(
        registry: &'a mut ConversationRegistry,
        event: &InboundEvent,
    ) -> &'a mut ConversationState {
        let is_new = !registry.contains(&event.user_id);
        let state = registry.get_or_create(&event.user_id, &event.username);
        if is_new {
            state.seed_name(event.first_name.clone(), event.last_name.clone());
        }
        state
    }

    fn reply_context(&self, state: &ConversationState) -> ReplyContext {
        let score = self.scorer.score(state);
        ReplyContext {
            identity: state.identity.clone(),
            fields: state.fields.clone(),
            history: state.history().to_vec(),
            score,
            qualified: self.policy.should_escalate(score),
        }
    }

    fn decide(
        &self,
        state: &mut ConversationState,
        score: u8,
        triggers: Vec<EscalationTrigger>,
    ) -> Decision {
        let priority = self.policy.priority(score);
        let mut decision = Decision {
            score,
            priority,
            triggers,
            payload: None,
            already_notified: false,
        };

        if decision.triggers.is_empty() {
            return decision;
        }

        let reason = EscalationTrigger::reason(&decision.triggers);
        if !state.claim_notification() {
            tracing::debug!(
                user_id = %state.identity.user_id,
                reason = %reason,
                "Escalation suppressed, already notified"
            );
            decision.already_notified = true;
            return decision;
        }

        tracing::info!(
            user_id = %state.identity.user_id,
            score,
            priority = %priority,
            reason = %reason,
            "Escalating lead"
        );
        decision.payload = Some(LeadPayload::new(
            state.identity.clone(),
            state.fields.clone(),
            score,
            priority,
            reason,
        ));
        decision
    }

    async fn finish(&self, user_id: String, mut reply: String, decision: Decision) -> HandleOutcome {
        let mut dispatch = if decision.already_notified {
            DispatchOutcome::AlreadyNotified
        } else {
            DispatchOutcome::NotEscalated
        };
        let mut lead_id = None;

        if let Some(payload) = &decision.payload {
            dispatch = self.gate.deliver(payload).await;
            if dispatch == DispatchOutcome::Failed {
                reply.push(' ');
                reply.push_str(DISPATCH_FAILED_NOTICE);
            }

            match self.store.save(payload).await {
                Ok(id) => lead_id = Some(id),
                Err(e) => {
                    tracing::warn!(user_id = %user_id, error = %e, "Failed to store lead");
                }
            }
        }

        HandleOutcome {
            user_id,
            reply,
            score: decision.score,
            priority: decision.priority,
            triggers: decision.triggers,
            dispatch,
            lead_id,
            reset: false,
        }
    }
}

impl std::fmt::Debug for LeadAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeadAgent")
            .field("conversations", &self.conversation_count())
            .field("policy", &self.policy)
            .field("gate", &self.gate)
            .finish()
    }
}
