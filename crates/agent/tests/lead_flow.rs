//! End-to-end qualification flow through `LeadAgent`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use lead_agent_agent::{
    DispatchOutcome, EscalationTrigger, InMemoryLeadStore, InboundEvent, LeadAgent,
    TemplateReplyGenerator,
};
use lead_agent_config::Settings;
use lead_agent_core::{
    Error, LeadPayload, LeadRecord, LeadStore, NotificationDispatcher, Priority, ReplyContext,
    ReplyGenerator, Result,
};
use parking_lot::Mutex;

/// Records every payload it is asked to send
#[derive(Default)]
struct RecordingDispatcher {
    sent: Mutex<Vec<LeadPayload>>,
}

impl RecordingDispatcher {
    fn count(&self) -> usize {
        self.sent.lock().len()
    }
}

#[async_trait]
impl NotificationDispatcher for RecordingDispatcher {
    async fn dispatch(&self, payload: &LeadPayload) -> Result<()> {
        // Yield so concurrent handlers interleave
        tokio::task::yield_now().await;
        self.sent.lock().push(payload.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Counts attempts and always fails
#[derive(Default)]
struct FailingDispatcher {
    attempts: AtomicUsize,
}

#[async_trait]
impl NotificationDispatcher for FailingDispatcher {
    async fn dispatch(&self, _payload: &LeadPayload) -> Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(Error::Dispatch("operator channel unavailable".into()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

struct FailingReplies;

#[async_trait]
impl ReplyGenerator for FailingReplies {
    async fn generate(&self, _context: &ReplyContext) -> Result<String> {
        Err(Error::Generation("model offline".into()))
    }
}

struct FailingStore;

#[async_trait]
impl LeadStore for FailingStore {
    async fn save(&self, _payload: &LeadPayload) -> Result<String> {
        Err(Error::Storage("disk full".into()))
    }

    async fn list(&self) -> Result<Vec<LeadRecord>> {
        Err(Error::Storage("disk full".into()))
    }
}

struct Harness {
    agent: Arc<LeadAgent>,
    dispatcher: Arc<RecordingDispatcher>,
    store: Arc<InMemoryLeadStore>,
}

fn harness() -> Harness {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let store = Arc::new(InMemoryLeadStore::new());
    let agent = LeadAgent::new(
        &Settings::default(),
        Arc::new(TemplateReplyGenerator::new()),
        dispatcher.clone(),
        store.clone(),
    );
    Harness {
        agent: Arc::new(agent),
        dispatcher,
        store,
    }
}

fn daphne(text: &str) -> InboundEvent {
    InboundEvent::new("42", "daphne_b", text).with_name("Daphne", None)
}

#[tokio::test]
async fn test_london_paris_scenario_escalates_on_yes() {
    let h = harness();

    let first = h.agent.handle_event(daphne("I need a jet from London to Paris")).await.unwrap();
    assert_eq!(first.score, 35);
    assert!(!first.escalated());

    let second = h.agent.handle_event(daphne("Next Friday, 4 people")).await.unwrap();
    assert_eq!(second.score, 60);
    assert!(!second.escalated());
    assert_eq!(h.dispatcher.count(), 0);

    let third = h.agent.handle_event(daphne("Yes please")).await.unwrap();
    // Below the threshold; the explicit "yes please" trigger escalates
    assert_eq!(third.score, 60);
    assert!(!h.agent.policy().should_escalate(third.score));
    assert_eq!(third.priority, Priority::Medium);
    assert_eq!(third.triggers, vec![EscalationTrigger::UserKeyword]);
    assert_eq!(third.dispatch, DispatchOutcome::Sent);
    assert_eq!(h.dispatcher.count(), 1);

    let snapshot = h.agent.snapshot("42").unwrap();
    assert_eq!(snapshot.fields.origin.as_deref(), Some("London"));
    assert_eq!(snapshot.fields.destination.as_deref(), Some("Paris"));
    assert_eq!(snapshot.fields.pax, Some(4));
    assert!(snapshot.fields.mentioned_timing);
    assert!(snapshot.fields.handoff_requested);
    assert!(snapshot.notification_sent);
    assert_eq!(snapshot.history.len(), 6);

    let sent = h.dispatcher.sent.lock()[0].clone();
    assert_eq!(sent.reason, "user_keyword");
    assert!(sent.summary.contains("Route: London → Paris"));
    assert!(sent.summary.contains("Passengers: 4"));
    assert!(sent.summary.contains("Name: Daphne"));

    let records = h.store.list().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(Some(records[0].id.clone()), third.lead_id);
}

#[tokio::test]
async fn test_second_escalation_is_suppressed() {
    let h = harness();
    h.agent.handle_event(daphne("#testlead")).await.unwrap();
    assert_eq!(h.dispatcher.count(), 1);

    let later = h
        .agent
        .handle_event(daphne("please connect me with an agent #testlead"))
        .await
        .unwrap();
    assert!(later.escalated());
    assert_eq!(later.dispatch, DispatchOutcome::AlreadyNotified);
    assert!(later.lead_id.is_none());
    assert_eq!(h.dispatcher.count(), 1);
}

#[tokio::test]
async fn test_score_threshold_escalates() {
    let h = harness();
    let outcome = h
        .agent
        .handle_event(InboundEvent::new(
            "7",
            "dblake",
            "My name is Daphne Blake, I need a light jet from London to Nice on 12th June for 4 passengers",
        ))
        .await
        .unwrap();

    assert_eq!(outcome.score, 85);
    assert_eq!(outcome.priority, Priority::High);
    assert!(outcome.triggers.contains(&EscalationTrigger::ScoreThreshold));
    assert!(outcome.reply.contains("specialist will be in touch"));
    assert_eq!(outcome.dispatch, DispatchOutcome::Sent);
}

#[tokio::test]
async fn test_failed_dispatch_still_sets_flag() {
    let dispatcher = Arc::new(FailingDispatcher::default());
    let store = Arc::new(InMemoryLeadStore::new());
    let agent = LeadAgent::new(
        &Settings::default(),
        Arc::new(TemplateReplyGenerator::new()),
        dispatcher.clone(),
        store.clone(),
    );

    let outcome = agent.handle_event(daphne("#testlead")).await.unwrap();
    assert_eq!(outcome.dispatch, DispatchOutcome::Failed);
    assert!(outcome.reply.contains("contact us directly"));
    // Storage is independent of delivery
    assert!(outcome.lead_id.is_some());
    assert!(agent.snapshot("42").unwrap().notification_sent);

    let retry = agent.handle_event(daphne("#testlead")).await.unwrap();
    assert_eq!(retry.dispatch, DispatchOutcome::AlreadyNotified);
    assert_eq!(dispatcher.attempts.load(Ordering::SeqCst), 1);
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_store_failure_keeps_gate_closed() {
    let dispatcher = Arc::new(RecordingDispatcher::default());
    let agent = LeadAgent::new(
        &Settings::default(),
        Arc::new(TemplateReplyGenerator::new()),
        dispatcher.clone(),
        Arc::new(FailingStore),
    );

    let outcome = agent.handle_event(daphne("#testlead")).await.unwrap();
    assert_eq!(outcome.dispatch, DispatchOutcome::Sent);
    assert!(outcome.lead_id.is_none());
    assert!(agent.snapshot("42").unwrap().notification_sent);

    let retry = agent.handle_event(daphne("#testlead")).await.unwrap();
    assert_eq!(retry.dispatch, DispatchOutcome::AlreadyNotified);
    assert_eq!(dispatcher.count(), 1);
    assert!(agent.leads().await.is_err());
}

#[tokio::test]
async fn test_reset_clears_state() {
    let h = harness();
    h.agent.handle_event(daphne("from london to paris, 4 passengers")).await.unwrap();
    h.agent.handle_event(daphne("/agent")).await.unwrap();
    assert!(h.agent.snapshot("42").unwrap().notification_sent);

    let reset = h.agent.handle_event(daphne("/reset")).await.unwrap();
    assert!(reset.reset);
    assert!(h.agent.snapshot("42").is_none());

    let fresh = h
        .agent
        .handle_event(InboundEvent::new("42", "daphne_b", "hello"))
        .await
        .unwrap();
    assert_eq!(fresh.score, 0);

    let snapshot = h.agent.snapshot("42").unwrap();
    assert!(!snapshot.notification_sent);
    assert!(snapshot.fields.origin.is_none());
    assert_eq!(snapshot.history.len(), 2);

    // The flag is clear again, so a new escalation dispatches
    h.agent.handle_event(daphne("/agent")).await.unwrap();
    assert_eq!(h.dispatcher.count(), 2);
}

#[tokio::test]
async fn test_duplicate_delivery_dispatches_once() {
    let h = harness();
    let event = daphne("#testlead");

    let (a, b) = tokio::join!(
        h.agent.handle_event(event.clone()),
        h.agent.handle_event(event)
    );
    let mut outcomes = vec![a.unwrap().dispatch, b.unwrap().dispatch];
    outcomes.sort_by_key(|o| *o == DispatchOutcome::Sent);

    assert_eq!(
        outcomes,
        vec![DispatchOutcome::AlreadyNotified, DispatchOutcome::Sent]
    );
    assert_eq!(h.dispatcher.count(), 1);
}

#[tokio::test]
async fn test_latest_pax_wins() {
    let h = harness();
    h.agent.handle_event(daphne("5 people")).await.unwrap();
    h.agent.handle_event(daphne("make that 2 passengers")).await.unwrap();
    assert_eq!(h.agent.snapshot("42").unwrap().fields.pax, Some(2));
}

#[tokio::test]
async fn test_reply_failure_uses_fallback() {
    let agent = LeadAgent::new(
        &Settings::default(),
        Arc::new(FailingReplies),
        Arc::new(RecordingDispatcher::default()),
        Arc::new(InMemoryLeadStore::new()),
    );

    let outcome = agent.handle_event(daphne("from london to paris")).await.unwrap();
    assert!(outcome.reply.starts_with("Sorry"));
    assert_eq!(outcome.score, 35);
}
