//! HTTP Endpoints
//!
//! REST surface standing in for the messaging transport.

use std::time::Duration;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use lead_agent_agent::{ConversationSnapshot, HandleOutcome, InboundEvent};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;
use crate::ServerError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Inbound messages
        .route("/api/messages", post(post_message))
        // Conversations
        .route(
            "/api/conversations/:user_id",
            get(get_conversation).delete(reset_conversation),
        )
        .route("/api/conversations/:user_id/handoff", post(request_handoff))
        // Stored leads
        .route("/api/leads", get(list_leads))
        // Health check
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Process one customer message
async fn post_message(
    State(state): State<AppState>,
    Json(event): Json<InboundEvent>,
) -> Result<Json<HandleOutcome>, StatusCode> {
    let outcome = state
        .agent
        .handle_event(event)
        .await
        .map_err(ServerError::from)?;
    Ok(Json(outcome))
}

/// Conversation snapshot with score
async fn get_conversation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<ConversationSnapshot>, StatusCode> {
    let snapshot = state
        .agent
        .snapshot(&user_id)
        .ok_or(ServerError::NotFound(user_id))?;
    Ok(Json(snapshot))
}

/// Manual handoff
async fn request_handoff(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<HandleOutcome>, StatusCode> {
    let outcome = state
        .agent
        .request_handoff(&user_id)
        .await
        .map_err(ServerError::from)?;
    Ok(Json(outcome))
}

/// Reset a conversation
async fn reset_conversation(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> StatusCode {
    if state.agent.reset(&user_id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Stored lead records
async fn list_leads(State(state): State<AppState>) -> Result<Json<serde_json::Value>, StatusCode> {
    let leads = state.agent.leads().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list leads");
        StatusCode::from(ServerError::from(e))
    })?;

    Ok(Json(serde_json::json!({
        "count": leads.len(),
        "leads": leads,
    })))
}

async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    let environment = state.get_config().environment;
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "environment": environment,
        "conversations": state.agent.conversation_count(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use lead_agent_config::Settings;
    use tower::ServiceExt;

    async fn call(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<serde_json::Value>,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        let request = match body {
            Some(json) => request.body(Body::from(json.to_string())).unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn router() -> Router {
        create_router(AppState::new(Settings::default()))
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = call(&router(), Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["conversations"], 0);
    }

    #[tokio::test]
    async fn test_message_then_snapshot() {
        let router = router();
        let (status, body) = call(
            &router,
            Method::POST,
            "/api/messages",
            Some(serde_json::json!({
                "user_id": "42",
                "username": "daphne_b",
                "text": "I need a jet from London to Paris for 4 passengers",
                "first_name": "Daphne"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["score"], 55);
        assert_eq!(body["priority"], "medium");
        assert_eq!(body["dispatch"], "not_escalated");

        let (status, body) = call(&router, Method::GET, "/api/conversations/42", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["fields"]["origin"], "London");
        assert_eq!(body["fields"]["pax"], 4);
        assert_eq!(body["breakdown"]["route"], 30);
        assert_eq!(body["history"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn test_invalid_event_is_bad_request() {
        let (status, _) = call(
            &router(),
            Method::POST,
            "/api/messages",
            Some(serde_json::json!({ "user_id": " ", "text": "hello" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_handoff_stores_lead_once() {
        let router = router();
        let (status, body) =
            call(&router, Method::POST, "/api/conversations/7/handoff", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dispatch"], "sent");
        assert_eq!(body["triggers"][0], "manual_request");

        let (_, body) = call(&router, Method::POST, "/api/conversations/7/handoff", None).await;
        assert_eq!(body["dispatch"], "already_notified");

        let (status, body) = call(&router, Method::GET, "/api/leads", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["leads"][0]["payload"]["reason"], "manual_request");
    }

    #[tokio::test]
    async fn test_reset_and_missing_conversation() {
        let router = router();
        let (status, _) = call(&router, Method::DELETE, "/api/conversations/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        call(
            &router,
            Method::POST,
            "/api/messages",
            Some(serde_json::json!({ "user_id": "9", "text": "hi" })),
        )
        .await;
        let (status, _) = call(&router, Method::DELETE, "/api/conversations/9", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = call(&router, Method::GET, "/api/conversations/9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
