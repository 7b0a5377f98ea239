//! Webhook notification dispatcher
//!
//! POSTs the lead payload as JSON to an operator endpoint. Any non-2xx
//! status counts as a failed delivery.

use std::time::Duration;

use async_trait::async_trait;
use lead_agent_config::DispatchConfig;
use lead_agent_core::{Error, LeadPayload, NotificationDispatcher};
use reqwest::Client;

use crate::ServerError;

pub struct WebhookDispatcher {
    client: Client,
    url: String,
}

impl WebhookDispatcher {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ServerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ServerError::Internal(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Build from config; `None` when no webhook is configured
    pub fn from_config(config: &DispatchConfig) -> Result<Option<Self>, ServerError> {
        match &config.webhook_url {
            Some(url) => Self::new(url.clone(), Duration::from_millis(config.timeout_ms)).map(Some),
            None => Ok(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl NotificationDispatcher for WebhookDispatcher {
    async fn dispatch(&self, payload: &LeadPayload) -> lead_agent_core::Result<()> {
        let response = self
            .client
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|e| Error::Dispatch(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Dispatch(format!("HTTP {}: {}", status, body)));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "webhook"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use lead_agent_core::{LeadFields, LeadIdentity, Priority};
    use parking_lot::Mutex;
    use std::sync::Arc;

    fn payload() -> LeadPayload {
        LeadPayload::new(
            LeadIdentity::new("u1", "daphne"),
            LeadFields::default(),
            75,
            Priority::High,
            "score_threshold",
        )
    }

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/hook", addr)
    }

    #[test]
    fn test_from_config() {
        assert!(WebhookDispatcher::from_config(&DispatchConfig::default())
            .unwrap()
            .is_none());

        let config = DispatchConfig {
            webhook_url: Some("http://localhost:9999/leads".into()),
            timeout_ms: 1000,
        };
        let dispatcher = WebhookDispatcher::from_config(&config).unwrap().unwrap();
        assert_eq!(dispatcher.url(), "http://localhost:9999/leads");
    }

    #[tokio::test]
    async fn test_posts_payload() {
        let received: Arc<Mutex<Vec<LeadPayload>>> = Arc::default();
        let sink = received.clone();
        let router = Router::new().route(
            "/hook",
            post(move |Json(body): Json<LeadPayload>| async move {
                sink.lock().push(body);
                StatusCode::OK
            }),
        );
        let url = serve(router).await;

        let dispatcher = WebhookDispatcher::new(url, Duration::from_secs(5)).unwrap();
        dispatcher.dispatch(&payload()).await.unwrap();

        let received = received.lock();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].identity.user_id, "u1");
        assert_eq!(received[0].summary, payload().summary);
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let router = Router::new().route(
            "/hook",
            post(|| async { (StatusCode::BAD_GATEWAY, "upstream down") }),
        );
        let url = serve(router).await;

        let dispatcher = WebhookDispatcher::new(url, Duration::from_secs(5)).unwrap();
        let err = dispatcher.dispatch(&payload()).await.unwrap_err();
        assert!(matches!(err, Error::Dispatch(ref msg) if msg.contains("502")));
    }
}
