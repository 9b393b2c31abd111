//! Client for a Rasa-style NLU webhook.
//!
//! One bounded attempt per message, no retry. Connection failures and
//! timeouts are a normal outcome here ([`NluReply::Unreachable`]) so the
//! caller can take its fallback branch instead of unwinding.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::catalog::{CANNOT_REPLY_TEXT, COMM_ERROR_TEXT, SERVER_ERROR_TEXT};

/// Outcome of one webhook dispatch. Deliberately not a `Result`: every
/// variant is a normal branch for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NluReply {
    /// The remote service produced final reply text.
    Text(String),
    /// Could not connect, or the request timed out. Triggers the fallback
    /// selector; never shown to the user as-is.
    Unreachable,
    /// The service answered but unusably (bad status, malformed payload).
    /// Carries the canned user-facing text; detail goes to the log only.
    Failed(String),
}

#[derive(Serialize)]
struct WebhookRequest<'a> {
    sender: &'static str,
    message: &'a str,
}

#[derive(Deserialize)]
struct WebhookReply {
    text: Option<String>,
    custom: Option<serde_json::Value>,
}

pub struct RasaClient {
    webhook_url: String,
    http: reqwest::Client,
}

impl RasaClient {
    /// `base_url` is the server root (e.g. `http://localhost:5005`); the
    /// REST webhook path is appended here.
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            webhook_url: format!("{}/webhooks/rest/webhook", base_url.trim_end_matches('/')),
            http,
        }
    }

    /// Send one message and classify the outcome.
    pub async fn dispatch(&self, message: &str) -> NluReply {
        let request = WebhookRequest { sender: "user", message };

        let response = match self.http.post(&self.webhook_url).json(&request).send().await {
            Ok(r) => r,
            Err(e) if e.is_connect() || e.is_timeout() => {
                warn!("NLU server unreachable: {e}");
                return NluReply::Unreachable;
            }
            Err(e) => {
                warn!("NLU request failed: {e}");
                return NluReply::Failed(COMM_ERROR_TEXT.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("NLU server returned status {status}");
            return NluReply::Failed(SERVER_ERROR_TEXT.to_string());
        }

        let replies: Vec<WebhookReply> = match response.json().await {
            Ok(r) => r,
            Err(e) => {
                warn!("Failed to parse NLU response: {e}");
                return NluReply::Failed(COMM_ERROR_TEXT.to_string());
            }
        };

        debug!("NLU returned {} reply object(s)", replies.len());

        match replies.into_iter().next() {
            Some(WebhookReply { text: Some(text), .. }) => NluReply::Text(text),
            // Structured payloads are already final reply data; flatten to
            // their JSON text.
            Some(WebhookReply { custom: Some(custom), .. }) => NluReply::Text(custom.to_string()),
            Some(WebhookReply { text: None, custom: None }) | None => {
                NluReply::Text(CANNOT_REPLY_TEXT.to_string())
            }
        }
    }
}
