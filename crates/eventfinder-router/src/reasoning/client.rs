//! Reasoning service transport.
//!
//! [`ReasoningClient`] is the seam between routing logic and the HTTP call.
//! [`OpenAiClient`] speaks the OpenAI Responses API with Structured Outputs.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::debug;

use eventfinder_providers::BoxFuture;

use crate::config::ReasoningConfig;
use crate::error::{RoutingError, RoutingResult};

/// Name of the structured output format sent with every request.
pub const ROUTING_FORMAT_NAME: &str = "event_provider_routing";

/// A routing request, ready to be sent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutingRequest {
    /// System instructions.
    pub instructions: String,
    /// User message carrying the query context.
    pub input: String,
    /// JSON schema the reply must follow.
    pub schema: Value,
}

/// Sends routing requests to a reasoning service.
pub trait ReasoningClient: Send + Sync {
    /// Returns the raw JSON text produced by the service.
    ///
    /// # Errors
    ///
    /// Returns `Transport` or `Service` errors for failed calls and
    /// `InvalidDecision` when the reply carries no usable text.
    fn complete<'a>(&'a self, request: &'a RoutingRequest) -> BoxFuture<'a, RoutingResult<String>>;

    /// Model identifier, for logs.
    fn model(&self) -> &str;
}

/// OpenAI Responses API client.
pub struct OpenAiClient {
    http_client: reqwest::Client,
    config: ReasoningConfig,
}

impl OpenAiClient {
    /// Creates a new client.
    pub fn new(config: ReasoningConfig) -> RoutingResult<Self> {
        config.validate().map_err(RoutingError::config)?;

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("eventfinder/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RoutingError::config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Builds the request body for the Responses endpoint.
    fn request_body(&self, request: &RoutingRequest) -> Value {
        json!({
            "model": self.config.model,
            "input": [
                {"role": "system", "content": request.instructions},
                {"role": "user", "content": request.input},
            ],
            "text": {
                "format": {
                    "type": "json_schema",
                    "name": ROUTING_FORMAT_NAME,
                    "strict": true,
                    "schema": request.schema,
                }
            },
            "temperature": 0,
        })
    }

    async fn complete_impl(&self, request: &RoutingRequest) -> RoutingResult<String> {
        let url = self.config.responses_url();
        debug!(model = %self.config.model, url = %url, "requesting routing decision");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(&self.request_body(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    RoutingError::transport("request timeout")
                } else if e.is_connect() {
                    RoutingError::transport(format!("connection failed: {}", e))
                } else {
                    RoutingError::transport(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RoutingError::transport(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(RoutingError::service(status.as_u16(), error_message(&body)));
        }

        extract_output_text(&body)
    }
}

impl ReasoningClient for OpenAiClient {
    fn complete<'a>(&'a self, request: &'a RoutingRequest) -> BoxFuture<'a, RoutingResult<String>> {
        Box::pin(self.complete_impl(request))
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("config", &self.config)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ResponsesReply {
    output_text: Option<String>,
    output: Vec<OutputItem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct OutputItem {
    #[serde(rename = "type")]
    kind: String,
    content: Vec<ContentPart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentPart {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
    refusal: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorReply {
    error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    message: Option<String>,
}

/// Pulls the generated text out of a Responses API body.
fn extract_output_text(body: &str) -> RoutingResult<String> {
    let reply: ResponsesReply = serde_json::from_str(body).map_err(|e| {
        RoutingError::invalid_decision(format!("failed to parse response: {}", e))
    })?;

    if let Some(text) = reply.output_text
        && !text.trim().is_empty()
    {
        return Ok(text);
    }

    let mut text = String::new();
    for item in reply.output.iter().filter(|i| i.kind == "message") {
        for part in &item.content {
            match part.kind.as_str() {
                "output_text" => text.push_str(part.text.as_deref().unwrap_or_default()),
                "refusal" => {
                    return Err(RoutingError::invalid_decision(format!(
                        "model refused: {}",
                        part.refusal.as_deref().unwrap_or("no reason given")
                    )));
                }
                _ => {}
            }
        }
    }

    if text.trim().is_empty() {
        return Err(RoutingError::invalid_decision("response contained no output text"));
    }
    Ok(text)
}

/// Extracts `error.message` from an error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorReply>(body)
        .ok()
        .and_then(|r| r.error)
        .and_then(|e| e.message)
        .unwrap_or_else(|| body.trim().to_string())
}
