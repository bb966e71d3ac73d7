//! Anthropic Messages API provider.
//!
//! Calls `POST {base}/v1/messages` with `stream: true` and converts the
//! SSE event stream into [`CompletionEvent`]s. One upstream call per
//! request; the stream lives exactly as long as the request.

use std::pin::Pin;

use async_stream::try_stream;
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::error::{AlthingError, Result};

use super::{CompletionEvent, CompletionProvider};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";
const DEFAULT_MAX_TOKENS: u32 = 500;
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Messages API request body
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<RequestMessage<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct RequestMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// SSE event payloads we care about; everything else is skipped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum SseEvent {
    MessageStart { message: MessageStart },
    ContentBlockDelta { delta: BlockDelta },
    MessageDelta { usage: PartialUsage },
    MessageStop,
    Error { error: ApiErrorBody },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct MessageStart {
    usage: PartialUsage,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BlockDelta {
    TextDelta { text: String },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct PartialUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Streaming client for the Anthropic Messages API
pub struct AnthropicProvider {
    api_key: String,
    model: String,
    max_tokens: u32,
    client: reqwest::Client,
    base_url: String,
}

impl AnthropicProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_http_client(api_key, reqwest::Client::new())
    }

    /// Create a provider with a shared HTTP client.
    ///
    /// Prefer this over [`new`](Self::new) when the provider should share
    /// a connection pool with the rest of the process.
    pub fn with_http_client(api_key: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the model id.
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the per-request output token budget.
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Override the API base URL.
    ///
    /// Used for testing with wiremock. The full URL is `{base}/v1/messages`.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    fn name(&self) -> &str {
        "anthropic"
    }

    #[instrument(name = "anthropic.complete_stream", skip(self, system, prompt), fields(model = %self.model))]
    async fn complete_stream(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<CompletionEvent>> + Send>>> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            system,
            messages: vec![RequestMessage {
                role: "user",
                content: prompt,
            }],
            stream: true,
        };

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| AlthingError::Http(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(AlthingError::AuthenticationFailed);
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AlthingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let mut bytes = response.bytes_stream();
        let stream = try_stream! {
            let mut buffer = String::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = chunk.map_err(|e| AlthingError::Stream(e.to_string()))?;
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // SSE frames are separated by a blank line.
                while let Some(end) = buffer.find("\n\n") {
                    let frame: String = buffer.drain(..end + 2).collect();
                    for event in parse_frame(&frame) {
                        match event {
                            SseEvent::ContentBlockDelta {
                                delta: BlockDelta::TextDelta { text },
                            } => yield CompletionEvent::Text(text),
                            SseEvent::MessageStart { message } => {
                                yield CompletionEvent::Usage {
                                    input: message.usage.input_tokens,
                                    output: message.usage.output_tokens,
                                }
                            }
                            SseEvent::MessageDelta { usage } => {
                                yield CompletionEvent::Usage {
                                    input: usage.input_tokens,
                                    output: usage.output_tokens,
                                }
                            }
                            SseEvent::MessageStop => {
                                debug!("upstream stream complete");
                                yield CompletionEvent::Done;
                                return;
                            }
                            SseEvent::Error { error } => {
                                Err(AlthingError::Stream(error.message))?;
                            }
                            SseEvent::ContentBlockDelta { .. } | SseEvent::Other => {}
                        }
                    }
                }
            }
            // Upstream closed without message_stop; treat as done so
            // callers can still finalize what arrived.
            warn!("upstream closed without message_stop");
            yield CompletionEvent::Done;
        };

        Ok(Box::pin(stream))
    }
}

/// Parse the `data:` lines of one SSE frame, skipping unknown payloads.
fn parse_frame(frame: &str) -> Vec<SseEvent> {
    frame
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .filter_map(|data| match serde_json::from_str(data.trim()) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!(error = %e, "skipping unparseable SSE data line");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_text_delta_frame() {
        let frame = "event: content_block_delta\ndata: {\"type\":\"content_block_delta\",\"index\":0,\"delta\":{\"type\":\"text_delta\",\"text\":\"hello\"}}\n\n";
        let events = parse_frame(frame);
        assert_eq!(events.len(), 1);
        assert!(matches!(
            &events[0],
            SseEvent::ContentBlockDelta {
                delta: BlockDelta::TextDelta { text }
            } if text == "hello"
        ));
    }

    #[test]
    fn parses_usage_from_message_start_and_delta() {
        let start = "data: {\"type\":\"message_start\",\"message\":{\"id\":\"msg_1\",\"usage\":{\"input_tokens\":412,\"output_tokens\":1}}}\n\n";
        let events = parse_frame(start);
        assert!(matches!(
            &events[0],
            SseEvent::MessageStart { message } if message.usage.input_tokens == 412
        ));

        let delta = "data: {\"type\":\"message_delta\",\"delta\":{\"stop_reason\":\"end_turn\"},\"usage\":{\"output_tokens\":187}}\n\n";
        let events = parse_frame(delta);
        assert!(matches!(
            &events[0],
            SseEvent::MessageDelta { usage } if usage.output_tokens == 187
        ));
    }

    #[test]
    fn unknown_event_types_are_skipped() {
        let frame = "event: ping\ndata: {\"type\":\"ping\"}\n\n";
        let events = parse_frame(frame);
        assert!(matches!(events[0], SseEvent::Other));

        let garbage = "data: not json at all\n\n";
        assert!(parse_frame(garbage).is_empty());
    }

    #[test]
    fn builder_overrides_apply() {
        let provider = AnthropicProvider::new("test-key")
            .model("claude-sonnet-4-20250514")
            .max_tokens(1000)
            .base_url("http://127.0.0.1:9999");
        assert_eq!(provider.model, "claude-sonnet-4-20250514");
        assert_eq!(provider.max_tokens, 1000);
        assert_eq!(provider.base_url, "http://127.0.0.1:9999");
        assert_eq!(provider.name(), "anthropic");
    }
}
