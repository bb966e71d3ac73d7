//! The debate continuation stream proxy.
//!
//! Relays upstream text fragments as they arrive, then finalizes the
//! full generation into structured messages. Every stream ends with
//! exactly one `Done` event, whatever happened before it.

use std::pin::Pin;
use std::sync::Arc;
use std::time::Instant;

use async_stream::stream;
use futures_util::{Stream, StreamExt};
use tracing::{debug, instrument, warn};

use crate::error::{AlthingError, Result};
use crate::providers::{CompletionEvent, CompletionProvider};
use crate::telemetry;
use crate::types::{DebateEvent, DebateMessage};

use super::prompt::{SYSTEM_PROMPT, build_continuation_prompt};
use super::ContinueRequest;

/// Start a debate continuation against the given provider.
///
/// Validation failures are returned as errors before any streaming
/// begins. Once the stream exists, all failures are surfaced in-stream
/// as an `Error` event followed by the terminal `Done`.
#[instrument(name = "debate.continue", skip(provider, request), fields(topic = %request.topic_id, provider = %provider.name()))]
pub async fn continue_debate(
    provider: Arc<dyn CompletionProvider>,
    request: ContinueRequest,
) -> Result<Pin<Box<dyn Stream<Item = DebateEvent> + Send>>> {
    request.validate()?;

    let prompt = build_continuation_prompt(&request);
    let start = Instant::now();

    let stream = stream! {
        let mut upstream = match provider.complete_stream(SYSTEM_PROMPT, &prompt).await {
            Ok(upstream) => upstream,
            Err(e) => {
                warn!(error = %e, "upstream call failed");
                yield emit(DebateEvent::Error(e.to_string()));
                yield emit(DebateEvent::Done);
                record_request(start, false);
                return;
            }
        };

        let mut full_text = String::new();
        while let Some(event) = upstream.next().await {
            match event {
                Ok(CompletionEvent::Text(text)) => {
                    full_text.push_str(&text);
                    yield emit(DebateEvent::Text(text));
                }
                Ok(CompletionEvent::Usage { input, output }) => {
                    record_token_usage(input, output);
                }
                Ok(CompletionEvent::Done) => break,
                Err(e) => {
                    warn!(error = %e, "upstream stream failed");
                    yield emit(DebateEvent::Error(e.to_string()));
                    yield emit(DebateEvent::Done);
                    record_request(start, false);
                    return;
                }
            }
        }

        let ok = match parse_messages(&full_text) {
            Ok(messages) => {
                debug!(count = messages.len(), "continuation parsed");
                yield emit(DebateEvent::Messages(messages));
                true
            }
            Err(_) => {
                warn!("model output was not a valid message array");
                yield emit(DebateEvent::Error("Failed to parse response".to_string()));
                false
            }
        };
        yield emit(DebateEvent::Done);
        record_request(start, ok);
    };

    Ok(Box::pin(stream))
}

/// Parse the model's full output as a message array, tolerating a
/// surrounding markdown code fence.
pub fn parse_messages(text: &str) -> Result<Vec<DebateMessage>> {
    serde_json::from_str(strip_code_fences(text)).map_err(|_| AlthingError::ParseFailed)
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.trim()
}

/// Count the event on its way out.
fn emit(event: DebateEvent) -> DebateEvent {
    metrics::counter!(telemetry::DEBATE_EVENTS_TOTAL, "kind" => event.kind()).increment(1);
    event
}

fn record_request(start: Instant, ok: bool) {
    let status = if ok { "ok" } else { "error" };
    metrics::counter!(telemetry::REQUESTS_TOTAL,
        "operation" => "debate_continue",
        "status" => status,
    )
    .increment(1);
    metrics::histogram!(telemetry::REQUEST_DURATION_SECONDS,
        "operation" => "debate_continue",
    )
    .record(start.elapsed().as_secs_f64());
}

fn record_token_usage(input: u64, output: u64) {
    metrics::counter!(telemetry::TOKENS_TOTAL, "direction" => "input").increment(input);
    metrics::counter!(telemetry::TOKENS_TOTAL, "direction" => "output").increment(output);
}
