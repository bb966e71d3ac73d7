//! Telemetry metric name constants.
//!
//! Centralised metric names for althing operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `althing_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `operation` — surface invoked (e.g. "debate_continue", "seed")
//! - `status` — outcome: "ok" or "error"
//! - `direction` — token direction: "input" or "output"
//! - `kind` — debate event kind: "text", "messages", "error", "done"

/// Total continuation requests handled by the proxy.
///
/// Labels: `operation`, `status` ("ok" | "error").
pub const REQUESTS_TOTAL: &str = "althing_requests_total";

/// Request duration in seconds.
///
/// Labels: `operation`.
pub const REQUEST_DURATION_SECONDS: &str = "althing_request_duration_seconds";

/// Total tokens consumed upstream.
///
/// Labels: `direction` ("input" | "output").
pub const TOKENS_TOTAL: &str = "althing_tokens_total";

/// Total debate events emitted to callers.
///
/// Labels: `kind` ("text" | "messages" | "error" | "done").
pub const DEBATE_EVENTS_TOTAL: &str = "althing_debate_events_total";
