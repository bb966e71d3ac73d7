//! Completion providers — the upstream model seam.
//!
//! The debate proxy talks to upstream models through the
//! [`CompletionProvider`] trait rather than a concrete client. This keeps
//! the streaming pipeline testable (a scripted provider in tests) and
//! leaves room for other upstreams without touching the proxy.

mod anthropic;

use std::pin::Pin;

use async_trait::async_trait;
use futures_util::Stream;

use crate::error::Result;

pub use anthropic::AnthropicProvider;

/// Event from an upstream completion stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionEvent {
    /// A fragment of generated text, in arrival order.
    Text(String),
    /// Token accounting reported by the upstream.
    Usage { input: u64, output: u64 },
    /// Upstream finished generating.
    Done,
}

/// A streaming text-completion upstream.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Provider name for logging/debugging (e.g., "anthropic")
    fn name(&self) -> &str;

    /// Start a streaming completion for one prompt.
    ///
    /// The returned stream yields text fragments as the model produces
    /// them, interleaved with usage reports, and ends with `Done`.
    /// Errors after the stream starts are yielded in-stream.
    async fn complete_stream(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<CompletionEvent>> + Send>>>;
}
