//! Althing - Alignment scoring and debate streaming for voter education
//!
//! This crate provides the two cores of a voter education app: a pure
//! alignment scorer that compares a user's policy positions against
//! party positions, and a streaming debate proxy that continues a
//! three-persona political debate through an upstream LLM.
//!
//! # Scoring Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//!
//! use althing::data::DataSet;
//! use althing::scoring::{alignment_label, compute_scores};
//! use althing::types::SliderPosition;
//!
//! fn main() -> althing::Result<()> {
//!     let data = DataSet::embedded();
//!     let mut answers = BTreeMap::new();
//!     answers.insert("climate".to_string(), SliderPosition::new(-2)?);
//!     answers.insert("housing".to_string(), SliderPosition::new(1)?);
//!
//!     let scores = compute_scores(&answers, &data.topics, &data.parties, &data.positions);
//!     let best = &scores[0];
//!     println!("{}: {} ({})", best.party.name, best.score, alignment_label(best.score));
//!     Ok(())
//! }
//! ```
//!
//! # Debate Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use althing::debate::{ContinueRequest, continue_debate};
//! use althing::providers::AnthropicProvider;
//! use althing::types::{DebateMessage, Side};
//! use futures_util::StreamExt;
//!
//! #[tokio::main]
//! async fn main() -> althing::Result<()> {
//!     let provider = Arc::new(AnthropicProvider::new("sk-ant-your-key"));
//!     let request = ContinueRequest {
//!         topic_id: "climate".to_string(),
//!         topic_name: "Climate & Energy".to_string(),
//!         left_label: "Rapid green transition".to_string(),
//!         right_label: "Market-led transition".to_string(),
//!         messages: vec![DebateMessage::new(Side::Left, "We must act now.")],
//!         user_question: None,
//!     };
//!
//!     let mut events = continue_debate(provider, request).await?;
//!     while let Some(event) = events.next().await {
//!         println!("{event:?}");
//!     }
//!     Ok(())
//! }
//! ```

pub mod data;
pub mod debate;
pub mod electorate;
pub mod error;
pub mod providers;
pub mod scoring;
#[cfg(feature = "server")]
pub mod server;
pub mod session;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use error::{AlthingError, Result};
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, version_string};

pub use debate::{ContinueRequest, DebateConversation, continue_debate};
pub use providers::{AnthropicProvider, CompletionEvent, CompletionProvider};
pub use scoring::{PartyScore, TopicBreakdown, alignment_label, compute_scores};
pub use session::QuizSession;
pub use types::{
    DebateEvent, DebateMessage, MAX_TRANSCRIPT_LEN, Party, PartyPosition, PolicyTopic, Side,
    SliderPosition,
};
