//! Debate continuation — prompt composition, stream proxy, conversation state.
//!
//! A continuation takes the transcript so far, asks the upstream model
//! for 2-3 new messages, and relays the generation as a stream of
//! [`DebateEvent`]s. The proxy holds no cross-request state; each
//! continuation is one upstream call scoped to the request.

mod conversation;
mod prompt;
mod stream;

use serde::{Deserialize, Serialize};

use crate::error::{AlthingError, Result};
use crate::types::{DebateMessage, MAX_TRANSCRIPT_LEN};

pub use conversation::DebateConversation;
pub use prompt::{SYSTEM_PROMPT, build_continuation_prompt};
pub use stream::{continue_debate, parse_messages};

/// A request to continue a debate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContinueRequest {
    pub topic_id: String,
    pub topic_name: String,
    pub left_label: String,
    pub right_label: String,
    pub messages: Vec<DebateMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_question: Option<String>,
}

impl ContinueRequest {
    /// Check the request is well-formed and the transcript has room.
    pub fn validate(&self) -> Result<()> {
        if self.topic_id.is_empty()
            || self.topic_name.is_empty()
            || self.left_label.is_empty()
            || self.right_label.is_empty()
        {
            return Err(AlthingError::InvalidInput(
                "missing required fields".to_string(),
            ));
        }
        if self.messages.len() >= MAX_TRANSCRIPT_LEN {
            return Err(AlthingError::TranscriptFull {
                max: MAX_TRANSCRIPT_LEN,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn request() -> ContinueRequest {
        ContinueRequest {
            topic_id: "climate".into(),
            topic_name: "Climate & Energy".into(),
            left_label: "Green transition".into(),
            right_label: "Market solutions".into(),
            messages: vec![DebateMessage::new(Side::Left, "We must act.")],
            user_question: None,
        }
    }

    #[test]
    fn valid_request_passes() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn empty_required_field_is_rejected() {
        let mut bad = request();
        bad.topic_name.clear();
        assert!(matches!(
            bad.validate(),
            Err(AlthingError::InvalidInput(_))
        ));
    }

    #[test]
    fn full_transcript_is_rejected_with_cap() {
        let mut full = request();
        full.messages = (0..MAX_TRANSCRIPT_LEN)
            .map(|_| DebateMessage::new(Side::Center, "..."))
            .collect();
        assert!(matches!(
            full.validate(),
            Err(AlthingError::TranscriptFull { max: MAX_TRANSCRIPT_LEN })
        ));
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_string(&request()).unwrap();
        assert!(json.contains("topicId"));
        assert!(json.contains("leftLabel"));
        assert!(!json.contains("userQuestion"));

        let with_question = ContinueRequest {
            user_question: Some("What about nuclear?".into()),
            ..request()
        };
        let json = serde_json::to_string(&with_question).unwrap();
        assert!(json.contains("userQuestion"));
    }
}
