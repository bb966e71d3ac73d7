//! Client-side conversation state for a streaming debate.
//!
//! Tracks the committed transcript, the in-flight streaming scratch
//! text, and whether a continuation is currently running. One
//! continuation at a time; a second start while generating is refused
//! as a no-op rather than queued.

use tracing::debug;

use crate::types::{DebateEvent, DebateMessage, MAX_TRANSCRIPT_LEN};

/// Conversation state driven by a stream of [`DebateEvent`]s.
#[derive(Debug, Clone)]
pub struct DebateConversation {
    initial_messages: Vec<DebateMessage>,
    messages: Vec<DebateMessage>,
    streaming_text: String,
    error: Option<String>,
    generating: bool,
    max_messages: usize,
}

impl DebateConversation {
    /// Create a conversation seeded with an opening transcript.
    pub fn new(initial_messages: Vec<DebateMessage>) -> Self {
        Self {
            messages: initial_messages.clone(),
            initial_messages,
            streaming_text: String::new(),
            error: None,
            generating: false,
            max_messages: MAX_TRANSCRIPT_LEN,
        }
    }

    /// The committed transcript, opening messages included.
    pub fn messages(&self) -> &[DebateMessage] {
        &self.messages
    }

    /// Raw text of the generation in flight, empty between continuations.
    pub fn streaming_text(&self) -> &str {
        &self.streaming_text
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Whether another continuation may start right now.
    pub fn can_continue(&self) -> bool {
        self.messages.len() < self.max_messages && !self.generating
    }

    /// Try to begin a continuation.
    ///
    /// Returns `false` without changing state when one is already
    /// running or the transcript is full. On success the previous
    /// error is cleared and the conversation is marked generating.
    pub fn start(&mut self) -> bool {
        if !self.can_continue() {
            debug!(
                generating = self.generating,
                len = self.messages.len(),
                "continuation refused"
            );
            return false;
        }
        self.generating = true;
        self.error = None;
        self.streaming_text.clear();
        true
    }

    /// Fold one stream event into the conversation.
    pub fn apply(&mut self, event: &DebateEvent) {
        match event {
            DebateEvent::Text(text) => {
                self.streaming_text.push_str(text);
            }
            DebateEvent::Messages(messages) => {
                self.messages.extend(messages.iter().cloned());
                self.streaming_text.clear();
            }
            DebateEvent::Error(message) => {
                self.error = Some(message.clone());
            }
            DebateEvent::Done => {
                self.generating = false;
                self.streaming_text.clear();
            }
        }
    }

    /// Restore the opening transcript, dropping generated messages,
    /// scratch text, and any recorded error.
    pub fn reset(&mut self) {
        self.messages = self.initial_messages.clone();
        self.streaming_text.clear();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Side;

    fn opening() -> Vec<DebateMessage> {
        vec![
            DebateMessage::new(Side::Left, "We must act."),
            DebateMessage::new(Side::Right, "At what cost?"),
        ]
    }

    #[test]
    fn event_sequence_commits_messages() {
        let mut conversation = DebateConversation::new(opening());
        assert!(conversation.start());

        conversation.apply(&DebateEvent::Text("[{\"side\"".to_string()));
        conversation.apply(&DebateEvent::Text(":\"center\"...".to_string()));
        assert_eq!(conversation.streaming_text(), "[{\"side\":\"center\"...");

        conversation.apply(&DebateEvent::Messages(vec![DebateMessage::new(
            Side::Center,
            "Both points stand.",
        )]));
        conversation.apply(&DebateEvent::Done);

        assert_eq!(conversation.messages().len(), 3);
        assert_eq!(conversation.streaming_text(), "");
        assert!(!conversation.is_generating());
        assert!(conversation.error().is_none());
    }

    #[test]
    fn second_start_while_generating_is_refused() {
        let mut conversation = DebateConversation::new(opening());
        assert!(conversation.start());
        assert!(!conversation.start());
        assert!(conversation.is_generating());

        conversation.apply(&DebateEvent::Done);
        assert!(conversation.start());
    }

    #[test]
    fn full_transcript_blocks_continuation() {
        let full = (0..MAX_TRANSCRIPT_LEN)
            .map(|_| DebateMessage::new(Side::Center, "..."))
            .collect();
        let mut conversation = DebateConversation::new(full);
        assert!(!conversation.can_continue());
        assert!(!conversation.start());
        assert!(!conversation.is_generating());
    }

    #[test]
    fn error_is_recorded_and_cleared_on_next_start() {
        let mut conversation = DebateConversation::new(opening());
        assert!(conversation.start());
        conversation.apply(&DebateEvent::Error("upstream failed".to_string()));
        conversation.apply(&DebateEvent::Done);
        assert_eq!(conversation.error(), Some("upstream failed"));

        assert!(conversation.start());
        assert!(conversation.error().is_none());
    }

    #[test]
    fn reset_restores_opening_transcript() {
        let mut conversation = DebateConversation::new(opening());
        assert!(conversation.start());
        conversation.apply(&DebateEvent::Messages(vec![DebateMessage::new(
            Side::Center,
            "New point.",
        )]));
        conversation.apply(&DebateEvent::Error("late failure".to_string()));
        conversation.apply(&DebateEvent::Done);
        assert_eq!(conversation.messages().len(), 3);

        conversation.reset();
        assert_eq!(conversation.messages(), opening());
        assert_eq!(conversation.streaming_text(), "");
        assert!(conversation.error().is_none());
    }

    #[test]
    fn partial_stream_leaves_scratch_until_done() {
        let mut conversation = DebateConversation::new(opening());
        assert!(conversation.start());
        conversation.apply(&DebateEvent::Text("partial".to_string()));
        assert_eq!(conversation.streaming_text(), "partial");

        conversation.apply(&DebateEvent::Done);
        assert_eq!(conversation.streaming_text(), "");
        assert_eq!(conversation.messages().len(), 2);
    }
}
