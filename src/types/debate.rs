//! Debate transcript and stream event types

use serde::{Deserialize, Serialize};

/// Hard cap on transcript length. Continuations are refused once a
/// conversation reaches this many messages.
pub const MAX_TRANSCRIPT_LEN: usize = 20;

/// Which persona a debate message speaks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
    Center,
}

impl Side {
    /// Speaker name used when rendering a transcript into a prompt.
    pub fn speaker(self) -> &'static str {
        match self {
            Side::Left => "PROGRESSIVE",
            Side::Right => "LIBERTARIAN",
            Side::Center => "CENTRIST",
        }
    }
}

/// A single utterance in a debate transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebateMessage {
    pub side: Side,
    pub text: String,
}

impl DebateMessage {
    pub fn new(side: Side, text: impl Into<String>) -> Self {
        Self {
            side,
            text: text.into(),
        }
    }

    /// Create a left-persona message
    pub fn left(text: impl Into<String>) -> Self {
        Self::new(Side::Left, text)
    }

    /// Create a right-persona message
    pub fn right(text: impl Into<String>) -> Self {
        Self::new(Side::Right, text)
    }

    /// Create a center-persona message
    pub fn center(text: impl Into<String>) -> Self {
        Self::new(Side::Center, text)
    }
}

/// Event emitted while a debate continuation streams.
///
/// The wire form is `{"type": ..., "content": ...}` with `content`
/// omitted for `Done`. Consumers see raw `Text` fragments as they
/// arrive, then either one `Messages` or one `Error`, then `Done`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "lowercase")]
pub enum DebateEvent {
    /// Raw text fragment relayed from the upstream model.
    Text(String),
    /// Parsed final turn: the new messages to append to the transcript.
    Messages(Vec<DebateMessage>),
    /// Terminal failure; no `Messages` event will follow.
    Error(String),
    /// Stream end marker, emitted exactly once on every path.
    Done,
}

impl DebateEvent {
    /// Event kind as a metric label.
    pub fn kind(&self) -> &'static str {
        match self {
            DebateEvent::Text(_) => "text",
            DebateEvent::Messages(_) => "messages",
            DebateEvent::Error(_) => "error",
            DebateEvent::Done => "done",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Side::Left).unwrap(), "\"left\"");
        assert_eq!(serde_json::to_string(&Side::Center).unwrap(), "\"center\"");
    }

    #[test]
    fn event_wire_format_is_tagged() {
        let event = DebateEvent::Text("hello".into());
        assert_eq!(
            serde_json::to_string(&event).unwrap(),
            r#"{"type":"text","content":"hello"}"#
        );

        let done = DebateEvent::Done;
        assert_eq!(serde_json::to_string(&done).unwrap(), r#"{"type":"done"}"#);
    }

    #[test]
    fn messages_event_carries_sides() {
        let event = DebateEvent::Messages(vec![
            DebateMessage::left("we must act"),
            DebateMessage::right("markets will adapt"),
        ]);
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains(r#""side":"left""#));
        assert!(json.contains(r#""side":"right""#));

        let back: DebateEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }

    #[test]
    fn speaker_names_match_personas() {
        assert_eq!(Side::Left.speaker(), "PROGRESSIVE");
        assert_eq!(Side::Right.speaker(), "LIBERTARIAN");
        assert_eq!(Side::Center.speaker(), "CENTRIST");
    }
}
