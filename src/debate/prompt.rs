//! Prompt composition for debate continuations.
//!
//! The system prompt fixes the three personas and the JSON-only output
//! contract; the continuation prompt carries the topic, pole labels,
//! and transcript so far. Prompt text is deterministic for a given
//! request.

use std::fmt::Write;

use super::ContinueRequest;

/// Persona definitions and output contract for the upstream model.
pub const SYSTEM_PROMPT: &str = r#"You continue political debates for Informed Vote, an Australian voter education app.

THREE CHARACTERS:
- PROGRESSIVE (left): Advocates collective action, government solutions. Passionate but evidence-based.
- LIBERTARIAN (right): Advocates individual freedom, market solutions. Practical and principled.
- CENTRIST (center): Bridges perspectives, adds nuance. Thoughtful, acknowledges trade-offs.

RULES:
1. Continue naturally from the conversation
2. If the user asked a question, have characters respond to it
3. Generate 2-3 short messages (1-2 sentences each)
4. Be adversarial but never personal
5. Use Australian context and spelling
6. Steelman both sides - give each strong arguments

OUTPUT FORMAT:
Return ONLY a JSON array, no other text:
[{"side": "left"|"right"|"center", "text": "..."}]"#;

/// Render the continuation prompt for one request.
///
/// The transcript is numbered from 1 with each message attributed to
/// its persona's speaker name. A user question, when present, replaces
/// the natural-continuation instruction.
pub fn build_continuation_prompt(request: &ContinueRequest) -> String {
    let mut prompt = format!(
        "Topic: {}\nProgressive position: {}\nLibertarian position: {}\n\nCONVERSATION SO FAR:\n",
        request.topic_name, request.left_label, request.right_label
    );

    for (i, message) in request.messages.iter().enumerate() {
        // Infallible for String targets.
        let _ = writeln!(
            prompt,
            "{}. {}: \"{}\"",
            i + 1,
            message.side.speaker(),
            message.text
        );
    }
    prompt.push('\n');

    match &request.user_question {
        Some(question) => {
            let _ = write!(
                prompt,
                "USER QUESTION: \"{question}\"\n\nGenerate 2-3 responses where the characters address this question from their perspectives."
            );
        }
        None => {
            prompt.push_str(
                "Continue the debate naturally with 2-3 more messages. Mix up which characters speak.",
            );
        }
    }

    prompt.push_str(
        "\n\nRemember: Return ONLY a valid JSON array like [{\"side\": \"left\", \"text\": \"...\"}, ...]",
    );

    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DebateMessage, Side};

    fn request(user_question: Option<&str>) -> ContinueRequest {
        ContinueRequest {
            topic_id: "housing".into(),
            topic_name: "Housing".into(),
            left_label: "Public housing".into(),
            right_label: "Deregulate building".into(),
            messages: vec![
                DebateMessage::new(Side::Left, "The market has failed."),
                DebateMessage::new(Side::Right, "Zoning laws created this."),
                DebateMessage::new(Side::Center, "Context matters."),
            ],
            user_question: user_question.map(String::from),
        }
    }

    #[test]
    fn transcript_is_numbered_with_speaker_names() {
        let prompt = build_continuation_prompt(&request(None));
        assert!(prompt.contains("1. PROGRESSIVE: \"The market has failed.\""));
        assert!(prompt.contains("2. LIBERTARIAN: \"Zoning laws created this.\""));
        assert!(prompt.contains("3. CENTRIST: \"Context matters.\""));
    }

    #[test]
    fn natural_continuation_without_question() {
        let prompt = build_continuation_prompt(&request(None));
        assert!(prompt.contains("Continue the debate naturally"));
        assert!(!prompt.contains("USER QUESTION"));
    }

    #[test]
    fn user_question_replaces_continuation_instruction() {
        let prompt = build_continuation_prompt(&request(Some("What about renters?")));
        assert!(prompt.contains("USER QUESTION: \"What about renters?\""));
        assert!(prompt.contains("address this question"));
        assert!(!prompt.contains("Continue the debate naturally"));
    }

    #[test]
    fn prompt_ends_with_output_contract_reminder() {
        let prompt = build_continuation_prompt(&request(None));
        assert!(prompt.ends_with("[{\"side\": \"left\", \"text\": \"...\"}, ...]"));
    }

    #[test]
    fn identical_requests_yield_identical_prompts() {
        assert_eq!(
            build_continuation_prompt(&request(None)),
            build_continuation_prompt(&request(None))
        );
    }
}
