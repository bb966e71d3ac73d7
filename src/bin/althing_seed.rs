//! althing-seed — batch-generates opening debates for the seeded topics.
//!
//! One upstream call per topic, retried up to three times, with a hard
//! cost ceiling computed from streamed token usage. Output is a JSON
//! file in the embedded `debates.json` format, so a successful run can
//! replace the compiled-in seed directly.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use futures_util::StreamExt;
use tracing::{error, info, warn};

use althing::data::{DataSet, OpeningDebate};
use althing::debate::parse_messages;
use althing::providers::{AnthropicProvider, CompletionEvent, CompletionProvider};
use althing::types::{DebateMessage, PolicyTopic, Side};
use althing::{AlthingError, Result};

const MAX_RETRIES: u64 = 3;
const COST_CEILING_USD: f64 = 1.00;
const PRICE_INPUT_PER_MTOK: f64 = 0.80;
const PRICE_OUTPUT_PER_MTOK: f64 = 4.00;
const DELAY_BETWEEN_TOPICS: Duration = Duration::from_millis(500);
const SEED_MAX_TOKENS: u32 = 1000;

/// The fixed speaker order of an opening debate.
const EXPECTED_SIDES: [Side; 6] = [
    Side::Left,
    Side::Right,
    Side::Left,
    Side::Right,
    Side::Center,
    Side::Center,
];

/// Persona definitions and the six-message output contract.
const SYSTEM_PROMPT: &str = r#"You generate balanced political debates for Informed Vote, an Australian voter education app.

THREE CHARACTERS:
- PROGRESSIVE (left): Advocates collective action, government solutions. Passionate but evidence-based. Uses "we" language.
- LIBERTARIAN (right): Advocates individual freedom, market solutions. Practical and principled. Uses "you" language.
- CENTRIST (center): Bridges perspectives, adds nuance. Thoughtful, acknowledges trade-offs. Uses "both sides have a point" framing.

CRITICAL RULES:
1. STEELMAN both sides - give each the STRONGEST possible argument
2. NO loaded language: avoid "handouts", "greedy", "nanny state", "bureaucrats"
3. Each side must acknowledge ONE weakness of their position
4. Use AUSTRALIAN context: Medicare, HECS, Australian dollar figures
5. Use AUSTRALIAN spelling: favour, colour, organisation
6. Keep messages SHORT: 1-2 sentences, 60-100 characters ideal, 150 max
7. Be ADVERSARIAL but never personal - attack ideas, not people
8. The centrist should add GENUINE value, not just "both sides have merit"

MESSAGE STRUCTURE (6 messages total):
1. Progressive: Opening argument
2. Libertarian: Counter-argument
3. Progressive: Rebuttal with evidence
4. Libertarian: Rebuttal with evidence
5. Centrist: Bridge or reframe the debate
6. Centrist: Honest articulation of the real trade-off

OUTPUT FORMAT:
Return ONLY a JSON array, no other text:
[
  {"side": "left", "text": "..."},
  {"side": "right", "text": "..."},
  {"side": "left", "text": "..."},
  {"side": "right", "text": "..."},
  {"side": "center", "text": "..."},
  {"side": "center", "text": "..."}
]"#;

/// Opening debate generator for the embedded topics.
#[derive(Parser)]
#[command(name = "althing-seed")]
#[command(version = althing::PKG_VERSION)]
#[command(about = "Generate one opening debate per seeded topic")]
struct Args {
    /// Output JSON file.
    #[arg(short, long, default_value = "opening_debates.json")]
    output: PathBuf,

    /// Anthropic API key (required unless --dry-run).
    #[arg(long, env = "ANTHROPIC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Model id to request.
    #[arg(long, default_value = "claude-3-5-haiku-20241022")]
    model: String,

    /// API base URL override.
    #[arg(long)]
    base_url: Option<String>,

    /// Produce placeholder debates without calling the API.
    #[arg(long)]
    dry_run: bool,
}

/// Running token totals and the dollar cost they imply.
#[derive(Debug, Default)]
struct CostTracker {
    input_tokens: u64,
    output_tokens: u64,
}

impl CostTracker {
    fn add(&mut self, input: u64, output: u64) {
        self.input_tokens += input;
        self.output_tokens += output;
    }

    fn cost_usd(&self) -> f64 {
        let input = self.input_tokens as f64 / 1_000_000.0 * PRICE_INPUT_PER_MTOK;
        let output = self.output_tokens as f64 / 1_000_000.0 * PRICE_OUTPUT_PER_MTOK;
        input + output
    }

    fn over_ceiling(&self) -> bool {
        self.cost_usd() > COST_CEILING_USD
    }
}

fn build_topic_prompt(topic: &PolicyTopic) -> String {
    format!(
        "Generate a balanced 6-message debate for this Australian policy topic:\n\n\
         TOPIC: {} {}\n\n\
         PROGRESSIVE POSITION: \"{}\"\n\
         - What you gain: {}\n\
         - What you trade: {}\n\n\
         LIBERTARIAN POSITION: \"{}\"\n\
         - What you gain: {}\n\
         - What you trade: {}\n\n\
         Remember:\n\
         - Steelman BOTH sides equally\n\
         - Include Australian-specific examples\n\
         - Centrist messages should add real insight, not fence-sit\n\
         - Keep each message punchy (1-2 sentences)",
        topic.name,
        topic.icon.as_deref().unwrap_or(""),
        topic.left_label,
        topic.left_gain,
        topic.left_cost,
        topic.right_label,
        topic.right_gain,
        topic.right_cost,
    )
}

/// Check the generated debate honours the six-message contract.
fn validate_debate(messages: &[DebateMessage]) -> Result<()> {
    if messages.len() != EXPECTED_SIDES.len() {
        return Err(AlthingError::InvalidInput(format!(
            "expected {} messages, got {}",
            EXPECTED_SIDES.len(),
            messages.len()
        )));
    }
    for (i, (message, expected)) in messages.iter().zip(EXPECTED_SIDES).enumerate() {
        if message.side != expected {
            return Err(AlthingError::InvalidInput(format!(
                "message {i} should be {expected:?}, got {:?}",
                message.side
            )));
        }
        if message.text.len() < 20 {
            return Err(AlthingError::InvalidInput(format!(
                "message {i} is implausibly short"
            )));
        }
    }
    Ok(())
}

/// Generate one debate, charging its token usage to the tracker.
async fn generate_debate(
    provider: &dyn CompletionProvider,
    topic: &PolicyTopic,
    costs: &mut CostTracker,
) -> Result<Vec<DebateMessage>> {
    let prompt = build_topic_prompt(topic);
    let mut stream = provider.complete_stream(SYSTEM_PROMPT, &prompt).await?;

    let mut full_text = String::new();
    let mut input_tokens = 0;
    let mut output_tokens = 0;
    while let Some(event) = stream.next().await {
        match event? {
            CompletionEvent::Text(text) => full_text.push_str(&text),
            CompletionEvent::Usage { input, output } => {
                // message_delta repeats the running output total; keep
                // the max rather than summing.
                input_tokens += input;
                output_tokens = output_tokens.max(output);
            }
            CompletionEvent::Done => break,
        }
    }
    costs.add(input_tokens, output_tokens);

    let messages = parse_messages(&full_text)?;
    validate_debate(&messages)?;
    Ok(messages)
}

fn placeholder_debate() -> Vec<DebateMessage> {
    EXPECTED_SIDES
        .iter()
        .map(|&side| DebateMessage::new(side, "[DRY RUN] placeholder message text"))
        .collect()
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let topics = DataSet::embedded().topics;

    let provider = if args.dry_run {
        info!("dry run, no API calls will be made");
        None
    } else {
        let Some(api_key) = args.api_key.clone() else {
            return Err("ANTHROPIC_API_KEY is required unless --dry-run is set".into());
        };
        let mut provider = AnthropicProvider::new(api_key)
            .model(&args.model)
            .max_tokens(SEED_MAX_TOKENS);
        if let Some(base_url) = &args.base_url {
            provider = provider.base_url(base_url);
        }
        info!(
            model = %args.model,
            cost_ceiling_usd = COST_CEILING_USD,
            max_retries = MAX_RETRIES,
            "live run"
        );
        Some(provider)
    };

    let mut costs = CostTracker::default();
    let mut debates: Vec<OpeningDebate> = Vec::new();
    let mut failed: Vec<String> = Vec::new();

    for (i, topic) in topics.iter().enumerate() {
        info!(topic = %topic.id, "generating");

        let mut generated = None;
        match &provider {
            None => generated = Some(placeholder_debate()),
            Some(provider) => {
                for attempt in 1..=MAX_RETRIES {
                    match generate_debate(provider, topic, &mut costs).await {
                        Ok(messages) => {
                            generated = Some(messages);
                            break;
                        }
                        Err(e) => {
                            warn!(topic = %topic.id, attempt, error = %e, "attempt failed");
                            if costs.over_ceiling() {
                                break;
                            }
                            if attempt < MAX_RETRIES {
                                tokio::time::sleep(Duration::from_millis(1000 * attempt)).await;
                            }
                        }
                    }
                }
            }
        }

        match generated {
            Some(messages) => debates.push(OpeningDebate {
                topic_id: topic.id.clone(),
                generated_at: chrono::Utc::now()
                    .to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
                messages,
            }),
            None => failed.push(topic.id.clone()),
        }

        info!(
            cost_usd = format!("{:.4}", costs.cost_usd()),
            input_tokens = costs.input_tokens,
            output_tokens = costs.output_tokens,
            "running total"
        );

        if costs.over_ceiling() {
            error!(
                cost_usd = format!("{:.4}", costs.cost_usd()),
                ceiling_usd = COST_CEILING_USD,
                "cost ceiling exceeded, aborting"
            );
            break;
        }

        if i < topics.len() - 1 {
            tokio::time::sleep(DELAY_BETWEEN_TOPICS).await;
        }
    }

    info!(
        successful = debates.len(),
        failed = failed.len(),
        failed_topics = ?failed,
        cost_usd = format!("{:.4}", costs.cost_usd()),
        "run complete"
    );

    if debates.is_empty() {
        return Err("no debates generated".into());
    }

    let json = serde_json::to_string_pretty(&debates)?;
    std::fs::write(&args.output, json)?;
    info!(output = %args.output.display(), "output written");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract_debate() -> Vec<DebateMessage> {
        EXPECTED_SIDES
            .iter()
            .map(|&side| DebateMessage::new(side, "A sufficiently long debate message."))
            .collect()
    }

    #[test]
    fn contract_debate_passes_validation() {
        assert!(validate_debate(&contract_debate()).is_ok());
    }

    #[test]
    fn wrong_side_order_is_rejected() {
        let mut debate = contract_debate();
        debate.swap(0, 1);
        assert!(validate_debate(&debate).is_err());
    }

    #[test]
    fn wrong_count_is_rejected() {
        let mut debate = contract_debate();
        debate.pop();
        assert!(validate_debate(&debate).is_err());
    }

    #[test]
    fn short_text_is_rejected() {
        let mut debate = contract_debate();
        debate[3] = DebateMessage::new(Side::Right, "too short");
        assert!(validate_debate(&debate).is_err());
    }

    #[test]
    fn cost_tracker_prices_both_directions() {
        let mut costs = CostTracker::default();
        costs.add(1_000_000, 0);
        assert!((costs.cost_usd() - PRICE_INPUT_PER_MTOK).abs() < 1e-9);
        costs.add(0, 1_000_000);
        assert!(
            (costs.cost_usd() - PRICE_INPUT_PER_MTOK - PRICE_OUTPUT_PER_MTOK).abs() < 1e-9
        );
        assert!(costs.over_ceiling());
    }

    #[test]
    fn ceiling_is_not_tripped_by_small_runs() {
        let mut costs = CostTracker::default();
        costs.add(5_000, 2_000);
        assert!(!costs.over_ceiling());
    }
}
