use std::sync::Arc;

use crate::error::OracleError;
use crate::game::prompt;
use crate::game::state::{RESPONSE_PREFIX, TurnOutcome, narration, sanitize_item};
use crate::oracle::Oracle;

/// Player-facing retry message used whenever the oracle's answer is unusable.
pub const FALLBACK_RESPONSE: &str = "I'm sorry, I had trouble understanding your response. Please try speaking more clearly and slowly. Let's try again!";

/// Operator-facing marker carried in the fallback outcome.
pub const FALLBACK_ERROR: &str = "Technical error in processing your response.";

/// Evaluates one turn of "I'm packing my suitcase".
///
/// Pure apart from the single outbound oracle call: state comes in by
/// reference, a fresh outcome comes out, and nothing is shared between
/// sessions. The oracle decides matching and narration; this type enforces
/// the output contract around it and fails safe when the contract is broken.
pub struct TurnEvaluator {
    oracle: Arc<dyn Oracle>,
}

impl TurnEvaluator {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    /// Evaluate the player's utterance against the expected item prefix.
    ///
    /// A malformed oracle answer is recovered locally — the player gets the
    /// canned retry outcome and no error escapes. An unreachable oracle is
    /// the one failure that does escape, so operators can tell "model said
    /// something unusable" apart from "model unreachable".
    pub async fn evaluate(
        &self,
        items: &[String],
        utterance: &str,
    ) -> Result<TurnOutcome, OracleError> {
        let prompt = prompt::turn_prompt(items, utterance);
        let raw = self.oracle.ask(&prompt).await?;
        Ok(settle(items, &raw))
    }
}

/// Parse the raw oracle answer and enforce the turn contract, falling back
/// to the canned retry outcome when the answer is unusable.
fn settle(items: &[String], raw: &str) -> TurnOutcome {
    match parse_outcome(raw) {
        Ok(outcome) => enforce_contract(items, outcome),
        Err(reason) => {
            tracing::warn!(%reason, raw_len = raw.len(), "unusable oracle output, using fallback outcome");
            fallback_outcome(items)
        }
    }
}

/// Substring between the first `{` and the last `}` — tolerates surrounding
/// prose and Markdown code fences.
fn extract_json(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (start < end).then(|| &raw[start..=end])
}

fn parse_outcome(raw: &str) -> anyhow::Result<TurnOutcome> {
    let json = extract_json(raw)
        .ok_or_else(|| anyhow::anyhow!("no JSON object found in the oracle response"))?;
    // serde rejects a missing is_correct/new_items/response_text for us;
    // error_description defaults to None.
    let outcome: TurnOutcome = serde_json::from_str(json)?;
    Ok(outcome)
}

/// Local enforcement of the rules the oracle is instructed to follow but
/// cannot be trusted with.
fn enforce_contract(items: &[String], mut outcome: TurnOutcome) -> TurnOutcome {
    if !outcome.is_correct {
        // Rejection never advances the list, whatever the oracle returned.
        outcome.new_items = items.to_vec();
        return outcome;
    }

    let mut substituted = false;
    for item in &mut outcome.new_items {
        let clean = sanitize_item(item);
        if clean != *item {
            substituted = true;
            *item = clean;
        }
    }

    // Regenerate the narration when the blacklist fired (the oracle's text
    // would name the forbidden item) or the mandatory prefix is missing.
    if substituted || !outcome.response_text.starts_with(RESPONSE_PREFIX) {
        outcome.response_text = narration(&outcome.new_items);
    }

    outcome.error_description = None;
    outcome
}

fn fallback_outcome(items: &[String]) -> TurnOutcome {
    TurnOutcome {
        is_correct: false,
        new_items: items.to_vec(),
        response_text: FALLBACK_RESPONSE.to_string(),
        error_description: Some(FALLBACK_ERROR.to_string()),
    }
}
