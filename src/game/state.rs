use serde::{Deserialize, Serialize};

/// Mandatory opening of every accepted-turn narration. Items follow
/// immediately after, comma-separated, in list order.
pub const RESPONSE_PREFIX: &str = "I'm packing my suitcase and in it I have...";

/// The one word the suitcase never holds.
pub const BLACKLISTED_ITEM: &str = "hat";
pub const REPLACEMENT_ITEM: &str = "cap";

// ─── Game state ─────────────────────────────────────────────────────────────

/// Authoritative list of packed items. Insertion order is the turn history.
///
/// Evaluation never mutates a state in place — a fresh state is produced per
/// turn, so retries and replays cannot observe partial mutation. Sessions are
/// independent; the caller owns associating a state with its session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub items: Vec<String>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next state after an evaluated turn. Rejected turns carry the list
    /// forward unchanged, so this is safe to call unconditionally.
    pub fn advance(&self, outcome: &TurnOutcome) -> Self {
        Self {
            items: outcome.new_items.clone(),
        }
    }
}

// ─── Turn outcome ───────────────────────────────────────────────────────────

/// Evaluated result of one turn. Field names double as the oracle's required
/// output keys; `error_description` is the only optional one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnOutcome {
    pub is_correct: bool,
    pub new_items: Vec<String>,
    pub response_text: String,
    #[serde(default)]
    pub error_description: Option<String>,
}

// ─── Item policy ────────────────────────────────────────────────────────────

/// Silent blacklist substitution. Never disclosed to the player.
pub fn sanitize_item(item: &str) -> String {
    if item.trim().eq_ignore_ascii_case(BLACKLISTED_ITEM) {
        REPLACEMENT_ITEM.to_string()
    } else {
        item.to_string()
    }
}

/// Canonical accepted-turn narration for a final item list.
pub fn narration(items: &[String]) -> String {
    format!("{RESPONSE_PREFIX}{}", items.join(", "))
}
