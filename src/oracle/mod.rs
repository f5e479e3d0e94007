pub mod azure;

use crate::error::OracleError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use azure::AzureOpenAi;

// ─── Conversation messages ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of an append-only conversation history. Histories are never
/// reordered or pruned here; the caller round-trips them between turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

// ─── Prompt spec ────────────────────────────────────────────────────────────

/// A fully-formed instruction for the oracle: a fixed system directive plus
/// the ordered user/assistant messages for this call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OraclePrompt {
    pub system: String,
    pub messages: Vec<ChatMessage>,
}

impl OraclePrompt {
    /// Prompt with a single user message — the shape every game turn uses.
    pub fn single_turn(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            messages: vec![ChatMessage::user(user)],
        }
    }
}

// ─── Oracle trait ───────────────────────────────────────────────────────────

/// Boundary to the external text-reasoning service.
///
/// Implementations send the prompt and return the raw textual answer
/// verbatim — no parsing, no retries, no interpretation. This keeps the turn
/// evaluator testable with a scripted double returning controlled strings.
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn ask(&self, prompt: &OraclePrompt) -> Result<String, OracleError>;
}
