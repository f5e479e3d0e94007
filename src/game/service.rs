use std::sync::Arc;

use crate::error::{Result, ValiseError};
use crate::game::evaluator::TurnEvaluator;
use crate::game::state::TurnOutcome;
use crate::speech::{Synthesizer, Transcriber};

/// One voice turn: the evaluated outcome plus its spoken narration.
#[derive(Debug)]
pub struct GameTurn {
    pub outcome: TurnOutcome,
    pub audio: Vec<u8>,
}

/// Voice front half of the suitcase game: speech in, evaluated turn and
/// speech out. Collaborators are injected so tests run on scripted fakes.
pub struct GameService {
    transcriber: Arc<dyn Transcriber>,
    synthesizer: Arc<dyn Synthesizer>,
    evaluator: Arc<TurnEvaluator>,
}

impl GameService {
    pub fn new(
        transcriber: Arc<dyn Transcriber>,
        synthesizer: Arc<dyn Synthesizer>,
        evaluator: Arc<TurnEvaluator>,
    ) -> Self {
        Self {
            transcriber,
            synthesizer,
            evaluator,
        }
    }

    /// Transcribe the player's audio, evaluate the turn, and speak the
    /// response. Upstream failures propagate whole; the evaluator's own
    /// fallback handling means a playable outcome always comes back once
    /// the oracle was reachable.
    pub async fn turn(&self, audio: &[u8], items: &[String]) -> Result<GameTurn> {
        let utterance = self.transcriber.transcribe(audio).await?;
        tracing::debug!(utterance = %utterance, "player turn transcribed");

        let outcome = self
            .evaluator
            .evaluate(items, &utterance)
            .await
            .map_err(ValiseError::Oracle)?;

        let audio = self.synthesizer.synthesize(&outcome.response_text).await?;
        Ok(GameTurn { outcome, audio })
    }
}
