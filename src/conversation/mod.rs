//! Picture-conversation variant: the learner is shown a picture and talked
//! through describing it. Lower complexity tier than the suitcase game — the
//! oracle's free text is used as-is, there is no output contract to repair.

use std::sync::Arc;

use crate::error::{Result, ValiseError};
use crate::oracle::{ChatMessage, Oracle, OraclePrompt};
use crate::speech::{Synthesizer, Transcriber};
use crate::vision::Captioner;

/// Fixed system directive for the picture conversation.
pub const THERAPIST_PROMPT: &str = r#"Role: You are a friendly and supportive speech therapist.
Audience: Children and young adults.
Context: The learner is shown a picture (uploaded by the user). Your responsibility is to bring them into natural conversation about the picture.
Instructions:
	1. Begin by asking an open-ended question about the picture (for example, "What do you see?").
	2. Encourage the learner to describe details, feelings, actions, and possibilities in the picture.
	3. If responses are short, gently scaffold by asking follow-up questions.
	4. Expand on what the learner says in a natural way, modeling full sentences without sounding corrective.
	5. Always keep the tone warm, conversational, and encouraging.
	6. Do not start with suggestions or lists — the interaction should unfold naturally from the learner's first response.
Goal: Elicit speech through picture description, build vocabulary, and support sentence formation in a natural, engaging conversation."#;

/// Reply used when the oracle comes back empty.
pub const DEFAULT_REPLY: &str = "I'm not sure what to say.";

// ─── Responder ──────────────────────────────────────────────────────────────

/// Builds the conversation prompt and returns the oracle's reply.
///
/// The image caption is only embedded on the first turn; afterwards it lives
/// in the history the caller round-trips.
pub struct Responder {
    oracle: Arc<dyn Oracle>,
}

impl Responder {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub async fn respond(
        &self,
        image_description: &str,
        user_query: &str,
        history: &[ChatMessage],
    ) -> Result<String> {
        let mut messages = history.to_vec();
        if history.is_empty() {
            messages.push(ChatMessage::user(format!(
                "Context: The user is looking at a picture described as: \"{image_description}\". The user's first question is: \"{user_query}\""
            )));
        } else {
            messages.push(ChatMessage::user(user_query));
        }

        let prompt = OraclePrompt {
            system: THERAPIST_PROMPT.to_string(),
            messages,
        };
        let answer = self.oracle.ask(&prompt).await.map_err(ValiseError::Oracle)?;
        if answer.trim().is_empty() {
            Ok(DEFAULT_REPLY.to_string())
        } else {
            Ok(answer)
        }
    }
}

// ─── Orchestration ──────────────────────────────────────────────────────────

/// One completed exchange: the spoken reply and the updated history to
/// round-trip on the next call.
#[derive(Debug)]
pub struct VisualTurn {
    pub audio: Vec<u8>,
    pub history: Vec<ChatMessage>,
}

/// Full picture-conversation pipeline. Each stage is a single-call boundary;
/// any stage failing fails the whole turn with that one reason, never a
/// partial result.
pub struct VisualService {
    captioner: Arc<dyn Captioner>,
    transcriber: Arc<dyn Transcriber>,
    synthesizer: Arc<dyn Synthesizer>,
    responder: Responder,
}

impl VisualService {
    pub fn new(
        captioner: Arc<dyn Captioner>,
        transcriber: Arc<dyn Transcriber>,
        synthesizer: Arc<dyn Synthesizer>,
        responder: Responder,
    ) -> Self {
        Self {
            captioner,
            transcriber,
            synthesizer,
            responder,
        }
    }

    /// First step: caption the picture, get the opening question, speak it.
    /// The returned history starts with that one assistant message.
    pub async fn start(&self, image: &[u8]) -> Result<VisualTurn> {
        let caption = self.captioner.describe(image).await?;
        tracing::debug!(caption = %caption, "picture captioned");

        let opening = self.responder.respond(&caption, "", &[]).await?;
        let audio = self.synthesizer.synthesize(&opening).await?;

        Ok(VisualTurn {
            audio,
            history: vec![ChatMessage::assistant(opening)],
        })
    }

    /// Later turns: the caption is already baked into the history, so only
    /// the learner's audio and the running history are needed.
    pub async fn query(&self, audio: &[u8], history: Vec<ChatMessage>) -> Result<VisualTurn> {
        let user_query = self.transcriber.transcribe(audio).await?;
        let reply = self.responder.respond("", &user_query, &history).await?;
        let audio = self.synthesizer.synthesize(&reply).await?;

        let mut history = history;
        history.push(ChatMessage::user(user_query));
        history.push(ChatMessage::assistant(reply));

        Ok(VisualTurn { audio, history })
    }
}
