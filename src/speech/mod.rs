pub mod azure;
pub mod elevenlabs;

use crate::error::UpstreamError;
use async_trait::async_trait;

pub use azure::AzureSpeech;
pub use elevenlabs::ElevenLabs;

/// Speech-to-text boundary: audio bytes in, utterance out. One call per
/// turn, stateless, no retries.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, UpstreamError>;
}

/// Text-to-speech boundary: narration in, audio bytes out.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, UpstreamError>;
}
