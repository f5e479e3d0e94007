use super::Synthesizer;
use crate::error::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

const DEFAULT_API: &str = "https://api.elevenlabs.io";
/// "Rachel", the voice the game has always spoken with.
pub const DEFAULT_VOICE_ID: &str = "21m00Tcm4TlvDq8ikWAM";
const MODEL_ID: &str = "eleven_multilingual_v2";

/// ElevenLabs text-to-speech adapter.
pub struct ElevenLabs {
    base_url: String,
    api_key: Option<String>,
    voice_id: String,
    client: Client,
}

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    text: &'a str,
    model_id: &'static str,
}

impl ElevenLabs {
    pub fn new(api_key: Option<&str>, voice_id: &str) -> Self {
        Self::with_base_url(DEFAULT_API, api_key, voice_id)
    }

    pub fn with_base_url(base_url: &str, api_key: Option<&str>, voice_id: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.map(ToString::to_string),
            voice_id: voice_id.to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

#[async_trait]
impl Synthesizer for ElevenLabs {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, UpstreamError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            UpstreamError::Synthesis(
                "ElevenLabs API key not set. Set ELEVENLABS_API_KEY or edit config.toml.".into(),
            )
        })?;

        let request = SynthesisRequest {
            text,
            model_id: MODEL_ID,
        };
        let response = self
            .client
            .post(format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id))
            .header("xi-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| UpstreamError::Synthesis(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Synthesis(format!(
                "ElevenLabs returned {}",
                response.status()
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Synthesis(e.to_string()))?;
        Ok(audio.to_vec())
    }
}
