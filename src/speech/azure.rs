use super::Transcriber;
use crate::error::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const RECOGNITION_PATH: &str = "/speech/recognition/conversation/cognitiveservices/v1";

/// Azure Cognitive Services speech-to-text (short-audio REST API).
pub struct AzureSpeech {
    endpoint: String,
    api_key: String,
    language: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecognitionResponse {
    recognition_status: String,
    #[serde(default)]
    display_text: Option<String>,
}

impl AzureSpeech {
    pub fn new(region: &str, api_key: &str) -> Self {
        Self::from_endpoint(&format!("https://{region}.stt.speech.microsoft.com"), api_key)
    }

    /// Endpoint-injecting constructor, used by tests to target a mock server.
    pub fn from_endpoint(endpoint: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            language: "en-US".to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

#[async_trait]
impl Transcriber for AzureSpeech {
    async fn transcribe(&self, audio: &[u8]) -> Result<String, UpstreamError> {
        let response = self
            .client
            .post(format!("{}{RECOGNITION_PATH}", self.endpoint))
            .query(&[("language", self.language.as_str())])
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "audio/wav")
            .body(audio.to_vec())
            .send()
            .await
            .map_err(|e| UpstreamError::Transcription(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Transcription(format!(
                "Azure Speech returned {}",
                response.status()
            )));
        }

        let recognition: RecognitionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Transcription(format!("response decode failed: {e}")))?;

        if recognition.recognition_status != "Success" {
            return Err(UpstreamError::Transcription(format!(
                "recognition status {}",
                recognition.recognition_status
            )));
        }

        Ok(recognition.display_text.unwrap_or_default())
    }
}
