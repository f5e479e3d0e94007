use super::Captioner;
use crate::error::UpstreamError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

const DESCRIBE_PATH: &str = "/vision/v3.2/describe";

/// Caption returned when the service sees the image but produces no text.
pub const UNDESCRIBABLE_CAPTION: &str = "I can see an image, but I can't describe it.";

/// Azure Computer Vision describe-image adapter.
pub struct AzureVision {
    endpoint: String,
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct DescribeResponse {
    #[serde(default)]
    description: Description,
}

#[derive(Debug, Default, Deserialize)]
struct Description {
    #[serde(default)]
    captions: Vec<Caption>,
}

#[derive(Debug, Deserialize)]
struct Caption {
    text: Option<String>,
}

impl AzureVision {
    pub fn new(endpoint: &str, api_key: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .connect_timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }
}

#[async_trait]
impl Captioner for AzureVision {
    async fn describe(&self, image: &[u8]) -> Result<String, UpstreamError> {
        let response = self
            .client
            .post(format!("{}{DESCRIBE_PATH}", self.endpoint))
            .query(&[("maxCandidates", "1"), ("language", "en")])
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(image.to_vec())
            .send()
            .await
            .map_err(|e| UpstreamError::Captioning(e.to_string()))?;

        if !response.status().is_success() {
            return Err(UpstreamError::Captioning(format!(
                "Azure Vision returned {}",
                response.status()
            )));
        }

        let describe: DescribeResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Captioning(format!("response decode failed: {e}")))?;

        let caption = describe
            .description
            .captions
            .into_iter()
            .find_map(|c| c.text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNDESCRIBABLE_CAPTION.to_string());
        Ok(caption)
    }
}
