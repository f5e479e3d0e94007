pub mod azure;

use crate::error::UpstreamError;
use async_trait::async_trait;

pub use azure::AzureVision;

/// Image-captioning boundary: image bytes in, short caption out. Stateless,
/// one call per image, no retries.
#[async_trait]
pub trait Captioner: Send + Sync {
    async fn describe(&self, image: &[u8]) -> Result<String, UpstreamError>;
}
