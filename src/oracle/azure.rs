use super::{Oracle, OraclePrompt, Role};
use crate::error::OracleError;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

const API_VERSION: &str = "2024-02-01";

/// Azure OpenAI chat-completions adapter.
///
/// Deployment-scoped URL with the `api-key` header, matching the Azure
/// flavour of the completions API. The base endpoint is injected so tests
/// can point it at a local mock server.
pub struct AzureOpenAi {
    endpoint: String,
    deployment: String,
    api_key: Option<String>,
    client: Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

impl AzureOpenAi {
    pub fn new(endpoint: &str, deployment: &str, api_key: Option<&str>) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            deployment: deployment.to_string(),
            api_key: api_key.map(ToString::to_string),
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(10))
                .pool_max_idle_per_host(10)
                .pool_idle_timeout(std::time::Duration::from_secs(90))
                .tcp_keepalive(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.endpoint, self.deployment
        )
    }

    fn build_request(prompt: &OraclePrompt) -> ChatRequest {
        let mut messages = Vec::with_capacity(prompt.messages.len() + 1);
        messages.push(Message {
            role: "system",
            content: prompt.system.clone(),
        });
        for msg in &prompt.messages {
            messages.push(Message {
                role: match msg.role {
                    Role::User => "user",
                    Role::Assistant => "assistant",
                },
                content: msg.content.clone(),
            });
        }
        ChatRequest { messages }
    }

    fn extract_text(chat_response: ChatResponse) -> Result<String, OracleError> {
        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| OracleError::Request("no completion choices returned".into()))
    }
}

#[async_trait]
impl Oracle for AzureOpenAi {
    async fn ask(&self, prompt: &OraclePrompt) -> Result<String, OracleError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            OracleError::Auth("Azure OpenAI key not set. Set AZURE_OPENAI_KEY or edit config.toml.".into())
        })?;

        let request = Self::build_request(prompt);
        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", API_VERSION)])
            .header("api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| OracleError::Unavailable(e.to_string()))?;

        match response.status() {
            s if s.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(OracleError::Auth(format!(
                    "Azure OpenAI rejected the api-key ({})",
                    response.status()
                )));
            }
            s if s.is_server_error() => {
                return Err(OracleError::Unavailable(format!(
                    "Azure OpenAI returned {s}"
                )));
            }
            s => {
                let body = response.text().await.unwrap_or_default();
                return Err(OracleError::Request(format!(
                    "Azure OpenAI returned {s}: {body}"
                )));
            }
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| OracleError::Request(format!("response JSON decode failed: {e}")))?;
        Self::extract_text(chat_response)
    }
}
