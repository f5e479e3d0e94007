use crate::error::ConfigError;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ─── Top-level config ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Path to config.toml - computed from home, not serialized
    #[serde(skip)]
    pub config_path: PathBuf,

    #[serde(default)]
    pub azure_openai: AzureOpenAiConfig,

    #[serde(default)]
    pub azure_speech: AzureSpeechConfig,

    #[serde(default)]
    pub azure_vision: AzureVisionConfig,

    #[serde(default)]
    pub elevenlabs: ElevenLabsConfig,

    #[serde(default)]
    pub gateway: GatewayConfig,
}

// ─── Provider sections ────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AzureOpenAiConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_deployment")]
    pub deployment: String,
}

impl Default for AzureOpenAiConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: None,
            deployment: default_deployment(),
        }
    }
}

fn default_deployment() -> String {
    "gpt-4o".to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AzureSpeechConfig {
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

/// The vision service historically shares the multi-purpose Azure key;
/// empty fields fall back to the `azure_openai` section at wiring time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AzureVisionConfig {
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElevenLabsConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_voice_id")]
    pub voice_id: String,
}

impl Default for ElevenLabsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            voice_id: default_voice_id(),
        }
    }
}

fn default_voice_id() -> String {
    crate::speech::elevenlabs::DEFAULT_VOICE_ID.to_string()
}

// ─── Gateway section ──────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request body cap; audio and images travel base64-encoded in JSON.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8787
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_request_timeout_secs() -> u64 {
    120
}

// ─── Loading ──────────────────────────────────────────────────────

impl Config {
    /// Load `~/.valise/config.toml`, writing a default file on first run,
    /// then apply environment overrides.
    pub fn load_or_init() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = if path.exists() {
            let raw = fs::read_to_string(path)?;
            toml::from_str::<Self>(&raw).map_err(|e| ConfigError::Load(e.to_string()))?
        } else {
            let config = Self::default();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            let rendered =
                toml::to_string_pretty(&config).map_err(|e| ConfigError::Load(e.to_string()))?;
            fs::write(path, rendered)?;
            config
        };
        config.config_path = path.to_path_buf();
        config.apply_env_overrides();
        Ok(config)
    }

    fn default_path() -> Result<PathBuf, ConfigError> {
        let user_dirs = UserDirs::new()
            .ok_or_else(|| ConfigError::Load("could not determine home directory".into()))?;
        Ok(user_dirs.home_dir().join(".valise").join("config.toml"))
    }

    /// Environment variables win over the file, matching the names the
    /// hosted deployments have always used.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("AZURE_OPENAI_ENDPOINT") {
            self.azure_openai.endpoint = v;
        }
        if let Ok(v) = std::env::var("AZURE_OPENAI_KEY") {
            self.azure_openai.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("AZURE_OPENAI_DEPLOYMENT_NAME") {
            self.azure_openai.deployment = v;
        }
        if let Ok(v) = std::env::var("AZURE_SPEECH_REGION") {
            self.azure_speech.region = v;
        }
        if let Ok(v) = std::env::var("AZURE_SPEECH_KEY") {
            self.azure_speech.api_key = Some(v);
        }
        if let Ok(v) = std::env::var("ELEVENLABS_API_KEY") {
            self.elevenlabs.api_key = Some(v);
        }
    }

    /// Vision endpoint/key with the historical fallback to the Azure
    /// OpenAI section.
    pub fn vision_endpoint(&self) -> &str {
        if self.azure_vision.endpoint.is_empty() {
            &self.azure_openai.endpoint
        } else {
            &self.azure_vision.endpoint
        }
    }

    pub fn vision_api_key(&self) -> Option<&str> {
        self.azure_vision
            .api_key
            .as_deref()
            .or(self.azure_openai.api_key.as_deref())
    }

    /// Serve-time validation: the gateway cannot run without a reasoning
    /// endpoint.
    pub fn validate_for_serve(&self) -> Result<(), ConfigError> {
        if self.azure_openai.endpoint.is_empty() {
            return Err(ConfigError::Validation(
                "azure_openai.endpoint is required (or set AZURE_OPENAI_ENDPOINT)".into(),
            ));
        }
        if self.azure_openai.api_key.is_none() {
            return Err(ConfigError::Validation(
                "azure_openai.api_key is required (or set AZURE_OPENAI_KEY)".into(),
            ));
        }
        Ok(())
    }
}
