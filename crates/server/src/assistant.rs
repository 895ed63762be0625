//! Upstream AI provider access.
//!
//! Chat replies and scene images go through an OpenAI-compatible API when a
//! key is configured. Without a key the server answers chat from the scripted
//! production board and returns a placeholder image, so every flow works
//! offline.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use thiserror::Error;

use callsheet_core::assist::ProductionBoard;

const SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant for a film production team. Always be professional and concise.";
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_IMAGE_MODEL: &str = "gpt-image-1";
const PLACEHOLDER_IMAGE_URL: &str = "/placeholder.svg";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant provider returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("assistant request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("assistant response missing expected field: {0}")]
    MalformedResponse(&'static str),
}

/// Provider configuration resolved from the environment.
#[derive(Clone)]
pub struct AssistantConfig {
    pub api_key: Option<String>,
    pub api_base: String,
    pub chat_model: String,
    pub image_model: String,
}

impl AssistantConfig {
    pub fn from_env() -> Self {
        let nonempty = |var: &str| std::env::var(var).ok().filter(|s| !s.is_empty());
        Self {
            api_key: nonempty("OPENAI_API_KEY"),
            api_base: nonempty("OPENAI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.into()),
            chat_model: nonempty("CALLSHEET_CHAT_MODEL")
                .unwrap_or_else(|| DEFAULT_CHAT_MODEL.into()),
            image_model: nonempty("CALLSHEET_IMAGE_MODEL")
                .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.into()),
        }
    }
}

#[derive(Clone)]
pub struct AssistantClient {
    http: reqwest::Client,
    config: AssistantConfig,
    board: Arc<ProductionBoard>,
}

impl AssistantClient {
    pub fn new(config: AssistantConfig, board: ProductionBoard) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            config,
            board: Arc::new(board),
        })
    }

    pub fn is_offline(&self) -> bool {
        self.config.api_key.is_none()
    }

    /// Produce a reply for one user message.
    pub async fn reply(&self, message: &str) -> Result<String, AssistantError> {
        let Some(key) = self.config.api_key.as_deref() else {
            return Ok(self.board.respond(message));
        };

        let url = format!("{}/chat/completions", self.config.api_base);
        let body = json!({
            "model": self.config.chat_model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": message },
            ],
        });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;
        let parsed = check_upstream(resp).await?;

        parsed["choices"][0]["message"]["content"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(AssistantError::MalformedResponse("choices[0].message.content"))
    }

    /// Generate one scene image, returning its URL.
    pub async fn generate_image(&self, prompt: &str) -> Result<String, AssistantError> {
        let Some(key) = self.config.api_key.as_deref() else {
            return Ok(PLACEHOLDER_IMAGE_URL.to_string());
        };

        let url = format!("{}/images/generations", self.config.api_base);
        let body = json!({
            "model": self.config.image_model,
            "prompt": prompt,
            "n": 1,
            "size": "1024x1024",
        });

        let resp = self
            .http
            .post(&url)
            .bearer_auth(key)
            .json(&body)
            .send()
            .await?;
        let parsed = check_upstream(resp).await?;

        parsed["data"][0]["url"]
            .as_str()
            .map(|s| s.to_string())
            .ok_or(AssistantError::MalformedResponse("data[0].url"))
    }
}

async fn check_upstream(resp: reqwest::Response) -> Result<serde_json::Value, AssistantError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(AssistantError::Upstream {
            status: status.as_u16(),
            body,
        });
    }
    Ok(resp.json().await?)
}
