use crate::config::{LlmSettings, Provider};
use crate::prompt::Prompt;
use reqwest::Client;
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

pub struct LlmClient {
    settings: LlmSettings,
    client: Client,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid response")]
    InvalidResponse,
}

impl LlmClient {
    pub fn new(settings: LlmSettings) -> Self {
        Self {
            settings,
            client: Client::new(),
        }
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Sends `prompt` and returns the raw completion text.
    pub async fn complete(&self, prompt: Prompt) -> Result<String, LlmError> {
        debug!(provider = self.settings.provider.as_str(), model = %self.settings.model, "sending completion request");
        match self.settings.provider {
            Provider::OpenAi => self.chat(prompt.into_messages()).await,
            Provider::Gemini => self.generate(prompt.into_flat()).await,
        }
    }

    async fn chat(&self, messages: Vec<(&'static str, String)>) -> Result<String, LlmError> {
        let messages: Vec<Value> = messages
            .into_iter()
            .map(|(role, content)| serde_json::json!({ "role": role, "content": content }))
            .collect();
        let request_body = serde_json::json!({
            "model": self.settings.model,
            "messages": messages,
            "temperature": self.settings.temperature,
            "top_p": self.settings.top_p,
        });

        let resp: Value = self
            .client
            .post(&self.settings.endpoint)
            .bearer_auth(&self.settings.api_key)
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = resp["choices"][0]["message"]["content"]
            .as_str()
            .ok_or(LlmError::InvalidResponse)?
            .to_string();
        Ok(content)
    }

    async fn generate(&self, text: String) -> Result<String, LlmError> {
        let request_body = serde_json::json!({
            "contents": [ { "parts": [ { "text": text } ] } ],
            "generationConfig": {
                "temperature": self.settings.temperature,
                "topP": self.settings.top_p,
            }
        });

        let resp: Value = self
            .client
            .post(&self.settings.endpoint)
            .query(&[("key", self.settings.api_key.as_str())])
            .json(&request_body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let content = resp["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .ok_or(LlmError::InvalidResponse)?
            .to_string();
        Ok(content)
    }
}
