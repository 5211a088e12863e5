use clap::ValueEnum;
use config as config_rs;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const OPENAI_MODEL: &str = "gpt-4o";
pub const GEMINI_MODEL: &str = "gemini-2.0-flash-exp";
const GEMINI_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[value(name = "openai")]
    OpenAi,
    Gemini,
}

impl Provider {
    pub fn as_str(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::Gemini => "gemini",
        }
    }

    pub fn api_key_var(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => OPENAI_MODEL,
            Provider::Gemini => GEMINI_MODEL,
        }
    }

    pub fn default_endpoint(self, model: &str) -> String {
        match self {
            Provider::OpenAi => OPENAI_ENDPOINT.to_string(),
            Provider::Gemini => format!("{GEMINI_BASE}/{model}:generateContent"),
        }
    }

    pub fn default_few_shot(self) -> usize {
        match self {
            Provider::OpenAi => 5,
            Provider::Gemini => 50,
        }
    }
}

/// Layered settings: defaults, optional file, `RESTORER_*` environment,
/// then command-line overrides.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub provider: Provider,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: f64,
    pub top_p: f64,
    pub few_shot_examples: Option<usize>,
    /// Variables read from an explicit `--env-file`.
    #[serde(skip)]
    env_file_vars: HashMap<String, String>,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub provider: Option<Provider>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    /// dotenv-style file holding `OPENAI_API_KEY` / `GEMINI_API_KEY`
    pub env_file: Option<PathBuf>,
}

/// Fully resolved settings for one LLM provider.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub provider: Provider,
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub top_p: f64,
    pub few_shot_examples: usize,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config error: {0}")]
    Config(#[from] config_rs::ConfigError),
    #[error("env file error: {0}")]
    EnvFile(#[from] dotenvy::Error),
    #[error("no API key: pass --api-key or set {0}")]
    MissingApiKey(&'static str),
}

pub fn load_config(
    path: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    // A `.env` in the working directory or a parent fills unset variables.
    dotenvy::dotenv().ok();

    let mut env_file_vars = HashMap::new();
    if let Some(env_file) = &overrides.env_file {
        for item in dotenvy::from_path_iter(env_file)? {
            let (key, value) = item?;
            env_file_vars.insert(key, value);
        }
    }

    let mut builder = config_rs::Config::builder()
        .set_default("provider", Provider::OpenAi.as_str())?
        .set_default("temperature", 0.1)?
        .set_default("top_p", 0.8)?;

    if let Some(path) = path {
        builder = builder.add_source(config_rs::File::from(path).required(true));
    }

    builder = builder.add_source(
        config_rs::Environment::with_prefix("RESTORER").try_parsing(true),
    );

    if let Ok(endpoint) = std::env::var("LLM_ENDPOINT") {
        builder = builder.set_override("endpoint", endpoint)?;
    }

    // CLI flags take precedence
    if let Some(provider) = overrides.provider {
        builder = builder.set_override("provider", provider.as_str())?;
    }
    if let Some(endpoint) = &overrides.endpoint {
        builder = builder.set_override("endpoint", endpoint.as_str())?;
    }
    if let Some(api_key) = &overrides.api_key {
        builder = builder.set_override("api_key", api_key.as_str())?;
    }
    if let Some(model) = &overrides.model {
        builder = builder.set_override("model", model.as_str())?;
    }

    let mut cfg: AppConfig = builder.build()?.try_deserialize()?;
    cfg.env_file_vars = env_file_vars;
    Ok(cfg)
}

impl AppConfig {
    /// Fills provider defaults. Without a configured API key, the provider's
    /// variable is taken from the process environment, then from the env file.
    pub fn llm_settings(&self) -> Result<LlmSettings, ConfigError> {
        let provider = self.provider;
        let model = self
            .model
            .clone()
            .unwrap_or_else(|| provider.default_model().to_string());
        let endpoint = self
            .endpoint
            .clone()
            .unwrap_or_else(|| provider.default_endpoint(&model));
        let api_key = self
            .api_key
            .clone()
            .filter(|key| !key.is_empty())
            .or_else(|| std::env::var(provider.api_key_var()).ok())
            .filter(|key| !key.is_empty())
            .or_else(|| self.env_file_vars.get(provider.api_key_var()).cloned())
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey(provider.api_key_var()))?;

        Ok(LlmSettings {
            provider,
            endpoint,
            api_key,
            model,
            temperature: self.temperature,
            top_p: self.top_p,
            few_shot_examples: self
                .few_shot_examples
                .unwrap_or_else(|| provider.default_few_shot()),
        })
    }
}
