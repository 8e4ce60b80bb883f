//! Configuration settings for TubeMind.

use super::Prompts;
use crate::error::{Result, TubeMindError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub provider: ProviderSettings,
    pub embedding: EmbeddingSettings,
    pub generation: GenerationSettings,
    pub chunking: ChunkingSettings,
    pub retrieval: RetrievalSettings,
    pub captions: CaptionSettings,
    pub server: ServerSettings,
    pub prompts: Prompts,
}

/// Remote model provider settings (any OpenAI-compatible API).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Base URL of the API.
    pub api_base: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            api_base: "https://api.mistral.ai/v1".to_string(),
            api_key_env: "MISTRAL_API_KEY".to_string(),
            timeout_secs: 300,
        }
    }
}

/// Embedding generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    /// Embedding model to use.
    pub model: String,
    /// Embedding dimensions.
    pub dimensions: u32,
    /// Texts per provider request.
    pub batch_size: usize,
    /// Pause between consecutive batches, in milliseconds.
    pub batch_delay_ms: u64,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: "mistral-embed".to_string(),
            dimensions: 1024,
            batch_size: 10,
            batch_delay_ms: 500,
        }
    }
}

/// Text generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Chat model used for answers and summaries.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Output token ceiling for answers.
    pub answer_max_tokens: u32,
    /// Output token ceiling for summaries.
    pub summary_max_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: "mistral-small-latest".to_string(),
            temperature: 0.3,
            answer_max_tokens: 200,
            summary_max_tokens: 250,
        }
    }
}

/// Transcript chunking settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    /// Target chunk size in characters.
    pub target_chars: usize,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self { target_chars: 500 }
    }
}

/// Retrieval and context settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    /// Chunks retrieved for a question.
    pub ask_top_k: usize,
    /// Chunks retrieved for a summary.
    pub summary_top_k: usize,
    /// Character ceiling per chunk in the context block.
    pub context_char_limit: usize,
    /// Query used to pick chunks for summaries.
    pub summary_query: String,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            ask_top_k: 2,
            summary_top_k: 4,
            context_char_limit: 300,
            summary_query: "main topics key points summary overview".to_string(),
        }
    }
}

/// Caption fetching settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionSettings {
    /// Caption languages, in order of preference.
    pub languages: Vec<String>,
    /// Optional cookies file passed to yt-dlp.
    pub cookies_file: Option<String>,
}

impl Default for CaptionSettings {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string(), "en-US".to_string(), "en-GB".to_string()],
            cookies_file: None,
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| TubeMindError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tubemind")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Get the expanded cookies file path, if configured.
    pub fn cookies_path(&self) -> Option<PathBuf> {
        self.captions
            .cookies_file
            .as_deref()
            .map(Self::expand_path)
    }

    /// Load `KEY=value` pairs from a `.env` file into the process environment.
    ///
    /// Without a path, `.env` is searched from the current directory upwards.
    /// Variables already set win, and a missing file is not an error.
    pub fn load_env_file(path: Option<&Path>) -> Result<()> {
        let loaded = match path {
            Some(p) => dotenvy::from_path(p),
            None => dotenvy::dotenv().map(|_| ()),
        };
        match loaded {
            Ok(()) => Ok(()),
            Err(e) if e.not_found() => Ok(()),
            Err(e) => Err(TubeMindError::Config(format!("Failed to read .env file: {}", e))),
        }
    }

    /// Read the provider API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        let var = &self.provider.api_key_env;
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            Ok(_) => Err(TubeMindError::Config(format!("{} is empty", var))),
            Err(_) => Err(TubeMindError::Config(format!(
                "{} not found in environment variables",
                var
            ))),
        }
    }

    /// Check values that would otherwise fail deep inside the pipeline.
    pub fn validate(&self) -> Result<()> {
        if self.embedding.dimensions == 0 {
            return Err(TubeMindError::Config(
                "embedding.dimensions must be positive".to_string(),
            ));
        }
        if self.embedding.batch_size == 0 {
            return Err(TubeMindError::Config(
                "embedding.batch_size must be positive".to_string(),
            ));
        }
        if self.chunking.target_chars == 0 {
            return Err(TubeMindError::Config(
                "chunking.target_chars must be positive".to_string(),
            ));
        }
        if self.retrieval.ask_top_k == 0 || self.retrieval.summary_top_k == 0 {
            return Err(TubeMindError::Config(
                "retrieval top_k values must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
