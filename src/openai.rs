//! Client setup for OpenAI-compatible model APIs (Mistral by default).

use crate::config::ProviderSettings;
use crate::error::{Result, TubeMindError};
use async_openai::{config::OpenAIConfig, Client};
use backoff::ExponentialBackoffBuilder;
use std::time::Duration;

/// Create an API client pointed at the configured base URL.
///
/// Failed requests are returned as-is; retry policy is left to the caller.
pub fn create_client(provider: &ProviderSettings, api_key: &str) -> Result<Client<OpenAIConfig>> {
    let http_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(provider.timeout_secs))
        .build()
        .map_err(|e| TubeMindError::Config(format!("Failed to create HTTP client: {}", e)))?;

    let config = OpenAIConfig::new()
        .with_api_base(provider.api_base.trim_end_matches('/'))
        .with_api_key(api_key);

    let no_retry = ExponentialBackoffBuilder::new()
        .with_max_elapsed_time(Some(Duration::ZERO))
        .build();

    Ok(Client::with_config(config)
        .with_http_client(http_client)
        .with_backoff(no_retry))
}
