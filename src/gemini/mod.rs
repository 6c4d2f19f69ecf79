pub mod image_client;
pub mod traits;

use crate::{
    config::GeminiConfig,
    error::{Result, StudioError},
};
use reqwest::Client;

pub use image_client::ImageClient;
pub use traits::ImageGenerator;

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
}

impl GeminiClient {
    /// Fails when no API key is configured; the client is never built without one.
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                StudioError::ConfigError("API_KEY environment variable not set".into())
            })?;

        let client = Client::builder()
            .user_agent(concat!("imagen-studio/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| StudioError::ConfigError(format!("HTTP client: {}", e)))?;

        Ok(Self {
            image_client: ImageClient::new(client, api_key, config.model, config.base_url),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }
}
