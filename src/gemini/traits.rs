use crate::{error::Result, models::GeneratedImage};
use async_trait::async_trait;

/// Anything that turns a prompt into one encoded image.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage>;
}
