/// Fallback shown when the provider call fails without any message.
pub const UNEXPECTED_GENERATION_ERROR: &str =
    "An unexpected error occurred while generating the image.";

const GENERATION_PREFIX: &str = "Failed to generate image";

#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    GenerationError(String),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("Server error: {0}")]
    ServerError(#[from] std::io::Error),
}

impl StudioError {
    /// Wraps an underlying provider failure, keeping its message when there is one.
    pub fn generation(cause: impl std::fmt::Display) -> Self {
        let cause = cause.to_string();
        let cause = cause.trim();
        if cause.is_empty() {
            StudioError::GenerationError(UNEXPECTED_GENERATION_ERROR.to_string())
        } else {
            StudioError::GenerationError(format!("{}: {}", GENERATION_PREFIX, cause))
        }
    }

    pub fn no_image() -> Self {
        Self::generation("No image was generated. The response may have been blocked.")
    }
}

pub type Result<T> = std::result::Result<T, StudioError>;
