//! Prompt-to-image front-end for the Gemini Imagen API.
//!
//! [`gemini::ImageClient`] sends one prompt and returns the first generated
//! image; [`ui::UiController`] owns the prompt, the single in-flight request
//! and its result; [`ui::view`] renders that state. With the `server` feature
//! the state is served as an HTML page by actix-web.

pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
#[cfg(feature = "server")]
pub mod server;
pub mod ui;

pub use config::{Config, GeminiConfig};
pub use error::{Result, StudioError};
pub use gemini::{GeminiClient, ImageClient, ImageGenerator};
pub use models::{GeneratedImage, ImageGenerationRequest};
pub use ui::{AppState, GenerationResult, RequestState, SubmitOutcome, UiController};
