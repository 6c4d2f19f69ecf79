use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{error::StudioError, models::GeneratedImage};

pub const EMPTY_PROMPT_MESSAGE: &str = "Please enter a prompt.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestState {
    Idle,
    Generating,
}

/// Outcome of the last request. A new one always replaces the old one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Image(GeneratedImage),
    Error(String),
}

/// A request the caller must now send to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub request_id: Uuid,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Started(Ticket),
    Rejected(String),
    /// A request is already in flight.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StateSnapshot {
    pub prompt: String,
    pub loading: bool,
    pub error: Option<String>,
    pub image: Option<String>,
}

/// Prompt text, request state and result. No result is held while generating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    prompt: String,
    request_state: RequestState,
    result: Option<GenerationResult>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            request_state: RequestState::Idle,
            result: None,
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn request_state(&self) -> RequestState {
        self.request_state
    }

    pub fn is_loading(&self) -> bool {
        self.request_state == RequestState::Generating
    }

    pub fn result(&self) -> Option<&GenerationResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        match &self.result {
            Some(GenerationResult::Error(message)) => Some(message),
            _ => None,
        }
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        match &self.result {
            Some(GenerationResult::Image(image)) => Some(image),
            _ => None,
        }
    }

    pub fn edit_prompt(&mut self, text: impl Into<String>) {
        self.prompt = text.into();
    }

    pub fn submit(&mut self) -> SubmitOutcome {
        if self.is_loading() {
            return SubmitOutcome::Ignored;
        }

        if self.prompt.trim().is_empty() {
            self.result = Some(GenerationResult::Error(EMPTY_PROMPT_MESSAGE.to_string()));
            return SubmitOutcome::Rejected(EMPTY_PROMPT_MESSAGE.to_string());
        }

        self.result = None;
        self.request_state = RequestState::Generating;
        SubmitOutcome::Started(Ticket {
            request_id: Uuid::new_v4(),
            prompt: self.prompt.clone(),
        })
    }

    /// Prompt edit plus submit as one step. While generating, the prompt is
    /// left untouched.
    pub fn submit_prompt(&mut self, text: impl Into<String>) -> SubmitOutcome {
        if self.is_loading() {
            return SubmitOutcome::Ignored;
        }
        self.edit_prompt(text);
        self.submit()
    }

    /// Applies a finished request. Late responses are applied as-is.
    pub fn complete(&mut self, outcome: Result<GeneratedImage, StudioError>) {
        self.result = Some(match outcome {
            Ok(image) => GenerationResult::Image(image),
            Err(err) => {
                let message = err.to_string();
                if message.trim().is_empty() {
                    GenerationResult::Error(UNKNOWN_ERROR_MESSAGE.to_string())
                } else {
                    GenerationResult::Error(message)
                }
            }
        });
        self.request_state = RequestState::Idle;
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot {
            prompt: self.prompt.clone(),
            loading: self.is_loading(),
            error: self.error().map(str::to_string),
            image: self.image().map(GeneratedImage::data_url),
        }
    }
}
