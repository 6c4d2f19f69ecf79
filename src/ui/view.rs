//! Pure rendering of [`AppState`] into what the page shows.

use serde::Serialize;

use super::state::AppState;

pub const BUSY_MESSAGE: &str = "Conjuring your masterpiece...";
pub const PLACEHOLDER_GUIDANCE: &str = "Your generated image will appear here.";
pub const GENERATE_LABEL: &str = "Generate";
pub const GENERATING_LABEL: &str = "Generating...";

/// Contents of the image area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Panel {
    Busy { message: &'static str },
    Image { data_url: String, alt: String },
    Placeholder { guidance: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page {
    pub prompt: String,
    pub input_enabled: bool,
    pub button_label: &'static str,
    /// Shown below the input controls.
    pub error: Option<String>,
    pub panel: Panel,
}

pub fn render(state: &AppState) -> Page {
    let loading = state.is_loading();

    let panel = if loading {
        Panel::Busy {
            message: BUSY_MESSAGE,
        }
    } else if let Some(image) = state.image() {
        Panel::Image {
            data_url: image.data_url(),
            alt: state.prompt().to_string(),
        }
    } else {
        Panel::Placeholder {
            guidance: PLACEHOLDER_GUIDANCE,
        }
    };

    Page {
        prompt: state.prompt().to_string(),
        input_enabled: !loading,
        button_label: if loading { GENERATING_LABEL } else { GENERATE_LABEL },
        error: if loading {
            None
        } else {
            state.error().map(str::to_string)
        },
        panel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::StudioError, models::GeneratedImage};

    #[test]
    fn test_idle_without_result_shows_guidance() {
        let page = render(&AppState::new());
        assert_eq!(
            page.panel,
            Panel::Placeholder {
                guidance: PLACEHOLDER_GUIDANCE
            }
        );
        assert!(page.input_enabled);
        assert_eq!(page.button_label, GENERATE_LABEL);
        assert!(page.error.is_none());
    }

    #[test]
    fn test_generating_shows_busy_only() {
        let mut state = AppState::new();
        state.edit_prompt("forest");
        let _ = state.submit();

        let page = render(&state);
        assert_eq!(
            page.panel,
            Panel::Busy {
                message: BUSY_MESSAGE
            }
        );
        assert!(!page.input_enabled);
        assert_eq!(page.button_label, GENERATING_LABEL);
        assert!(page.error.is_none());
    }

    #[test]
    fn test_error_shows_message_and_empty_panel() {
        let mut state = AppState::new();
        state.edit_prompt("forest");
        let _ = state.submit();
        state.complete(Err(StudioError::generation("denied")));

        let page = render(&state);
        assert_eq!(page.error.as_deref(), Some("Failed to generate image: denied"));
        assert!(matches!(page.panel, Panel::Placeholder { .. }));
    }

    #[test]
    fn test_image_uses_prompt_as_alt_text() {
        let mut state = AppState::new();
        state.edit_prompt("forest");
        let _ = state.submit();
        state.complete(Ok(GeneratedImage::new("QUJD", "image/jpeg")));

        let page = render(&state);
        assert_eq!(
            page.panel,
            Panel::Image {
                data_url: "data:image/jpeg;base64,QUJD".into(),
                alt: "forest".into(),
            }
        );
        assert!(page.error.is_none());
    }
}
