use crate::{
    error::{Result, StudioError},
    gemini::traits::ImageGenerator,
    logger,
    models::{
        ApiErrorResponse, GeneratedImage, ImageGenerationRequest, PredictRequest, PredictResponse,
    },
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use uuid::Uuid;

#[derive(Clone)]
pub struct ImageClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ImageClient {
    pub fn new(
        client: Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:predict",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Sends one `predict` call and returns the first generated image.
    pub async fn generate(&self, request: ImageGenerationRequest) -> Result<GeneratedImage> {
        let request_id = Uuid::new_v4();
        let _timer = logger::timer(&format!("image generation [req:{}]", request_id));

        log::info!(
            "Generating image with model: {} [req:{}]",
            self.model,
            request_id
        );
        log::debug!("Prompt length: {} characters", request.prompt.chars().count());

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&PredictRequest::from(&request))
            .send()
            .await
            .map_err(|e| {
                log::error!("Error generating image with Gemini API: {}", e);
                StudioError::generation(e)
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            log::error!("Failed to read Gemini API response body: {}", e);
            StudioError::generation(e)
        })?;

        if !status.is_success() {
            let message = api_error_message(status, &body);
            log::error!("Gemini API returned {}: {}", status, message);
            return Err(StudioError::generation(message));
        }

        let predict: PredictResponse = serde_json::from_str(&body).map_err(|e| {
            log::error!("Unreadable Gemini API response: {}", e);
            StudioError::generation(format!("invalid response body: {}", e))
        })?;

        first_image(predict, &request.output_mime_type)
    }
}

#[async_trait]
impl ImageGenerator for ImageClient {
    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage> {
        self.generate(ImageGenerationRequest::new(prompt)).await
    }
}

fn first_image(response: PredictResponse, requested_mime_type: &str) -> Result<GeneratedImage> {
    let Some(prediction) = response.predictions.into_iter().next() else {
        log::warn!("Gemini API returned no predictions");
        return Err(StudioError::no_image());
    };

    match prediction.bytes_base64_encoded {
        Some(bytes) if !bytes.is_empty() => {
            let mime_type = prediction
                .mime_type
                .unwrap_or_else(|| requested_mime_type.to_string());
            log::info!("Image generated ({} encoded bytes, {})", bytes.len(), mime_type);
            Ok(GeneratedImage::new(bytes, mime_type))
        }
        _ => {
            if let Some(reason) = prediction.rai_filtered_reason {
                log::warn!("Image filtered by provider: {}", reason);
            }
            Err(StudioError::no_image())
        }
    }
}

fn api_error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ApiErrorResponse>(body)
        .ok()
        .and_then(|e| e.error.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status))
}
