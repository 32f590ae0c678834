use crate::http::{api_key_from_env, build_client, read_json, request_error};
use crate::retry::{RetrySettings, with_retry};
use crate::{
    GeminiContent, GeminiGenerationConfig, GeminiInlineData, GeminiPart, GeminiRequest,
    GeminiResponse,
};
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use sfumato_error::{VisionError, VisionErrorKind};
use sfumato_interface::{ImageDetail, VisionDriver, VisionRequest};
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the Gemini credential.
pub const GEMINI_API_KEY_VAR: &str = "GEMINI_API_KEY";

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Gemini vision client over the REST API.
#[derive(Debug, Clone)]
pub struct GeminiVisionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    retry: RetrySettings,
}

impl GeminiVisionClient {
    /// Creates a new Gemini client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - Gemini API key
    /// * `model` - Model identifier (e.g., "gemini-2.0-flash")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, VisionError> {
        debug!("Creating new Gemini vision client");
        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT)?,
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetrySettings::default(),
        })
    }

    /// Creates a client from `GEMINI_API_KEY`.
    ///
    /// An empty or blank value is treated as unset.
    pub fn from_env(model: impl Into<String>) -> Result<Self, VisionError> {
        let api_key = api_key_from_env(GEMINI_API_KEY_VAR)?;
        Self::new(api_key, model)
    }

    /// Point the client at another endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the whole-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, VisionError> {
        self.client = build_client(timeout)?;
        self.timeout = timeout;
        Ok(self)
    }

    /// Override retry behaviour.
    pub fn with_retry(mut self, retry: RetrySettings) -> Self {
        self.retry = retry;
        self
    }

    fn media_resolution(detail: ImageDetail) -> Option<String> {
        match detail {
            ImageDetail::Low => Some("MEDIA_RESOLUTION_LOW".to_string()),
            ImageDetail::High => Some("MEDIA_RESOLUTION_HIGH".to_string()),
            ImageDetail::Auto => None,
        }
    }

    /// Convert a vision request into a `generateContent` body.
    #[instrument(skip(request))]
    pub fn convert_request(request: &VisionRequest) -> Result<GeminiRequest, VisionError> {
        let image = GeminiInlineData::new(
            request.mime_type(),
            general_purpose::STANDARD.encode(request.image()),
        );
        let content = GeminiContent::builder()
            .role(Some("user".to_string()))
            .parts(vec![
                GeminiPart::from_text(request.prompt()),
                GeminiPart::from_inline_data(image),
            ])
            .build()
            .map_err(|e| VisionError::new(VisionErrorKind::Builder(e.to_string())))?;
        let generation_config = GeminiGenerationConfig::builder()
            .max_output_tokens(*request.max_tokens())
            .media_resolution(Self::media_resolution(*request.detail()))
            .build()
            .map_err(|e| VisionError::new(VisionErrorKind::Builder(e.to_string())))?;

        GeminiRequest::builder()
            .contents(vec![content])
            .generation_config(generation_config)
            .build()
            .map_err(|e| VisionError::new(VisionErrorKind::Builder(e.to_string())))
    }

    /// Sends a `generateContent` request.
    #[instrument(skip(self, request), fields(model = %self.model))]
    pub async fn generate_content(
        &self,
        request: &GeminiRequest,
    ) -> Result<GeminiResponse, VisionError> {
        debug!("Sending request to Gemini API");
        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        read_json(response, "gemini").await
    }

    /// Extract the generated text from a response.
    pub fn convert_response(response: &GeminiResponse) -> Result<String, VisionError> {
        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(VisionError::new(VisionErrorKind::EmptyResponse)),
        }
    }
}

#[async_trait::async_trait]
impl VisionDriver for GeminiVisionClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn describe_image(&self, request: &VisionRequest) -> Result<String, VisionError> {
        let body = Self::convert_request(request)?;
        let response = with_retry(self.retry, || self.generate_content(&body)).await?;
        Self::convert_response(&response)
    }

    fn provider_name(&self) -> &'static str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
