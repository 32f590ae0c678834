use crate::http::{api_key_from_env, build_client, read_json, request_error};
use crate::retry::{RetrySettings, with_retry};
use crate::{OpenAiContentPart, OpenAiImageUrl, OpenAiMessage, OpenAiRequest, OpenAiResponse};
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use sfumato_error::{VisionError, VisionErrorKind};
use sfumato_interface::{VisionDriver, VisionRequest};
use std::time::Duration;
use tracing::{debug, instrument};

/// Environment variable holding the OpenAI credential.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// OpenAI-compatible vision client.
#[derive(Debug, Clone)]
pub struct OpenAiVisionClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
    retry: RetrySettings,
}

impl OpenAiVisionClient {
    /// Creates a new OpenAI client.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g., "gpt-4o-mini")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, VisionError> {
        debug!("Creating new OpenAI vision client");
        Ok(Self {
            client: build_client(DEFAULT_TIMEOUT)?,
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENAI_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            retry: RetrySettings::default(),
        })
    }

    /// Creates a client from `OPENAI_API_KEY`.
    ///
    /// An empty or blank value is treated as unset.
    pub fn from_env(model: impl Into<String>) -> Result<Self, VisionError> {
        let api_key = api_key_from_env(OPENAI_API_KEY_VAR)?;
        Self::new(api_key, model)
    }

    /// Point the client at another OpenAI-compatible endpoint.
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

    /// Convert a vision request into a chat completions body.
    #[instrument(skip(self, request))]
    pub fn convert_request(&self, request: &VisionRequest) -> Result<OpenAiRequest, VisionError> {
        let data_url = format!(
            "data:{};base64,{}",
            request.mime_type(),
            general_purpose::STANDARD.encode(request.image())
        );
        let message = OpenAiMessage::builder()
            .role("user")
            .content(vec![
                OpenAiContentPart::Text {
                    text: request.prompt().clone(),
                },
                OpenAiContentPart::ImageUrl {
                    image_url: OpenAiImageUrl::new(data_url, request.detail().to_string()),
                },
            ])
            .build()
            .map_err(|e| VisionError::new(VisionErrorKind::Builder(e.to_string())))?;

        OpenAiRequest::builder()
            .model(&self.model)
            .messages(vec![message])
            .max_tokens(*request.max_tokens())
            .build()
            .map_err(|e| VisionError::new(VisionErrorKind::Builder(e.to_string())))
    }

    /// Sends a chat completions request.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn complete(&self, request: &OpenAiRequest) -> Result<OpenAiResponse, VisionError> {
        debug!("Sending request to OpenAI API");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| request_error(e, self.timeout))?;

        read_json(response, "openai").await
    }

    /// Extract the generated text from a response.
    pub fn convert_response(response: &OpenAiResponse) -> Result<String, VisionError> {
        match response.first_text() {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            _ => Err(VisionError::new(VisionErrorKind::EmptyResponse)),
        }
    }
}

#[async_trait::async_trait]
impl VisionDriver for OpenAiVisionClient {
    #[instrument(skip(self, request), fields(model = %self.model))]
    async fn describe_image(&self, request: &VisionRequest) -> Result<String, VisionError> {
        let body = self.convert_request(request)?;
        let response = with_retry(self.retry, || self.complete(&body)).await?;
        Self::convert_response(&response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sfumato_interface::ImageDetail;

    fn request() -> VisionRequest {
        VisionRequest::builder()
            .image(vec![1u8, 2, 3])
            .mime_type("image/png")
            .prompt("Describe it.")
            .detail(ImageDetail::Low)
            .max_tokens(60u32)
            .build()
            .unwrap()
    }

    #[test]
    fn request_carries_inline_data_url_at_low_detail() {
        let client = OpenAiVisionClient::new("sk-test", "gpt-4o-mini").unwrap();
        let body = serde_json::to_value(client.convert_request(&request()).unwrap()).unwrap();

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["max_tokens"], 60);
        let content = &body["messages"][0]["content"];
        assert_eq!(content[0]["type"], "text");
        assert_eq!(content[0]["text"], "Describe it.");
        assert_eq!(content[1]["type"], "image_url");
        assert_eq!(content[1]["image_url"]["url"], "data:image/png;base64,AQID");
        assert_eq!(content[1]["image_url"]["detail"], "low");
    }

    #[test]
    fn response_text_is_extracted() {
        let response: OpenAiResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"Red leather shoe"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            OpenAiVisionClient::convert_response(&response).unwrap(),
            "Red leather shoe"
        );
    }

    #[test]
    fn missing_or_blank_content_is_empty_response() {
        for raw in [
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":"   "}}]}"#,
        ] {
            let response: OpenAiResponse = serde_json::from_str(raw).unwrap();
            let err = OpenAiVisionClient::convert_response(&response).unwrap_err();
            assert_eq!(err.kind, VisionErrorKind::EmptyResponse);
        }
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenAiVisionClient::new("k", "m")
            .unwrap()
            .with_base_url("http://localhost:8080/v1/");
        assert_eq!(client.base_url, "http://localhost:8080/v1");
    }
}
