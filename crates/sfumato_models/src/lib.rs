//! Vision model back-ends for the Sfumato image asset pipeline.
//!
//! Each client implements [`VisionDriver`](sfumato_interface::VisionDriver)
//! over a provider's REST API:
//!
//! - [`OpenAiVisionClient`] - OpenAI-compatible chat completions
//! - [`GeminiVisionClient`] - Google Gemini `generateContent`
//!
//! Transient failures (408, 429, 5xx, timeouts, connection errors) are retried
//! with jittered exponential backoff before the error is returned.
//!
//! # Example
//!
//! ```no_run
//! use sfumato_interface::{VisionDriver, VisionRequest};
//! use sfumato_models::OpenAiVisionClient;
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiVisionClient::from_env("gpt-4o-mini")?;
//! let request = VisionRequest::builder()
//!     .image(std::fs::read("shoe.jpg")?)
//!     .mime_type("image/jpeg")
//!     .prompt("Describe this product photo in 10-15 words.")
//!     .max_tokens(60u32)
//!     .build()?;
//! let text = client.describe_image(&request).await?;
//! # Ok(())
//! # }
//! ```

mod gemini;
mod http;
mod openai;
mod retry;

pub use gemini::{
    GEMINI_API_KEY_VAR, GeminiCandidate, GeminiContent, GeminiContentBuilder,
    GeminiGenerationConfig, GeminiGenerationConfigBuilder, GeminiInlineData, GeminiPart,
    GeminiRequest, GeminiRequestBuilder, GeminiResponse, GeminiVisionClient,
};
pub use openai::{
    OPENAI_API_KEY_VAR, OpenAiChoice, OpenAiContentPart, OpenAiImageUrl, OpenAiMessage,
    OpenAiMessageBuilder, OpenAiRequest, OpenAiRequestBuilder, OpenAiResponse,
    OpenAiResponseMessage, OpenAiVisionClient,
};
pub use retry::RetrySettings;
