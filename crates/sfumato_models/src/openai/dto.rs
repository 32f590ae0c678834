//! OpenAI chat completions data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Inline image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiImageUrl {
    /// `data:` URL carrying the base64 image
    url: String,
    /// Resolution hint ("low", "high", "auto")
    detail: String,
}

impl OpenAiImageUrl {
    /// Create an image reference.
    pub fn new(url: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            detail: detail.into(),
        }
    }
}

/// One part of a multimodal user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OpenAiContentPart {
    /// Instruction text
    Text {
        /// The text
        text: String,
    },
    /// Inline image
    ImageUrl {
        /// The image reference
        image_url: OpenAiImageUrl,
    },
}

/// Chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct OpenAiMessage {
    /// Message role
    role: String,
    /// Multimodal content parts
    content: Vec<OpenAiContentPart>,
}

impl OpenAiMessage {
    /// Creates a new builder for `OpenAiMessage`.
    pub fn builder() -> OpenAiMessageBuilder {
        OpenAiMessageBuilder::default()
    }
}

/// Chat completions request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct OpenAiRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<OpenAiMessage>,
    /// Maximum tokens to generate
    max_tokens: u32,
}

impl OpenAiRequest {
    /// Creates a new builder for `OpenAiRequest`.
    pub fn builder() -> OpenAiRequestBuilder {
        OpenAiRequestBuilder::default()
    }
}

/// Assistant message in a response choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiResponseMessage {
    /// Generated text, absent on refusals and tool calls
    #[serde(default)]
    content: Option<String>,
}

/// One completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiChoice {
    /// The generated message
    message: OpenAiResponseMessage,
}

/// Chat completions response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct OpenAiResponse {
    /// Completion choices
    #[serde(default)]
    choices: Vec<OpenAiChoice>,
}

impl OpenAiResponse {
    /// Text of the first choice, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }
}
