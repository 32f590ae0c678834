//! Gemini REST data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Base64 payload embedded in a request part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiInlineData {
    /// MIME type of the payload
    mime_type: String,
    /// Base64-encoded bytes
    data: String,
}

impl GeminiInlineData {
    /// Create an inline payload.
    pub fn new(mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            mime_type: mime_type.into(),
            data: data.into(),
        }
    }
}

/// A content part; exactly one field is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiPart {
    /// Text part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    /// Inline binary part
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<GeminiInlineData>,
}

impl GeminiPart {
    /// A text part.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    /// An inline data part.
    pub fn from_inline_data(data: GeminiInlineData) -> Self {
        Self {
            text: None,
            inline_data: Some(data),
        }
    }
}

/// A turn of content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct GeminiContent {
    /// Producer of the content
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    /// Ordered parts
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

impl GeminiContent {
    /// Creates a new builder for `GeminiContent`.
    pub fn builder() -> GeminiContentBuilder {
        GeminiContentBuilder::default()
    }
}

/// Generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct GeminiGenerationConfig {
    /// Maximum tokens to generate
    max_output_tokens: u32,
    /// Media resolution hint (e.g. `MEDIA_RESOLUTION_LOW`)
    #[builder(default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    media_resolution: Option<String>,
}

impl GeminiGenerationConfig {
    /// Creates a new builder for `GeminiGenerationConfig`.
    pub fn builder() -> GeminiGenerationConfigBuilder {
        GeminiGenerationConfigBuilder::default()
    }
}

/// `generateContent` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
#[serde(rename_all = "camelCase")]
pub struct GeminiRequest {
    /// Conversation contents
    contents: Vec<GeminiContent>,
    /// Generation parameters
    generation_config: GeminiGenerationConfig,
}

impl GeminiRequest {
    /// Creates a new builder for `GeminiRequest`.
    pub fn builder() -> GeminiRequestBuilder {
        GeminiRequestBuilder::default()
    }
}

/// One response candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content; absent when blocked
    #[serde(default)]
    content: Option<GeminiContent>,
    /// Why generation stopped
    #[serde(default)]
    finish_reason: Option<String>,
}

/// `generateContent` response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GeminiResponse {
    /// Response candidates
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate.
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        Some(text)
    }
}
