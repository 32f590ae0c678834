//! Google Gemini `generateContent` back-end.

mod client;
mod dto;

pub use client::{GEMINI_API_KEY_VAR, GeminiVisionClient};
pub use dto::{
    GeminiCandidate, GeminiContent, GeminiContentBuilder, GeminiGenerationConfig,
    GeminiGenerationConfigBuilder, GeminiInlineData, GeminiPart, GeminiRequest,
    GeminiRequestBuilder, GeminiResponse,
};
