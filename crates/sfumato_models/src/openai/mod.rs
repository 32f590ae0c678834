//! OpenAI-compatible chat completions back-end.

mod client;
mod dto;

pub use client::{OPENAI_API_KEY_VAR, OpenAiVisionClient};
pub use dto::{
    OpenAiChoice, OpenAiContentPart, OpenAiImageUrl, OpenAiMessage, OpenAiMessageBuilder,
    OpenAiRequest, OpenAiRequestBuilder, OpenAiResponse, OpenAiResponseMessage,
};
