//! Live calls against the hosted vision APIs.
//!
//! Run with `cargo test -p sfumato_models --features api`.

use sfumato_interface::{VisionDriver, VisionRequest};
use sfumato_models::{GeminiVisionClient, OpenAiVisionClient};

// 1x1 red PNG
const RED_PIXEL_PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90, 0x77, 0x53,
    0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8, 0xCF, 0xC0, 0x00,
    0x00, 0x03, 0x01, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0xB0, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E,
    0x44, 0xAE, 0x42, 0x60, 0x82,
];

fn request() -> anyhow::Result<VisionRequest> {
    Ok(VisionRequest::builder()
        .image(RED_PIXEL_PNG.to_vec())
        .mime_type("image/png")
        .prompt("Describe the color of this image in a few words.")
        .max_tokens(30u32)
        .build()?)
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn openai_describes_image() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = OpenAiVisionClient::from_env("gpt-4o-mini")?;

    let text = client.describe_image(&request()?).await?;

    assert!(!text.trim().is_empty());
    println!("OpenAI: {text}");
    Ok(())
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn gemini_describes_image() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let client = GeminiVisionClient::from_env("gemini-2.0-flash")?;

    let text = client.describe_image(&request()?).await?;

    assert!(!text.trim().is_empty());
    println!("Gemini: {text}");
    Ok(())
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_error() -> anyhow::Result<()> {
    // Unroutable endpoint; the transport error must come back as a VisionError
    let client = OpenAiVisionClient::new("invalid", "gpt-4o-mini")?
        .with_base_url("http://127.0.0.1:9")
        .with_retry(sfumato_models::RetrySettings {
            no_retry: true,
            ..Default::default()
        });

    let result = client.describe_image(&request()?).await;

    assert!(result.is_err());
    Ok(())
}
