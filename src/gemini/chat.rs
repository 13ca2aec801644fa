use anyhow::{Error, Result, anyhow};

use crate::chat::{ChatMessage, Role, UploadedFile};
use crate::gemini::{Content, GenerateContentRequest, Part, extract_text, generate_content};

/// Substituted for the attachment part when the uploaded file is not
/// an image. No document text extraction is performed.
pub const UNSUPPORTED_ATTACHMENT_NOTICE: &str =
    "I can't directly read documents like PDFs yet. Please provide text or an image.";

fn provider_role(role: &Role) -> &'static str {
    match role {
        Role::User => "user",
        _ => "model",
    }
}

/// Rewrites the conversation history into a `generateContent` request.
///
/// The request carries the mapped history followed by one final user
/// turn whose parts are, in order: the system persona prompt, the
/// attachment part when a file is present (inline data for images, the
/// fixed notice for everything else), and the latest user message
/// content. Part order is load-bearing for the provider.
pub fn build_generate_request(
    system_message: &str,
    messages: &[ChatMessage],
    uploaded_file: Option<&UploadedFile>,
) -> Result<GenerateContentRequest, Error> {
    let latest = messages
        .last()
        .ok_or_else(|| anyhow!("Chat history is empty"))?;

    let mut parts = Vec::new();
    if let Some(file) = uploaded_file {
        if file.is_image() {
            parts.push(Part::inline_data(&file.mime_type, &file.data));
        } else {
            parts.push(Part::text(UNSUPPORTED_ATTACHMENT_NOTICE));
        }
    }
    parts.insert(0, Part::text(system_message));
    parts.push(Part::text(&latest.content));

    let mut contents: Vec<Content> = messages
        .iter()
        .map(|msg| Content {
            role: Some(provider_role(&msg.role).to_string()),
            parts: vec![Part::text(&msg.content)],
        })
        .collect();
    contents.push(Content {
        role: Some("user".to_string()),
        parts,
    });

    Ok(GenerateContentRequest { contents })
}

/// Runs one chat turn against the provider and returns the reply text.
/// Any attachment, image or not, routes to the vision-capable model.
pub async fn chat(
    system_message: &str,
    messages: &[ChatMessage],
    uploaded_file: Option<&UploadedFile>,
    api_hostname: &str,
    api_key: &str,
    text_model: &str,
    vision_model: &str,
) -> Result<String, Error> {
    let request = build_generate_request(system_message, messages, uploaded_file)?;
    let model = if uploaded_file.is_some() {
        vision_model
    } else {
        text_model
    };

    let response = generate_content(&request, api_hostname, api_key, model).await?;
    extract_text(&response)
}
