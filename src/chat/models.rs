//! Message types shared by the chat client and the proxy API

use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "model")]
    Model,
}

/// One turn of the conversation as held by the client and re-sent in
/// full on every request. `image` is a local preview reference only
/// and is never forwarded to the provider.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ChatMessage {
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
            image: None,
        }
    }

    pub fn with_image(role: Role, content: &str, image: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
            image: Some(image.to_string()),
        }
    }
}

/// A single file attachment carried alongside one request. Transient:
/// it is not retained in the history after the turn completes.
///
/// `mime_type` is required. A payload carrying an attachment without a
/// declared MIME type is rejected at deserialization time.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Raw file bytes, base64 encoded
    pub data: String,
    pub mime_type: String,
}

impl UploadedFile {
    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}
