//! Public types for the chat API

use serde::{Deserialize, Serialize};

use crate::chat::models::{ChatMessage, UploadedFile};

/// Wire payload for `POST /api/chat`. The client re-sends the full
/// history on every turn; there is no delta protocol.
#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploaded_file: Option<UploadedFile>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ChatResponse {
    pub text: String,
}

impl ChatResponse {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.into(),
        }
    }
}
