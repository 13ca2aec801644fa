//! Client-side conversation state and submit flow

use std::path::{Path, PathBuf};

use anyhow::{Error, Result, bail};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use crate::api::public::chat::{ChatRequest, ChatResponse};
use crate::chat::models::{ChatMessage, Role, UploadedFile};

/// Shown when a staged attachment cannot be read before the request
/// goes out.
pub const SUBMIT_ERROR_MESSAGE: &str = "Oops! Something went wrong. Please try again.";

/// Shown when the proxy call itself fails.
pub const API_ERROR_MESSAGE: &str =
    "Oops! Something went wrong with the API call. Please check your backend server.";

#[derive(Debug, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing to send, or a turn was already in flight
    Ignored,
    /// One turn ran; the session gained a user message and a model
    /// message (the reply or a fixed error string)
    Completed,
}

/// A file staged for the next submission. Replaced by a later
/// `attach`, consumed by the next `submit`.
#[derive(Clone, Debug)]
pub struct Attachment {
    pub path: PathBuf,
    pub mime_type: String,
}

fn guess_mime_type(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let mime = match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    };
    mime.to_string()
}

async fn read_attachment(attachment: &Attachment) -> Result<UploadedFile, Error> {
    let bytes = tokio::fs::read(&attachment.path).await?;
    Ok(UploadedFile {
        data: STANDARD.encode(bytes),
        mime_type: attachment.mime_type.clone(),
    })
}

/// Holds one conversation against the chat proxy. History is
/// in-memory only and append-only; the full history is re-sent on
/// every turn.
pub struct ChatSession {
    api_url: String,
    client: reqwest::Client,
    messages: Vec<ChatMessage>,
    attachment: Option<Attachment>,
    busy: bool,
}

impl ChatSession {
    pub fn new(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            client: reqwest::Client::new(),
            messages: Vec::new(),
            attachment: None,
            busy: false,
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The latest model reply, if the last turn produced one
    pub fn last_reply(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|msg| msg.role == Role::Model)
            .map(|msg| msg.content.as_str())
    }

    /// Stage a single file for the next submission. A later attach
    /// replaces the staged file.
    pub fn attach(&mut self, path: &Path) -> &Attachment {
        let mime_type = guess_mime_type(path);
        self.attachment.insert(Attachment {
            path: path.to_path_buf(),
            mime_type,
        })
    }

    pub fn attachment(&self) -> Option<&Attachment> {
        self.attachment.as_ref()
    }

    pub fn clear_attachment(&mut self) {
        self.attachment = None;
    }

    /// Runs one turn: appends the user message optimistically, sends
    /// the snapshot history (plus the staged attachment, base64
    /// encoded) to the proxy, and appends the reply. Failures never
    /// escape; they are appended as fixed model messages. The busy
    /// flag is cleared on every path before returning.
    pub async fn submit(&mut self, input: &str) -> SubmitOutcome {
        if self.busy {
            return SubmitOutcome::Ignored;
        }
        if input.trim().is_empty() && self.attachment.is_none() {
            return SubmitOutcome::Ignored;
        }

        let attachment = self.attachment.take();
        let user_message = match &attachment {
            Some(attachment) => ChatMessage::with_image(
                Role::User,
                input,
                &attachment.path.display().to_string(),
            ),
            None => ChatMessage::new(Role::User, input),
        };
        self.messages.push(user_message);
        self.busy = true;

        // Snapshot taken now, not reread after the request resolves
        let history = self.messages.clone();

        let uploaded_file = match &attachment {
            Some(attachment) => match read_attachment(attachment).await {
                Ok(file) => Some(file),
                Err(err) => {
                    tracing::error!(
                        "Failed to read attachment {}: {}",
                        attachment.path.display(),
                        err
                    );
                    self.messages
                        .push(ChatMessage::new(Role::Model, SUBMIT_ERROR_MESSAGE));
                    self.busy = false;
                    return SubmitOutcome::Completed;
                }
            },
            None => None,
        };

        let payload = ChatRequest {
            messages: history,
            uploaded_file,
        };

        match self.call_api(&payload).await {
            Ok(text) => {
                self.messages.push(ChatMessage::new(Role::Model, &text));
            }
            Err(err) => {
                tracing::error!("Chat API call failed: {}", err);
                self.messages
                    .push(ChatMessage::new(Role::Model, API_ERROR_MESSAGE));
            }
        }

        self.busy = false;
        SubmitOutcome::Completed
    }

    async fn call_api(&self, payload: &ChatRequest) -> Result<String, Error> {
        let response = self
            .client
            .post(&self.api_url)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            bail!("Chat API returned status {}", status);
        }

        let body: ChatResponse = response.json().await?;
        Ok(body.text)
    }
}
