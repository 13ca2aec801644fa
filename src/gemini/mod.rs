//! Client for the Gemini `generateContent` API

mod chat;
mod core;

pub use self::chat::{UNSUPPORTED_ATTACHMENT_NOTICE, build_generate_request, chat};
pub use self::core::{
    Candidate, Content, GenerateContentRequest, GenerateContentResponse, InlineData, Part,
    extract_text, generate_content,
};
