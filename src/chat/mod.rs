pub mod models;
pub mod session;

pub use models::{ChatMessage, Role, UploadedFile};
pub use session::{API_ERROR_MESSAGE, Attachment, ChatSession, SUBMIT_ERROR_MESSAGE, SubmitOutcome};
