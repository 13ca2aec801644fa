use std::env;

/// Persona instruction sent with every provider request.
pub const DEFAULT_SYSTEM_MESSAGE: &str = "You are a professional comedian and a sarcastic, humorous chatbot. Your primary goal is to entertain the user with witty, clever, and sometimes subtly mocking jokes. You should understand double meanings and play on words. Keep your replies short and punchy. Avoid giving formal or serious responses unless absolutely necessary.";

pub const DEFAULT_GEMINI_API_HOST: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-05-20";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_api_host: String,
    pub text_model: String,
    pub vision_model: String,
    pub system_message: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        // The server must not start without a credential
        let gemini_api_key =
            env::var("GEMINI_API_KEY").expect("Missing env var GEMINI_API_KEY");
        let gemini_api_host = env::var("QUIP_GEMINI_API_HOST")
            .unwrap_or_else(|_| DEFAULT_GEMINI_API_HOST.to_string());
        let text_model =
            env::var("QUIP_TEXT_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let vision_model =
            env::var("QUIP_VISION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let system_message = env::var("QUIP_SYSTEM_MESSAGE")
            .unwrap_or_else(|_| DEFAULT_SYSTEM_MESSAGE.to_string());

        Self {
            gemini_api_key,
            gemini_api_host,
            text_model,
            vision_model,
            system_message,
        }
    }
}
