//! Test utilities for integration tests
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use quip::api::AppState;
use quip::api::app;
use quip::core::AppConfig;

pub const TEST_SYSTEM_MESSAGE: &str = "You are a test assistant.";

/// Creates a test application router whose provider host points at
/// the given URL (usually a mockito server).
pub fn test_app(gemini_api_host: &str) -> Router {
    let app_config = AppConfig {
        gemini_api_key: String::from("test-api-key"),
        gemini_api_host: gemini_api_host.to_string(),
        text_model: String::from("text-model"),
        vision_model: String::from("vision-model"),
        system_message: String::from(TEST_SYSTEM_MESSAGE),
    };
    let app_state = AppState::new(app_config);
    app(Arc::new(RwLock::new(app_state)))
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(bytes.to_vec()).expect("Response body was not utf8")
}
