//! Router for the chat API

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use serde_json::json;

use super::public;
use crate::api::state::AppState;
use crate::core::AppConfig;
use crate::gemini;

type SharedState = Arc<RwLock<AppState>>;

/// Forward one conversation turn to the provider and relay the reply
async fn chat_handler(
    State(state): State<SharedState>,
    axum::Json(payload): axum::Json<public::ChatRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    // The source UI never submits an empty history; reject it here
    // instead of failing inside the request transform.
    if payload.messages.is_empty() {
        return Ok((
            StatusCode::BAD_REQUEST,
            axum::Json(json!({"error": "messages must not be empty"})),
        )
            .into_response());
    }

    let (gemini_api_host, gemini_api_key, text_model, vision_model, system_message) = {
        let shared_state = state.read().expect("Unable to read shared state");
        let AppConfig {
            gemini_api_key,
            gemini_api_host,
            text_model,
            vision_model,
            system_message,
        } = &shared_state.config;
        (
            gemini_api_host.clone(),
            gemini_api_key.clone(),
            text_model.clone(),
            vision_model.clone(),
            system_message.clone(),
        )
    };

    let text = gemini::chat(
        &system_message,
        &payload.messages,
        payload.uploaded_file.as_ref(),
        &gemini_api_host,
        &gemini_api_key,
        &text_model,
        &vision_model,
    )
    .await?;

    Ok(axum::Json(public::ChatResponse::new(&text)).into_response())
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
