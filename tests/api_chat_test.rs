//! Integration tests for the chat proxy endpoint

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::test_utils::{TEST_SYSTEM_MESSAGE, body_to_string, test_app};

    const PROVIDER_REPLY: &str =
        r#"{"candidates": [{"content": {"role": "model", "parts": [{"text": "Obviously."}]}}]}"#;

    fn chat_request(payload: serde_json::Value) -> Request<Body> {
        Request::builder()
            .uri("/api/chat")
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap()
    }

    /// Tests that a text-only turn maps to the text model with the
    /// system prompt first and the latest user content last
    #[tokio::test]
    async fn it_relays_a_text_reply() {
        let mut server = mockito::Server::new_async().await;
        let app = test_app(&server.url());

        let mock = server
            .mock("POST", "/v1beta/models/text-model:generateContent")
            .match_header("x-goog-api-key", "test-api-key")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hi"}]},
                    {"role": "user", "parts": [
                        {"text": TEST_SYSTEM_MESSAGE},
                        {"text": "hi"},
                    ]},
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PROVIDER_REPLY)
            .create_async()
            .await;

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_to_string(response.into_body()).await;
        assert_eq!(body, r#"{"text":"Obviously."}"#);
    }

    /// Tests that prior turns are forwarded with translated roles
    #[tokio::test]
    async fn it_forwards_the_full_history() {
        let mut server = mockito::Server::new_async().await;
        let app = test_app(&server.url());

        let mock = server
            .mock("POST", "/v1beta/models/text-model:generateContent")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "hello"}]},
                    {"role": "model", "parts": [{"text": "well hello"}]},
                    {"role": "user", "parts": [{"text": "another joke"}]},
                    {"role": "user", "parts": [
                        {"text": TEST_SYSTEM_MESSAGE},
                        {"text": "another joke"},
                    ]},
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PROVIDER_REPLY)
            .create_async()
            .await;

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "messages": [
                    {"role": "user", "content": "hello"},
                    {"role": "model", "content": "well hello"},
                    {"role": "user", "content": "another joke"},
                ]
            })))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Tests that an image attachment becomes an inline part placed
    /// between the system prompt and the trailing text, routed to the
    /// vision model
    #[tokio::test]
    async fn it_sends_images_inline_to_the_vision_model() {
        let mut server = mockito::Server::new_async().await;
        let app = test_app(&server.url());

        let mock = server
            .mock("POST", "/v1beta/models/vision-model:generateContent")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "what is this?"}]},
                    {"role": "user", "parts": [
                        {"text": TEST_SYSTEM_MESSAGE},
                        {"inlineData": {"mimeType": "image/png", "data": "aGVsbG8="}},
                        {"text": "what is this?"},
                    ]},
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PROVIDER_REPLY)
            .create_async()
            .await;

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "messages": [{"role": "user", "content": "what is this?"}],
                "uploadedFile": {"data": "aGVsbG8=", "mimeType": "image/png"}
            })))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Tests that non-image attachments degrade to the fixed notice
    /// but still route to the vision model
    #[tokio::test]
    async fn it_substitutes_a_notice_for_document_attachments() {
        let mut server = mockito::Server::new_async().await;
        let app = test_app(&server.url());

        let mock = server
            .mock("POST", "/v1beta/models/vision-model:generateContent")
            .match_body(mockito::Matcher::Json(serde_json::json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "summarize this"}]},
                    {"role": "user", "parts": [
                        {"text": TEST_SYSTEM_MESSAGE},
                        {"text": "I can't directly read documents like PDFs yet. Please provide text or an image."},
                        {"text": "summarize this"},
                    ]},
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(PROVIDER_REPLY)
            .create_async()
            .await;

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "messages": [{"role": "user", "content": "summarize this"}],
                "uploadedFile": {"data": "aGVsbG8=", "mimeType": "application/pdf"}
            })))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    /// Tests that a provider failure maps to the generic 500 body
    /// without leaking the upstream error
    #[tokio::test]
    async fn it_returns_500_when_the_provider_fails() {
        let mut server = mockito::Server::new_async().await;
        let app = test_app(&server.url());

        let _mock = server
            .mock("POST", "/v1beta/models/text-model:generateContent")
            .with_status(500)
            .with_body(r#"{"error": {"message": "internal quota exceeded"}}"#)
            .create_async()
            .await;

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_to_string(response.into_body()).await;
        assert_eq!(body, r#"{"error":"Failed to generate content."}"#);
        assert!(!body.contains("quota"));
    }

    /// Tests that a 200 with no candidates is still a generic failure
    #[tokio::test]
    async fn it_returns_500_when_the_response_has_no_candidates() {
        let mut server = mockito::Server::new_async().await;
        let app = test_app(&server.url());

        let _mock = server
            .mock("POST", "/v1beta/models/text-model:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "messages": [{"role": "user", "content": "hi"}]
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_to_string(response.into_body()).await;
        assert_eq!(body, r#"{"error":"Failed to generate content."}"#);
    }

    /// Tests that an empty history is rejected before any provider call
    #[tokio::test]
    async fn it_rejects_an_empty_history() {
        let mut server = mockito::Server::new_async().await;
        let app = test_app(&server.url());

        let mock = server
            .mock("POST", "/v1beta/models/text-model:generateContent")
            .expect(0)
            .create_async()
            .await;

        let response = app
            .oneshot(chat_request(serde_json::json!({"messages": []})))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests that an attachment without a declared MIME type is
    /// rejected at deserialization
    #[tokio::test]
    async fn it_rejects_attachments_without_a_mime_type() {
        let app = test_app("http://127.0.0.1:9");

        let response = app
            .oneshot(chat_request(serde_json::json!({
                "messages": [{"role": "user", "content": "hi"}],
                "uploadedFile": {"data": "aGVsbG8="}
            })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    /// Tests that a request missing the messages field is rejected
    #[tokio::test]
    async fn it_rejects_a_payload_without_messages() {
        let app = test_app("http://127.0.0.1:9");

        let response = app
            .oneshot(chat_request(serde_json::json!({})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
