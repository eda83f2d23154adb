use std::time::Duration;

use domain::Comment;
use gemini_client::{ClassifierError, GeminiClient, SentimentClassifier};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";

fn client(server: &MockServer) -> GeminiClient {
    GeminiClient::new("gm-test-key", server.uri(), MODEL, Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn classify_sends_prompt_and_returns_reply_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "gm-test-key"))
        .and(body_string_contains("exactly 3 items"))
        .and(body_string_contains("Best song ever"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "parts": [{ "text": "[\"Positive\", \"Neutral\", \"Negative\"]" }],
                    "role": "model"
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 9 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let comments = vec![
        Comment::new("Best song ever"),
        Comment::new("Posted on a Tuesday"),
        Comment::new("Too loud"),
    ];
    let reply = client(&server).classify(&comments).await.unwrap();
    assert_eq!(reply, r#"["Positive", "Neutral", "Negative"]"#);
}

#[tokio::test]
async fn api_error_message_is_decoded() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate("hi").await.unwrap_err();
    match err {
        ClassifierError::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.starts_with("API key not valid"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn blocked_prompt_surfaces_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate("hi").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Blocked(reason) if reason == "SAFETY"));
}

#[tokio::test]
async fn slow_model_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "candidates": [] }))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client =
        GeminiClient::new("gm-test-key", server.uri(), MODEL, Duration::from_millis(50)).unwrap();
    let err = client.generate("hi").await.unwrap_err();
    assert!(matches!(err, ClassifierError::Timeout));
}
