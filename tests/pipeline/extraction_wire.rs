use serde_json::json;
use thoughtdesk::LlmError;
use thoughtdesk::extraction::{ActionExtractor, ActionKind};
use thoughtdesk::llm::create_provider;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn anthropic_reply(blocks: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "content": blocks,
        "usage": {"input_tokens": 120, "output_tokens": 48},
        "model": "MiniMax-M2.1"
    }))
}

async fn extractor_for(server: &MockServer) -> ActionExtractor {
    let provider = create_provider("minimax", Some("test-key"), Some(&server.uri()), 10).unwrap();
    ActionExtractor::new(provider, "MiniMax-M2.1")
}

#[tokio::test]
async fn extracts_actions_over_anthropic_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .and(header("x-api-key", "test-key"))
        .and(body_partial_json(json!({
            "model": "MiniMax-M2.1",
            "max_tokens": 1024,
            "messages": [{
                "role": "user",
                "content": "Extract action items from this:\n\nemail Dana the deck, book dentist friday"
            }]
        })))
        .respond_with(anthropic_reply(json!([
            {"type": "thinking", "thinking": "Two items: an email and a calendar event."},
            {"type": "text", "text": "```json\n[\n  {\"type\":\"email\",\"title\":\"Send deck to Dana\",\"description\":\"Attach Q3 deck\",\"canAutomate\":true,\"details\":\"Subject: Q3 deck\"},\n  {\"type\":\"calendar\",\"title\":\"Dentist\",\"description\":\"Friday\"}\n]\n```"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let actions = extractor_for(&server)
        .await
        .extract("  email Dana the deck, book dentist friday\n")
        .await
        .unwrap();

    assert_eq!(actions.len(), 2);
    assert_eq!(actions[0].kind, ActionKind::Email);
    assert_eq!(actions[0].details.as_deref(), Some("Subject: Q3 deck"));
    assert_eq!(actions[1].kind, ActionKind::Calendar);
    assert!(actions[1].can_automate);
}

#[tokio::test]
async fn blank_input_never_reaches_the_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(anthropic_reply(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let actions = extractor_for(&server).await.extract(" \n ").await.unwrap();
    assert!(actions.is_empty());
}

#[tokio::test]
async fn unparseable_model_output_is_empty_not_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(anthropic_reply(json!([
            {"type": "text", "text": "Sorry, I can't help with that."}
        ])))
        .mount(&server)
        .await;

    let actions = extractor_for(&server)
        .await
        .extract("something vague")
        .await
        .unwrap();
    assert!(actions.is_empty());
}

#[tokio::test]
async fn bad_credentials_surface_as_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/messages"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"error":{"message":"invalid api_key=sk-leaked-value"}}"#),
        )
        .mount(&server)
        .await;

    let err = extractor_for(&server)
        .await
        .extract("call mom")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::Auth { .. }));
    assert_eq!(err.provider(), "minimax");
    assert!(!err.to_string().contains("sk-leaked-value"));
}
