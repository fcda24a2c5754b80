use serde_json::json;
use thoughtdesk::conversation::{ASSISTANT_SYSTEM_PROMPT, Assistant};
use thoughtdesk::llm::{ChatMessage, create_provider};
use thoughtdesk::structured::{AgendaKind, ReplyActionKind};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn assistant_turn_over_openai_compatible_wire() {
    let server = MockServer::start().await;
    let content = "<think>They want a sync tomorrow.</think>Here's what I heard: marketing sync tomorrow at 2. Done.\n```json\n{\"actions\":[{\"type\":\"calendar\",\"title\":\"Marketing Team Sync\",\"description\":\"Tomorrow at 2:00 PM\",\"status\":\"scheduled\"}],\"agendaItems\":[{\"time\":\"2:00 PM\",\"title\":\"Marketing Sync\",\"type\":\"meeting\",\"duration\":\"30 min\"}]}\n```";

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(json!({
            "model": "MiniMax-M2",
            "messages": [
                {"role": "system", "content": ASSISTANT_SYSTEM_PROMPT},
                {"role": "user", "content": "sync with marketing tomorrow at 2"}
            ],
            "temperature": 0.7
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": content}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider =
        create_provider("minimax-openai", Some("test-key"), Some(&server.uri()), 10).unwrap();
    let reply = Assistant::new(provider, "MiniMax-M2")
        .respond(&[ChatMessage::user("sync with marketing tomorrow at 2")])
        .await
        .unwrap();

    assert_eq!(
        reply.reply_text,
        "Here's what I heard: marketing sync tomorrow at 2. Done."
    );
    let structured = reply.structured.unwrap();
    assert_eq!(structured.actions()[0].kind, ReplyActionKind::Calendar);
    assert_eq!(structured.agenda_items()[0].kind, AgendaKind::Meeting);
}

#[tokio::test]
async fn server_error_propagates_with_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let provider = create_provider("openai", Some("test-key"), Some(&server.uri()), 10).unwrap();
    let err = Assistant::new(provider, "gpt-4o-mini")
        .respond(&[ChatMessage::user("hi")])
        .await
        .unwrap_err();

    assert!(matches!(err, thoughtdesk::LlmError::Api { status: 503, .. }));
}
