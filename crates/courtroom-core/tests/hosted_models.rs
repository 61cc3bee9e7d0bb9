use courtroom_core::{CourtError, HostedModelClient, HttpPersonaSource, PersonaSource};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HostedModelClient {
    HostedModelClient::new(
        "hf-test",
        &format!("{}/v1", server.uri()),
        &format!("{}/hf-inference", server.uri()),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn stream_chat_concatenates_deltas() {
    let server = MockServer::start().await;
    let sse = concat!(
        "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\",\"content\":\"{ name: \"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\"Dale Hobbs,\"}}]}\n\n",
        "data: {\"choices\":[{\"delta\":{\"content\":\" age: 52 }\"}}]}\n\n",
        "data: [DONE]\n\n",
    );
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer hf-test"))
        .and(body_partial_json(json!({
            "model": "google/gemma-2-2b-it",
            "max_tokens": 500,
            "stream": true
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = client(&server)
        .stream_chat("google/gemma-2-2b-it", "draft a persona", 500)
        .await
        .unwrap();
    assert_eq!(text, "{ name: Dale Hobbs, age: 52 }");
}

#[tokio::test]
async fn chat_error_status_is_upstream_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .mount(&server)
        .await;

    let err = client(&server)
        .stream_chat("google/gemma-2-2b-it", "x", 500)
        .await
        .unwrap_err();
    assert!(matches!(err, CourtError::Upstream { status: 503, .. }));
}

#[tokio::test]
async fn text_to_image_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hf-inference/models/black-forest-labs/FLUX.1-dev"))
        .and(body_partial_json(json!({"inputs": "a portrait"})))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .mount(&server)
        .await;

    let bytes = client(&server)
        .text_to_image("black-forest-labs/FLUX.1-dev", "a portrait")
        .await
        .unwrap();
    assert_eq!(bytes, vec![1, 2, 3]);
}

#[tokio::test]
async fn http_persona_source_keeps_pinned_json_as_is() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ipfs/bafyA"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Alice",
            "age": "29",
            "occupation": "Nurse",
            "physical_description": "Red hair",
            "image_url": "http://x/a.png",
            "personality": "Warm",
            "details": {"children": "none", "vegetarian": true}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ipfs/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["not", "a", "persona"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/ipfs/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let source = HttpPersonaSource::new(Duration::from_secs(5)).unwrap();
    let persona = source
        .fetch_persona(&format!("{}/ipfs/bafyA", server.uri()))
        .await
        .unwrap();
    assert_eq!(persona["name"], "Alice");
    assert_eq!(persona["age"], "29");
    assert_eq!(persona["details"]["children"], "none");
    assert_eq!(persona["details"]["vegetarian"], true);

    assert!(source
        .fetch_persona(&format!("{}/ipfs/list", server.uri()))
        .await
        .is_err());

    assert!(source
        .fetch_persona(&format!("{}/ipfs/gone", server.uri()))
        .await
        .is_err());
}

#[tokio::test]
async fn persona_source_applies_its_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ipfs/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": "Slow"}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let source = HttpPersonaSource::new(Duration::from_millis(200)).unwrap();
    let err = source
        .fetch_persona(&format!("{}/ipfs/slow", server.uri()))
        .await
        .unwrap_err();
    assert!(matches!(err, CourtError::Http(ref e) if e.is_timeout()));
}
