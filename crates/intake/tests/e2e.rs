// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests: real Groq and tracker adapters against mock HTTP
//! servers, driven through the gateway router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use intake_config::IntakeConfig;
use intake_engine::{ConversationEngine, InMemorySessionStore, PriorityMapper};
use intake_gateway::{router, GatewayState};
use intake_groq::GroqProvider;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config(groq: &MockServer, tracker: &MockServer) -> IntakeConfig {
    let toml = format!(
        r#"
[agent]
name = "helpdesk"

[groq]
api_key = "gsk-test"
base_url = "{groq}"
max_retries = 0

[tracker]
kind = "generic"

[tracker.generic]
base_url = "{tracker}"
api_token = "trk-secret"
"#,
        groq = groq.uri(),
        tracker = tracker.uri(),
    );
    intake_config::load_and_validate_str(&toml).unwrap()
}

fn gateway(config: &IntakeConfig) -> GatewayState {
    let model = Arc::new(GroqProvider::new(&config.groq).unwrap());
    let tracker = intake_tracker::build_tracker(&config.tracker).unwrap();
    let engine = ConversationEngine::new(model, tracker, PriorityMapper::from_config(config))
        .with_agent_name(config.agent.name.clone())
        .with_context_turns(config.groq.context_turns);
    let store = Arc::new(InMemorySessionStore::new(config.agent.max_sessions));
    GatewayState::new(Arc::new(engine), store)
}

fn completion(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "model": "llama-3.1-8b-instant",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150}
    }))
}

async fn call(state: &GatewayState, request: Request<Body>) -> (StatusCode, Value) {
    let response = router(state.clone()).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn say(state: &GatewayState, id: &str, content: &str) -> Value {
    let request = Request::post(format!("/v1/sessions/{id}/messages"))
        .header("content-type", "application/json")
        .body(Body::from(json!({ "content": content }).to_string()))
        .unwrap();
    let (status, body) = call(state, request).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

async fn open(state: &GatewayState) -> String {
    let (status, body) = call(
        state,
        Request::post("/v1/sessions").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["reply"].as_str().unwrap().contains("helpdesk"));
    body["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn ticket_is_filed_through_real_adapters() {
    let groq = MockServer::start().await;
    let tracker = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer gsk-test"))
        .respond_with(completion(
            "Here you go:\n```json\n{\"subject\": \"Printer jam\", \"description\": \"Office printer jams on every job\", \"priority\": 2}\n```",
        ))
        .expect(1)
        .mount(&groq)
        .await;

    Mock::given(method("POST"))
        .and(path("/tickets"))
        .and(header("authorization", "Bearer trk-secret"))
        .and(body_partial_json(json!({
            "subject": "Printer jam",
            "description": "Office printer jams on every job",
            "email": "alice@x.com",
            "priority": "Medium"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 981})))
        .expect(1)
        .mount(&tracker)
        .await;

    let state = gateway(&config(&groq, &tracker));
    let id = open(&state).await;

    say(&state, &id, "Alice").await;
    say(&state, &id, "alice@x.com").await;
    let confirm = say(&state, &id, "The office printer jams").await;
    assert_eq!(confirm["stage"], "confirm");
    assert!(confirm["reply"].as_str().unwrap().contains("Printer jam"));

    let done = say(&state, &id, "correct").await;
    assert_eq!(done["stage"], "done");
    assert_eq!(done["submission"]["identifier"], "981");
    assert!(done["reply"].as_str().unwrap().contains("981"));
}

#[tokio::test]
async fn groq_outage_still_reaches_confirmation() {
    let groq = MockServer::start().await;
    let tracker = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("over capacity"))
        .mount(&groq)
        .await;

    let state = gateway(&config(&groq, &tracker));
    let id = open(&state).await;
    say(&state, &id, "Bob").await;
    say(&state, &id, "bob@x.com").await;

    let problem = "VPN keeps disconnecting every hour";
    let confirm = say(&state, &id, problem).await;
    assert_eq!(confirm["stage"], "confirm");
    // The default subject is the problem text itself.
    assert!(confirm["reply"].as_str().unwrap().contains(problem));
    assert!(confirm["reply"].as_str().unwrap().contains("Medium"));
}

#[tokio::test]
async fn tracker_rejection_is_reported_to_user() {
    let groq = MockServer::start().await;
    let tracker = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(completion(r#"{"subject": "Laptop won't boot", "priority": 3}"#))
        .mount(&groq)
        .await;
    Mock::given(method("POST"))
        .and(path("/tickets"))
        .respond_with(
            ResponseTemplate::new(422).set_body_json(json!({"message": "priority is invalid"})),
        )
        .expect(1)
        .mount(&tracker)
        .await;

    let state = gateway(&config(&groq, &tracker));
    let id = open(&state).await;
    say(&state, &id, "Carol").await;
    say(&state, &id, "carol@x.com").await;
    say(&state, &id, "My laptop won't boot").await;

    let done = say(&state, &id, "yes").await;
    assert_eq!(done["stage"], "done");
    assert_eq!(done["submission"]["succeeded"], false);
    assert!(done["submission"]["identifier"].is_null());
    let reply = done["reply"].as_str().unwrap();
    assert!(reply.contains("priority is invalid"), "{reply}");

    let closed = say(&state, &id, "hello?").await;
    assert_eq!(closed["stage"], "done");
}
