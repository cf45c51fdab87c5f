// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracker selection from configuration.

use intake_config::load_config_from_str;
use intake_core::{AdapterType, TicketRequest};
use intake_tracker::build_tracker;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn builds_tracker_named_after_kind() {
    let config = load_config_from_str(
        r#"
[tracker]
kind = "jira"

[tracker.jira]
base_url = "https://example.atlassian.net"
project_key = "HELP"
email = "bot@example.com"
api_token = "tok"
"#,
    )
    .unwrap();

    let tracker = build_tracker(&config.tracker).unwrap();
    assert_eq!(tracker.name(), "jira");
    assert_eq!(tracker.adapter_type(), AdapterType::Tracker);
}

#[test]
fn missing_settings_are_config_errors() {
    let config = load_config_from_str("[tracker]\nkind = \"azure_devops\"\n").unwrap();
    let err = match build_tracker(&config.tracker) {
        Ok(_) => panic!("azure_devops without organization should fail"),
        Err(e) => e,
    };
    assert!(matches!(err, intake_core::IntakeError::Config(_)), "got: {err}");
}

#[tokio::test]
async fn configured_generic_tracker_files_ticket() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/tickets"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"ticket_id": "T-7"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = load_config_from_str(&format!(
        "[tracker.generic]\nbase_url = \"{}\"\napi_token = \"t\"\n",
        server.uri()
    ))
    .unwrap();
    let tracker = build_tracker(&config.tracker).unwrap();

    let id = tracker
        .create_ticket(&TicketRequest {
            subject: "Printer jam".into(),
            description: "Printer is jammed".into(),
            contact_email: "alice@x.com".into(),
            priority_label: "Medium".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, "T-7");
}
