//! Test invoker against a wiremock agent endpoint.

use chrono::Utc;
use friday::agents::{AgentTestInvoker, TestOutcome};
use friday::types::{Agent, AgentIcon};
use friday::utils::InvokerConfig;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn agent_at(url: String) -> Agent {
    Agent {
        id: "agent-1".to_string(),
        name: "Echo".to_string(),
        slug: "echo".to_string(),
        url,
        description: "Echoes commands".to_string(),
        icon: AgentIcon::MessageSquare,
        use_cases: vec![],
        trigger_keywords: vec![],
        tools: vec![],
        enabled: true,
        is_public: true,
        version: None,
        author: None,
        created_at: Some(Utc::now()),
        updated_at: None,
    }
}

#[tokio::test]
async fn test_sends_command_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/agent"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "command": "ping",
            "context": "Test from dashboard"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let invoker = AgentTestInvoker::new();
    let outcome = invoker
        .run(&agent_at(format!("{}/agent", mock_server.uri())), "ping")
        .await;

    assert_eq!(
        outcome,
        TestOutcome::Json {
            status: 200,
            body: json!({ "ok": true })
        }
    );
    assert_eq!(outcome.render(), "{\n  \"ok\": true\n}");
}

#[tokio::test]
async fn test_error_status_with_json_body_is_rendered() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "agent crashed" })),
        )
        .mount(&mock_server)
        .await;

    let invoker = AgentTestInvoker::new();
    let rendered = invoker
        .invoke(&agent_at(mock_server.uri()), "do something")
        .await;

    assert!(rendered.contains("agent crashed"));
}

#[tokio::test]
async fn test_non_json_body_is_raw_text() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain hello"))
        .mount(&mock_server)
        .await;

    let invoker = AgentTestInvoker::new();
    let outcome = invoker.run(&agent_at(mock_server.uri()), "hi").await;

    assert_eq!(
        outcome,
        TestOutcome::Text {
            status: 200,
            body: "plain hello".to_string()
        }
    );
    assert_eq!(outcome.render(), "plain hello");
}

#[tokio::test]
async fn test_empty_body_renders_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let invoker = AgentTestInvoker::new();
    let rendered = invoker.invoke(&agent_at(mock_server.uri()), "hi").await;

    assert_eq!(rendered, "Error: empty response (HTTP 204)");
}

#[tokio::test]
async fn test_unreachable_endpoint_renders_error() {
    // Nothing listens on port 9 (discard) in the test environment
    let invoker = AgentTestInvoker::new();
    let rendered = invoker
        .invoke(&agent_at("http://127.0.0.1:9/agent".to_string()), "hi")
        .await;

    assert!(rendered.starts_with("Error: "));
}

#[tokio::test]
async fn test_timeout_from_config() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "late": true }))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let invoker = AgentTestInvoker::from_config(&InvokerConfig {
        timeout: Some(Duration::from_millis(100)),
    })
    .unwrap();
    let outcome = invoker.run(&agent_at(mock_server.uri()), "hi").await;

    assert!(matches!(outcome, TestOutcome::Failed(_)));
}
