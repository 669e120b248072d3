use runpad::execution::{ExecError, ExecuteRequest, Executor, PistonClient};
use runpad::language::Language;
use runpad::runner::{run_once, EXECUTION_FAILED, NO_OUTPUT};
use runpad::session::{Action, SessionState};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> PistonClient {
    PistonClient::with_client(reqwest::Client::new(), format!("{}/api/v2/piston/", server.uri()))
}

fn ready_state(language: Language, source: &str) -> SessionState {
    SessionState::default()
        .reduce(Action::SetLanguage(language))
        .reduce(Action::SetSourceText(source.to_string()))
        .reduce(Action::MarkEditorReady)
}

#[tokio::test]
async fn posts_source_with_runtime_and_records_output() {
    let server = MockServer::start().await;
    let source = "const a = [1, 2];\nconsole.log(a.length);";
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .and(body_json(json!({
            "language": "javascript",
            "version": "18.15.0",
            "files": [{ "content": source }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "language": "javascript",
            "version": "18.15.0",
            "run": {
                "stdout": "Hello World!\n",
                "stderr": "",
                "output": "Hello World!\n",
                "code": 0,
                "signal": null
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let report = run_once(&client_for(&server), &ready_state(Language::JavaScript, source))
        .await
        .unwrap();
    assert_eq!(report.state.output_text, "Hello World!\n");
    assert!(!report.state.is_running);
    assert!(report.notification.is_none());
}

#[tokio::test]
async fn missing_run_output_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "run": { "code": 0 } })))
        .mount(&server)
        .await;

    let report = run_once(&client_for(&server), &ready_state(Language::Python, "pass"))
        .await
        .unwrap();
    assert_eq!(report.state.output_text, NO_OUTPUT);

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "language": "python" })))
        .mount(&server)
        .await;
    let report = run_once(&client_for(&server), &ready_state(Language::Python, "pass"))
        .await
        .unwrap();
    assert_eq!(report.state.output_text, "No output");
}

#[tokio::test]
async fn unexpected_response_shapes_fall_back_to_output_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "run": { "output": "hi\n", "code": "0" },
            "version": 3
        })))
        .mount(&server)
        .await;

    let report = run_once(&client_for(&server), &ready_state(Language::Python, "print('hi')"))
        .await
        .unwrap();
    assert_eq!(report.state.output_text, "hi\n");
    assert!(report.notification.is_none());

    server.reset().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "run": "oops" })))
        .mount(&server)
        .await;
    let report = run_once(&client_for(&server), &ready_state(Language::Python, "pass"))
        .await
        .unwrap();
    assert_eq!(report.state.output_text, NO_OUTPUT);
    assert!(report.notification.is_none());
}

#[tokio::test]
async fn network_failure_notifies_and_resets() {
    // Nothing listens on the discard port.
    let client =
        PistonClient::with_client(reqwest::Client::new(), "http://127.0.0.1:9/api/v2/piston");
    let report = run_once(&client, &ready_state(Language::Java, "class Main {}"))
        .await
        .unwrap();
    assert_eq!(report.state.output_text, EXECUTION_FAILED);
    assert!(!report.state.is_running);
    let note = report.notification.expect("network failure notifies");
    assert_eq!(note.title, "Error executing code");
    assert!(note.description.starts_with("Network error"), "{}", note.description);
}

#[tokio::test]
async fn http_status_carries_service_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "java-15.0.2 runtime is unknown" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .execute(&ExecuteRequest::new(Language::Java, "class Main {}"))
        .await
        .unwrap_err();
    match &err {
        ExecError::HttpStatus { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message.as_deref(), Some("java-15.0.2 runtime is unknown"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let report = run_once(&client, &ready_state(Language::Java, "class Main {}"))
        .await
        .unwrap();
    assert_eq!(report.state.output_text, "Error executing code");
    assert_eq!(
        report.notification.unwrap().description,
        "Request failed with status code 400: java-15.0.2 runtime is unknown"
    );
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v2/piston/execute"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>bad gateway</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .execute(&ExecuteRequest::new(Language::Python, "print(1)"))
        .await
        .unwrap_err();
    assert!(matches!(err, ExecError::Parse(_)));
}

#[tokio::test]
async fn lists_runtimes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v2/piston/runtimes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "language": "python", "version": "3.10.0", "aliases": ["py", "py3"] },
            {
                "language": "javascript",
                "version": "18.15.0",
                "aliases": ["node-javascript", "js"],
                "runtime": "node"
            }
        ])))
        .mount(&server)
        .await;

    let runtimes = client_for(&server).runtimes().await.unwrap();
    assert_eq!(runtimes.len(), 2);
    assert_eq!(runtimes[0].aliases, vec!["py", "py3"]);
    assert_eq!(runtimes[1].runtime.as_deref(), Some("node"));
}

#[tokio::test]
async fn editor_not_ready_never_reaches_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let state = SessionState::default();
    assert!(run_once(&client_for(&server), &state).await.is_err());
}
