// Test module - relaxed lint rules
#![allow(clippy::indexing_slicing)]
#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(missing_docs)]

use genius::model::{ConnectivityKind, EndpointKind, Outcome, OutcomeKind, ProcessingStatus};
use genius::transport::RawOutcome;
use genius::ErrorCode;
use genius_fixtures::{
    enveloped, history_item, ok_enveloped, ok_json, scripted_client, ScriptedTransport,
    SubmissionBuilder,
};
use serde_json::{json, Value};

fn outcome_for(raw: RawOutcome) -> Outcome {
    scripted_client(ScriptedTransport::always(raw)).list_history()
}

fn success_value(outcome: Outcome) -> Value {
    match outcome {
        Outcome::Success(record) => record.into_value(),
        other => panic!("expected success, got {other:?}"),
    }
}

// =============================================================================
// Reference scenarios
// =============================================================================

#[test]
fn enveloped_report_is_unwrapped() {
    let outcome = outcome_for(ok_json(&json!({
        "reports": [{"status": "success", "repository": "r1"}]
    })));
    assert_eq!(
        success_value(outcome),
        json!({"status": "success", "repository": "r1"})
    );
}

#[test]
fn empty_reports_returns_outer_mapping() {
    let outcome = outcome_for(ok_json(&json!({"reports": []})));
    assert_eq!(success_value(outcome), json!({"reports": []}));
}

#[test]
fn connection_refused_is_connectivity_failure() {
    let outcome = outcome_for(RawOutcome::unreachable("connection refused"));
    assert_eq!(
        outcome,
        Outcome::ConnectivityFailure {
            kind: ConnectivityKind::Unreachable,
            message: "connection refused".into()
        }
    );
}

#[test]
fn server_error_with_html_body_is_protocol_failure() {
    let outcome = outcome_for(RawOutcome::response(500, "<html>error</html>"));
    assert_eq!(outcome, Outcome::ProtocolFailure { status: 500 });
}

#[test]
fn error_field_is_application_failure() {
    let outcome = outcome_for(ok_json(&json!({"error": "repo not found"})));
    assert_eq!(
        outcome,
        Outcome::ApplicationFailure {
            message: "repo not found".into()
        }
    );
}

#[test]
fn bare_list_is_returned_in_order() {
    let list = json!([
        {"name": "r1", "status": "success"},
        {"name": "r2", "status": "processing"}
    ]);
    let outcome = outcome_for(ok_json(&list));
    assert_eq!(success_value(outcome), list);
}

// =============================================================================
// Failure precedence
// =============================================================================

#[test]
fn non_success_status_beats_unparsable_body() {
    for status in [201, 204, 301, 400, 404, 502] {
        let outcome = outcome_for(RawOutcome::response(status, "definitely not json"));
        assert_eq!(outcome, Outcome::ProtocolFailure { status });
    }
}

#[test]
fn non_success_status_beats_error_field() {
    let outcome = outcome_for(RawOutcome::response(404, r#"{"error":"missing"}"#));
    assert_eq!(outcome, Outcome::ProtocolFailure { status: 404 });
}

#[test]
fn unparsable_success_body_is_decode_failure() {
    for body in ["", "<html>ok</html>", "{\"unterminated\": "] {
        let outcome = outcome_for(RawOutcome::response(200, body));
        assert_eq!(outcome.kind(), OutcomeKind::DecodeFailure, "body: {body:?}");
    }
}

#[test]
fn timeout_and_unclassified_are_connectivity_failures() {
    assert_eq!(
        outcome_for(RawOutcome::timed_out("deadline elapsed")).kind(),
        OutcomeKind::ConnectivityFailure
    );
    match outcome_for(RawOutcome::unclassified("tls handshake eof")) {
        Outcome::ConnectivityFailure { kind, message } => {
            assert_eq!(kind, ConnectivityKind::Unclassified);
            assert_eq!(message, "tls handshake eof");
        }
        other => panic!("expected connectivity failure, got {other:?}"),
    }
}

#[test]
fn error_inside_envelope_is_application_failure() {
    let outcome = outcome_for(ok_enveloped(
        SubmissionBuilder::new("r1").failed("clone failed").build(),
    ));
    assert_eq!(
        outcome,
        Outcome::ApplicationFailure {
            message: "clone failed".into()
        }
    );
}

// =============================================================================
// Typed operations
// =============================================================================

#[test]
fn submit_report_reads_enveloped_result() {
    let transport = ScriptedTransport::always(ok_enveloped(
        SubmissionBuilder::new("r1")
            .succeeded("outputs/r1/docs.md")
            .with_summary("A small tool.")
            .build(),
    ));
    let client = scripted_client(transport);
    let report = client.submit_report("https://github.com/example/r1").unwrap();
    assert_eq!(report.repository.as_deref(), Some("r1"));
    assert_eq!(report.status, Some(ProcessingStatus::Success));
    assert!(report.success);
    assert_eq!(report.documentation_path.as_deref(), Some("outputs/r1/docs.md"));
    assert_eq!(report.readme_summary.as_deref(), Some("A small tool."));
}

#[test]
fn submit_report_treats_null_success_as_not_finished() {
    let client = scripted_client(ScriptedTransport::always(ok_json(&json!({
        "reports": [{"repository": "r1", "status": "processing", "success": null}]
    }))));
    let report = client.submit_report("https://github.com/example/r1").unwrap();
    assert_eq!(report.repository.as_deref(), Some("r1"));
    assert_eq!(report.status, Some(ProcessingStatus::Processing));
    assert!(!report.success);
}

#[test]
fn submit_uses_submit_endpoint_payload_and_long_timeout() {
    let client = scripted_client(ScriptedTransport::always(ok_json(&json!({}))));
    client.submit_repository("https://github.com/example/r1");
    client.check_health();

    let requests = client_requests(&client);
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].kind, EndpointKind::SubmitJob);
    assert_eq!(
        Value::Object(requests[0].payload.clone()),
        json!({"repo_url": "https://github.com/example/r1"})
    );
    assert_eq!(requests[1].kind, EndpointKind::HealthCheck);
    assert!(requests[1].payload.is_empty());
    assert!(requests[1].timeout < requests[0].timeout);
}

#[test]
fn submit_report_surfaces_application_error_code() {
    let client = scripted_client(ScriptedTransport::always(ok_enveloped(
        json!({"error": "repo not found"}),
    )));
    let err = client.submit_report("https://github.com/example/missing").unwrap_err();
    assert_eq!(err.code, ErrorCode::Application);
    assert_eq!(err.message, "repo not found");
}

#[test]
fn history_accepts_list_and_items_shapes() {
    let items = json!([history_item("r1", "success"), history_item("r2", "processing")]);
    let client = scripted_client(ScriptedTransport::new([
        ok_json(&items),
        ok_json(&json!({"items": items})),
        ok_json(&enveloped(json!({"items": items}))),
        ok_json(&enveloped(items.clone())),
    ]));
    for _ in 0..4 {
        let history = client.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history.items[0].name.as_deref(), Some("r1"));
        assert_eq!(history.items[1].status, Some(ProcessingStatus::Processing));
        assert_eq!(history.items[1].documentation_path, None);
    }
}

#[test]
fn history_failure_maps_to_connectivity_code() {
    let client = scripted_client(ScriptedTransport::always(RawOutcome::unreachable(
        "connection refused",
    )));
    let err = client.history().unwrap_err();
    assert_eq!(err.code, ErrorCode::Connectivity);
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn independent_calls_share_no_state() {
    let client = scripted_client(ScriptedTransport::new([
        RawOutcome::response(500, ""),
        ok_json(&json!([])),
    ]));
    assert_eq!(client.list_history().kind(), OutcomeKind::ProtocolFailure);
    assert_eq!(client.list_history().kind(), OutcomeKind::Success);
}

#[test]
fn client_is_shareable_across_threads() {
    let client = std::sync::Arc::new(scripted_client(ScriptedTransport::always(ok_json(
        &json!([history_item("r1", "success")]),
    ))));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            std::thread::spawn(move || client.list_history().is_success())
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

fn client_requests(
    client: &genius::GeniusClient<ScriptedTransport>,
) -> Vec<genius_fixtures::RecordedRequest> {
    client.transport().requests()
}
