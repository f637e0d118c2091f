//! Tests for payload submission and outcome classification

use serde_json::json;

use super::super::credentials::Credentials;
use super::super::outcome::{SubmitOutcome, submit_payload};
use super::{MockTransport, create_test_payload};
use crate::constants::messages;

#[tokio::test]
async fn test_created_count_from_response_body() {
    let transport = MockTransport::responding(201, Some(json!({"created": 3})));
    let payload = create_test_payload(5);

    let outcome = submit_payload(&transport, &payload, &Credentials::default()).await;

    assert_eq!(outcome, SubmitOutcome::Created { created: 3 });
    assert_eq!(
        outcome.success_message().as_deref(),
        Some("Success: created 3 records")
    );
    assert!(outcome.messages().is_empty());
}

#[tokio::test]
async fn test_created_count_falls_back_to_payload_length() {
    let transport = MockTransport::responding(200, None);
    let payload = create_test_payload(4);

    let outcome = submit_payload(&transport, &payload, &Credentials::default()).await;

    assert!(outcome.is_success());
    assert_eq!(
        outcome.success_message().as_deref(),
        Some("Success: created 4 records")
    );
}

#[tokio::test]
async fn test_unusable_created_count_falls_back_to_payload_length() {
    for body in [json!({"created": -2}), json!({"created": "3"})] {
        let transport = MockTransport::responding(201, Some(body));
        let payload = create_test_payload(2);

        let outcome = submit_payload(&transport, &payload, &Credentials::default()).await;

        assert_eq!(outcome, SubmitOutcome::Created { created: 2 });
    }
}

#[tokio::test]
async fn test_rejection_is_interpreted() {
    let body = json!({"errors": [{"line": 5, "errors": ["Invalid calldate format"]}]});
    let transport = MockTransport::responding(400, Some(body));
    let payload = create_test_payload(1);

    let outcome = submit_payload(&transport, &payload, &Credentials::default()).await;

    match &outcome {
        SubmitOutcome::Rejected { status, messages } => {
            assert_eq!(*status, 400);
            assert_eq!(messages[1], "Row 5: Invalid calldate format");
        }
        other => panic!("Expected rejection, got {:?}", other),
    }
    assert!(outcome.success_message().is_none());
}

#[tokio::test]
async fn test_transport_failure_yields_network_guidance() {
    let transport = MockTransport::failing("connection refused");
    let payload = create_test_payload(2);

    let outcome = submit_payload(&transport, &payload, &Credentials::default()).await;

    let messages_out = outcome.messages();
    assert_eq!(messages_out.len(), 3);
    assert!(messages_out[0].starts_with("Network error: "));
    assert!(messages_out[0].contains("connection refused"));
    assert_eq!(messages_out[1], messages::NETWORK_CONNECTIVITY);
    assert_eq!(messages_out[2], messages::NETWORK_INSPECT);
}

#[tokio::test]
async fn test_payload_and_credentials_reach_transport() {
    let transport = MockTransport::responding(201, Some(json!({"created": 2})));
    let payload = create_test_payload(2);
    let credentials = Credentials::new(Some("tok".to_string()), Some("csrf".to_string()));

    submit_payload(&transport, &payload, &credentials).await;

    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, payload);
    assert_eq!(sent[0].1, credentials);
}

#[test]
fn test_payload_wire_shape() {
    let payload = create_test_payload(1);
    let value = serde_json::to_value(&payload).unwrap();

    assert_eq!(
        value,
        json!({
            "records": [{
                "calldate": "2023-01-31T12:34:56.000Z",
                "src": "998901234567",
                "dst": "712345",
                "duration": 60,
                "billsec": 55,
                "disposition": "ANSWERED"
            }]
        })
    );
}
