//! End-to-end tests for the cache invalidation hook, driven through the
//! recording CDN double and the recording response sender.

use serde_json::json;
use static_site_hooks::cdn::RecordingCdn;
use static_site_hooks::cfn::{AckStatus, CustomResourceEvent, RecordingResponder};
use static_site_hooks::invalidation;

fn invalidation_event(request_type: &str, properties: serde_json::Value) -> CustomResourceEvent {
    serde_json::from_value(json!({
        "RequestType": request_type,
        "ResponseURL": "https://cloudformation.example/response",
        "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/site/abc",
        "RequestId": "req-invalidate",
        "LogicalResourceId": "InvalidationCustomResource",
        "ResourceProperties": properties
    }))
    .expect("valid event")
}

#[tokio::test]
async fn delete_makes_no_cdn_call_and_succeeds() {
    let cdn = RecordingCdn::new();
    let responder = RecordingResponder::new();
    let event = invalidation_event("Delete", json!({ "DistributionId": "E123ABC" }));

    invalidation::handle_event(&event, &cdn, &responder)
        .await
        .expect("handler");

    assert!(cdn.calls().is_empty());
    let acks = responder.acks();
    assert_eq!(acks.len(), 1);
    assert_eq!(acks[0].1.status, AckStatus::Success);
}

#[tokio::test]
async fn missing_paths_invalidate_everything() {
    let cdn = RecordingCdn::new();
    let responder = RecordingResponder::new();
    let event = invalidation_event("Create", json!({ "DistributionId": "E123ABC" }));

    invalidation::handle_event(&event, &cdn, &responder)
        .await
        .expect("handler");

    let calls = cdn.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].distribution_id, "E123ABC");
    assert_eq!(calls[0].paths, vec!["/*".to_owned()]);
    assert_eq!(responder.acks()[0].1.status, AckStatus::Success);
    assert!(responder.acks()[0].1.data.is_empty());
}

#[tokio::test]
async fn explicit_paths_are_submitted_in_order() {
    let cdn = RecordingCdn::new();
    let responder = RecordingResponder::new();
    let event = invalidation_event(
        "Update",
        json!({
            "DistributionId": "E123ABC",
            "InvalidationPaths": "/index.html,/resume.json"
        }),
    );

    invalidation::handle_event(&event, &cdn, &responder)
        .await
        .expect("handler");

    let calls = cdn.calls();
    assert_eq!(calls[0].paths, vec!["/index.html", "/resume.json"]);
}

#[tokio::test]
async fn rejected_submission_yields_a_single_failed_ack() {
    let cdn = RecordingCdn::new();
    cdn.reject_submissions();
    let responder = RecordingResponder::new();
    let event = invalidation_event("Create", json!({ "DistributionId": "E-GONE" }));

    invalidation::handle_event(&event, &cdn, &responder)
        .await
        .expect("handler");

    assert!(cdn.calls().is_empty());
    let acks = responder.acks();
    assert_eq!(acks.len(), 1);
    assert_eq!(acks[0].1.status, AckStatus::Failed);
    assert!(acks[0].1.reason.contains("invalidation"));
}

#[tokio::test]
async fn caller_references_are_unique_per_invocation() {
    let cdn = RecordingCdn::new();
    let responder = RecordingResponder::new();
    let event = invalidation_event("Update", json!({ "DistributionId": "E123ABC" }));

    invalidation::handle_event(&event, &cdn, &responder)
        .await
        .expect("first");
    invalidation::handle_event(&event, &cdn, &responder)
        .await
        .expect("second");

    let calls = cdn.calls();
    assert_eq!(calls.len(), 2);
    assert_ne!(calls[0].caller_reference, calls[1].caller_reference);
}

#[tokio::test]
async fn missing_distribution_id_fails_without_a_cdn_call() {
    let cdn = RecordingCdn::new();
    let responder = RecordingResponder::new();
    let event = invalidation_event("Create", json!({ "InvalidationPaths": "/*" }));

    invalidation::handle_event(&event, &cdn, &responder)
        .await
        .expect("handler");

    assert!(cdn.calls().is_empty());
    assert_eq!(responder.acks()[0].1.status, AckStatus::Failed);
}
