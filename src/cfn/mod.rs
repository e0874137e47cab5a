//! # CloudFormation Custom Resource Envelope
//!
//! Request/response contract for Lambda-backed custom resources.
//! CloudFormation delivers the event through the Lambda invocation, but it
//! consumes the result via an HTTP PUT to the event's pre-signed
//! `ResponseURL` - the Lambda return value is ignored. This module holds the
//! event deserialization, the acknowledgment body, and the sender that
//! delivers it.

mod response;

pub use response::{HttpResponder, RecordingResponder, ResponseSender};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Lifecycle signal carried on every custom-resource event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum RequestKind {
    Create,
    Update,
    Delete,
}

/// Custom-resource request as delivered by CloudFormation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CustomResourceEvent {
    pub request_type: RequestKind,
    #[serde(rename = "ResponseURL")]
    pub response_url: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    /// Present on Update/Delete; absent on Create.
    #[serde(default)]
    pub physical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: serde_json::Map<String, serde_json::Value>,
}

impl CustomResourceEvent {
    /// First string-valued property among `keys`, in precedence order.
    ///
    /// Legacy templates used alternate property names; callers resolve those
    /// aliases by listing the current name first.
    pub fn property(&self, keys: &[&str]) -> Option<&str> {
        keys.iter()
            .find_map(|key| self.resource_properties.get(*key))
            .and_then(serde_json::Value::as_str)
    }
}

/// Acknowledgment outcome consumed by CloudFormation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AckStatus {
    Success,
    Failed,
}

/// Acknowledgment body PUT to the event's `ResponseURL`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CfnAck {
    pub status: AckStatus,
    pub reason: String,
    pub physical_resource_id: String,
    pub stack_id: String,
    pub request_id: String,
    pub logical_resource_id: String,
    pub data: HashMap<String, String>,
}

impl CfnAck {
    /// SUCCESS acknowledgment carrying the hook's data map.
    pub fn success(event: &CustomResourceEvent, data: HashMap<String, String>) -> Self {
        Self::build(event, AckStatus::Success, "ok".to_owned(), data)
    }

    /// FAILED acknowledgment. `reason` surfaces the full error detail in the
    /// stack event log; no finer-grained error code is exposed.
    pub fn failed(event: &CustomResourceEvent, reason: String) -> Self {
        Self::build(event, AckStatus::Failed, reason, HashMap::new())
    }

    fn build(
        event: &CustomResourceEvent,
        status: AckStatus,
        reason: String,
        data: HashMap<String, String>,
    ) -> Self {
        Self {
            status,
            reason,
            // A fresh token per acknowledgment, matching the reference
            // handlers. Uniqueness within the stack is all CloudFormation
            // needs here.
            physical_resource_id: Uuid::new_v4().to_string(),
            stack_id: event.stack_id.clone(),
            request_id: event.request_id.clone(),
            logical_resource_id: event.logical_resource_id.clone(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_event(request_type: &str) -> CustomResourceEvent {
        serde_json::from_value(json!({
            "RequestType": request_type,
            "ResponseURL": "https://cloudformation.example/response",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/site/abc",
            "RequestId": "req-1",
            "LogicalResourceId": "CopyCustomResource",
            "ResourceProperties": {
                "DestBucket": "site-bucket",
                "SourceBucket": "artifact-bucket"
            }
        }))
        .expect("valid event")
    }

    #[test]
    fn deserializes_request_kinds() {
        assert_eq!(sample_event("Create").request_type, RequestKind::Create);
        assert_eq!(sample_event("Update").request_type, RequestKind::Update);
        assert_eq!(sample_event("Delete").request_type, RequestKind::Delete);
    }

    #[test]
    fn property_lookup_respects_precedence_order() {
        let event = sample_event("Create");
        assert_eq!(event.property(&["DestBucket"]), Some("site-bucket"));
        assert_eq!(
            event.property(&["MissingName", "SourceBucket"]),
            Some("artifact-bucket")
        );
        assert_eq!(event.property(&["MissingName"]), None);
    }

    #[test]
    fn ack_status_uses_cloudformation_wire_form() {
        assert_eq!(
            serde_json::to_string(&AckStatus::Success).expect("serialize"),
            "\"SUCCESS\""
        );
        assert_eq!(
            serde_json::to_string(&AckStatus::Failed).expect("serialize"),
            "\"FAILED\""
        );
    }

    #[test]
    fn success_ack_echoes_event_identifiers() {
        let event = sample_event("Create");
        let mut data = HashMap::new();
        data.insert("DestPath".to_owned(), "web".to_owned());

        let ack = CfnAck::success(&event, data);
        assert_eq!(ack.status, AckStatus::Success);
        assert_eq!(ack.stack_id, event.stack_id);
        assert_eq!(ack.request_id, event.request_id);
        assert_eq!(ack.logical_resource_id, event.logical_resource_id);
        assert_eq!(ack.data.get("DestPath").map(String::as_str), Some("web"));
        assert!(!ack.physical_resource_id.is_empty());
    }

    #[test]
    fn failed_ack_carries_reason_and_empty_data() {
        let event = sample_event("Update");
        let ack = CfnAck::failed(&event, "fetch failure".to_owned());
        assert_eq!(ack.status, AckStatus::Failed);
        assert_eq!(ack.reason, "fetch failure");
        assert!(ack.data.is_empty());
    }
}
