//! # Invalidation Request Normalization

use crate::cfn::CustomResourceEvent;
use crate::HookError;

/// Normalized cache-invalidation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationRequest {
    pub distribution_id: String,
    /// Ordered path patterns to invalidate. Defaults to `/*` when the event
    /// supplies none.
    pub paths: Vec<String>,
}

impl InvalidationRequest {
    pub fn from_event(event: &CustomResourceEvent) -> Result<Self, HookError> {
        let distribution_id = event
            .property(&["DistributionId"])
            .map(str::to_owned)
            .ok_or_else(|| {
                HookError::BadRequest("missing required property DistributionId".to_owned())
            })?;

        // `ObjectPath` is the legacy alias for the comma-separated list.
        let paths = event
            .property(&["InvalidationPaths", "ObjectPath"])
            .unwrap_or("/*")
            .split(',')
            .map(str::to_owned)
            .collect();

        Ok(Self {
            distribution_id,
            paths,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event_with_properties(properties: serde_json::Value) -> CustomResourceEvent {
        serde_json::from_value(json!({
            "RequestType": "Update",
            "ResponseURL": "https://cloudformation.example/response",
            "StackId": "arn:aws:cloudformation:us-east-1:123456789012:stack/site/abc",
            "RequestId": "req-2",
            "LogicalResourceId": "InvalidationCustomResource",
            "ResourceProperties": properties
        }))
        .expect("valid event")
    }

    #[test]
    fn missing_paths_default_to_wildcard() {
        let event = event_with_properties(json!({ "DistributionId": "E123ABC" }));
        let request = InvalidationRequest::from_event(&event).expect("request");
        assert_eq!(request.distribution_id, "E123ABC");
        assert_eq!(request.paths, vec!["/*".to_owned()]);
    }

    #[test]
    fn comma_separated_paths_keep_their_order() {
        let event = event_with_properties(json!({
            "DistributionId": "E123ABC",
            "InvalidationPaths": "/index.html,/resume.json,/static/*"
        }));
        let request = InvalidationRequest::from_event(&event).expect("request");
        assert_eq!(request.paths, vec!["/index.html", "/resume.json", "/static/*"]);
    }

    #[test]
    fn legacy_object_path_alias_is_honored() {
        let event = event_with_properties(json!({
            "DistributionId": "E123ABC",
            "ObjectPath": "/index.html"
        }));
        let request = InvalidationRequest::from_event(&event).expect("request");
        assert_eq!(request.paths, vec!["/index.html"]);
    }

    #[test]
    fn invalidation_paths_win_over_the_legacy_alias() {
        let event = event_with_properties(json!({
            "DistributionId": "E123ABC",
            "InvalidationPaths": "/a",
            "ObjectPath": "/b"
        }));
        let request = InvalidationRequest::from_event(&event).expect("request");
        assert_eq!(request.paths, vec!["/a"]);
    }

    #[test]
    fn missing_distribution_id_is_a_bad_request() {
        let event = event_with_properties(json!({ "InvalidationPaths": "/*" }));
        let error = InvalidationRequest::from_event(&event).expect_err("must fail");
        assert!(matches!(error, HookError::BadRequest(_)));
    }
}
