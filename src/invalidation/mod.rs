//! # Cache Invalidation Hook
//!
//! Handler for `Custom::CloudFrontInvalidationFunction`: after new content
//! is published, submit one invalidation for the configured path patterns.
//! Success means the CDN accepted the submission; completion can take
//! minutes on the CDN side and is deliberately not polled, so deployments
//! are not held hostage to propagation time.

mod request;

pub use request::InvalidationRequest;

use crate::cdn::CdnClient;
use crate::cfn::{CfnAck, CustomResourceEvent, RequestKind, ResponseSender};
use crate::HookError;
use anyhow::Result;
use std::collections::HashMap;
use tracing::{error, info};
use uuid::Uuid;

/// Handle one invalidation invocation and acknowledge it exactly once.
pub async fn handle_event(
    event: &CustomResourceEvent,
    cdn: &dyn CdnClient,
    responder: &dyn ResponseSender,
) -> Result<()> {
    info!(
        "Cache invalidation {:?} for {}",
        event.request_type, event.logical_resource_id
    );

    // Invalidation is meaningless once the distribution is torn down.
    if event.request_type == RequestKind::Delete {
        return responder
            .send(&event.response_url, &CfnAck::success(event, HashMap::new()))
            .await;
    }

    match run_invalidation(event, cdn).await {
        Ok(()) => {
            responder
                .send(&event.response_url, &CfnAck::success(event, HashMap::new()))
                .await
        }
        Err(err) => {
            error!("Cache invalidation failed: {err}");
            responder
                .send(&event.response_url, &CfnAck::failed(event, err.to_string()))
                .await
        }
    }
}

async fn run_invalidation(
    event: &CustomResourceEvent,
    cdn: &dyn CdnClient,
) -> Result<(), HookError> {
    let request = InvalidationRequest::from_event(event)?;

    // The caller reference only needs to be unique within the
    // distribution's invalidation history; a random token satisfies that.
    let caller_reference = Uuid::new_v4().to_string();

    info!(
        "Submitting invalidation for distribution {} ({} paths)",
        request.distribution_id,
        request.paths.len()
    );

    cdn.submit_invalidation(&request.distribution_id, &request.paths, &caller_reference)
        .await
        .map_err(HookError::InvalidationSubmit)?;
    Ok(())
}
