//! # CDN Seam
//!
//! The invalidation hook talks to the CDN through this trait so the workflow
//! can be exercised against a recording double. Success means the CDN
//! accepted the submission; invalidation completion is asynchronous on the
//! CDN side and is never polled.

mod cloudfront;
mod recording;

pub use cloudfront::CloudFrontCdn;
pub use recording::{InvalidationCall, RecordingCdn};

use anyhow::Result;
use async_trait::async_trait;

/// CDN operations the invalidation hook depends on.
#[async_trait]
pub trait CdnClient: Send + Sync {
    /// Submit one invalidation for `paths` against the distribution.
    /// `caller_reference` must be unique within the distribution's
    /// invalidation history.
    async fn submit_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<()>;
}
