//! # CloudFront Client

use super::CdnClient;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_cloudfront::types::{InvalidationBatch, Paths};
use aws_sdk_cloudfront::Client as CloudFrontClient;
use tracing::info;

/// CloudFront implementation of [`CdnClient`].
pub struct CloudFrontCdn {
    client: CloudFrontClient,
}

impl std::fmt::Debug for CloudFrontCdn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudFrontCdn").finish_non_exhaustive()
    }
}

impl CloudFrontCdn {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: CloudFrontClient::new(sdk_config),
        }
    }
}

#[async_trait]
impl CdnClient for CloudFrontCdn {
    async fn submit_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<()> {
        let quantity =
            i32::try_from(paths.len()).context("Invalidation path list is too large")?;

        let batch = InvalidationBatch::builder()
            .paths(
                Paths::builder()
                    .quantity(quantity)
                    .set_items(Some(paths.to_vec()))
                    .build()
                    .context("Failed to build invalidation path list")?,
            )
            .caller_reference(caller_reference)
            .build()
            .context("Failed to build invalidation batch")?;

        self.client
            .create_invalidation()
            .distribution_id(distribution_id)
            .invalidation_batch(batch)
            .send()
            .await
            .context(format!(
                "CloudFront rejected invalidation for distribution {distribution_id}"
            ))?;

        info!(
            "CloudFront accepted invalidation for distribution {} ({} paths)",
            distribution_id,
            paths.len()
        );
        Ok(())
    }
}
