//! # Runtime Initialization
//!
//! Shared startup for both hook binaries: tracing subscriber and AWS SDK
//! configuration.

use aws_config::{BehaviorVersion, SdkConfig};
use tracing::info;

/// Install the tracing subscriber. `RUST_LOG` wins; the default keeps this
/// crate at info.
pub fn init_telemetry() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "static_site_hooks=info".into()),
        )
        .init();
}

/// Load AWS SDK configuration from the Lambda environment.
///
/// `AWS_ENDPOINT_URL` overrides the endpoint so the hooks can be pointed at
/// a local S3/CloudFront stand-in during development.
pub async fn load_sdk_config() -> SdkConfig {
    let mut builder = aws_config::defaults(BehaviorVersion::latest());

    if let Ok(endpoint) = std::env::var("AWS_ENDPOINT_URL") {
        info!("Routing AWS requests to endpoint override {}", endpoint);
        builder = builder.endpoint_url(&endpoint);
    }

    builder.load().await
}
