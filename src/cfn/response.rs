//! # Acknowledgment Delivery
//!
//! cfnresponse-style delivery: serialize the acknowledgment and PUT it to the
//! event's pre-signed `ResponseURL`. The pre-signed S3 URL rejects requests
//! carrying a content type, so the header is explicitly blanked.

use super::CfnAck;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use tracing::info;

/// Delivery seam for acknowledgments, swappable for a recording double in
/// tests so handler flows can be asserted without a network.
#[async_trait]
pub trait ResponseSender: Send + Sync {
    async fn send(&self, response_url: &str, ack: &CfnAck) -> Result<()>;
}

/// Production sender: HTTP PUT to the pre-signed URL.
#[derive(Debug, Clone)]
pub struct HttpResponder {
    client: reqwest::Client,
}

impl HttpResponder {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client for CloudFormation responses")?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ResponseSender for HttpResponder {
    async fn send(&self, response_url: &str, ack: &CfnAck) -> Result<()> {
        let body =
            serde_json::to_vec(ack).context("Failed to serialize CloudFormation response")?;

        info!(
            "Sending {:?} acknowledgment for {} to CloudFormation",
            ack.status, ack.logical_resource_id
        );

        let response = self
            .client
            .put(response_url)
            .header(reqwest::header::CONTENT_TYPE, "")
            .body(body)
            .send()
            .await
            .context("Failed to deliver CloudFormation response")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "CloudFormation response endpoint returned HTTP {}",
                response.status().as_u16()
            );
        }
        Ok(())
    }
}

/// Test double that records acknowledgments instead of delivering them.
#[derive(Debug, Default)]
pub struct RecordingResponder {
    acks: Mutex<Vec<(String, CfnAck)>>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(response_url, ack)` pair sent so far.
    pub fn acks(&self) -> Vec<(String, CfnAck)> {
        self.acks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl ResponseSender for RecordingResponder {
    async fn send(&self, response_url: &str, ack: &CfnAck) -> Result<()> {
        self.acks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((response_url.to_owned(), ack.clone()));
        Ok(())
    }
}
