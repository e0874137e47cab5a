//! # Recording CDN Double

use super::CdnClient;
use anyhow::{bail, Result};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

/// One recorded invalidation submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationCall {
    pub distribution_id: String,
    pub paths: Vec<String>,
    pub caller_reference: String,
}

/// Test double that records submissions instead of calling CloudFront.
#[derive(Debug, Default)]
pub struct RecordingCdn {
    calls: Mutex<Vec<InvalidationCall>>,
    reject: AtomicBool,
}

impl RecordingCdn {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent submissions fail, simulating a CDN rejection such as
    /// an unknown distribution id.
    pub fn reject_submissions(&self) {
        self.reject.store(true, Ordering::SeqCst);
    }

    /// Every submission recorded so far.
    pub fn calls(&self) -> Vec<InvalidationCall> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CdnClient for RecordingCdn {
    async fn submit_invalidation(
        &self,
        distribution_id: &str,
        paths: &[String],
        caller_reference: &str,
    ) -> Result<()> {
        if self.reject.load(Ordering::SeqCst) {
            bail!("no such distribution: {distribution_id}");
        }
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(InvalidationCall {
                distribution_id: distribution_id.to_owned(),
                paths: paths.to_vec(),
                caller_reference: caller_reference.to_owned(),
            });
        Ok(())
    }
}
