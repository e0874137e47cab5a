//! # Error Taxonomy
//!
//! Failure classes for the deployment hooks. CloudFormation only consumes a
//! binary outcome, so every variant collapses to a single FAILED
//! acknowledgment at the handler boundary; the variants exist so logs name
//! the stage that failed.

use thiserror::Error;

/// Classified hook failure.
#[derive(Debug, Error)]
pub enum HookError {
    /// Source object missing or unreadable.
    #[error("failed to fetch source artifact: {0:#}")]
    Fetch(anyhow::Error),

    /// Archive unreadable or corrupt. A subfolder that matches no entries is
    /// not an error; it copies nothing.
    #[error("failed to extract artifact archive: {0:#}")]
    Extract(anyhow::Error),

    /// Upload of an extracted file to the destination bucket failed.
    #[error("failed to copy artifacts to destination: {0:#}")]
    Copy(anyhow::Error),

    /// The CDN rejected the invalidation submission.
    #[error("failed to submit cache invalidation: {0:#}")]
    InvalidationSubmit(anyhow::Error),

    /// A required wire property was absent from the event.
    #[error("bad request: {0}")]
    BadRequest(String),
}
