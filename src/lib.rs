//! # Static Site Hooks
//!
//! CloudFormation custom-resource handlers backing a static-website stack:
//!
//! 1. **Artifact sync** (`Custom::StaticCopy`) - downloads a build-artifact
//!    zip from S3, extracts it (optionally filtered to a subfolder prefix),
//!    and syncs the tree to the website bucket with metadata-replace
//!    semantics.
//! 2. **Cache invalidation** (`Custom::CloudFrontInvalidationFunction`) -
//!    submits a CloudFront invalidation after new content is published.
//!
//! Each handler is a one-shot Lambda invocation: CloudFormation supplies the
//! event, the handler performs its side effects and delivers exactly one
//! SUCCESS/FAILED acknowledgment to the event's pre-signed `ResponseURL`.
//! Retry and timeout policy belong to CloudFormation, not to the handlers;
//! any failure is caught at the handler boundary, logged in full, and
//! collapsed to a single FAILED acknowledgment.

pub mod cdn;
pub mod cfn;
pub mod invalidation;
pub mod runtime;
pub mod store;
pub mod sync;

mod error;

pub use error::HookError;
