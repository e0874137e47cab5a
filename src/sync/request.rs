//! # Sync Request Normalization
//!
//! The wire properties carry legacy aliases from older stack templates. They
//! are resolved once, here, into a normalized request; the workflow body
//! never consults raw properties. Precedence:
//!
//! | field         | primary        | legacy fallback             |
//! |---------------|----------------|-----------------------------|
//! | source bucket | `SourceBucket` | `TestActualBucket`          |
//! | source key    | `SourceKey`    | `AdditionalArtifactsFolder` |
//! | skip cleanup  | `SkipCleanup`  | `Cleanup` (inverted sense)  |

use crate::cfn::CustomResourceEvent;
use crate::HookError;

/// Normalized artifact-sync request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRequest {
    pub dest_bucket: String,
    pub source_bucket: String,
    pub source_key: String,
    /// Path prefix inside the archive to extract and copy from. Empty, `.`
    /// or `/` selects the whole archive. Matching is a raw string prefix,
    /// not segment-aligned: `a` also selects `ab/file.txt`.
    pub subfolder: String,
    /// Parsed for template compatibility. The copy policy is always
    /// metadata-replace and never deletes stale destination objects, so this
    /// flag does not alter the copy itself.
    pub skip_cleanup: bool,
}

impl SyncRequest {
    pub fn from_event(event: &CustomResourceEvent) -> Result<Self, HookError> {
        let dest_bucket = required(event, &["DestBucket"])?;
        let source_bucket = required(event, &["SourceBucket", "TestActualBucket"])?;
        let source_key = required(event, &["SourceKey", "AdditionalArtifactsFolder"])?;
        let subfolder = event.property(&["Subfolder"]).unwrap_or_default().to_owned();

        let skip_cleanup = match event.property(&["SkipCleanup"]) {
            Some(value) => is_true(value),
            None => event.property(&["Cleanup"]).is_some_and(|v| !is_true(v)),
        };

        Ok(Self {
            dest_bucket,
            source_bucket,
            source_key,
            subfolder,
            skip_cleanup,
        })
    }

    /// True when the subfolder selects the whole archive.
    pub fn wants_full_archive(&self) -> bool {
        matches!(self.subfolder.as_str(), "" | "." | "/")
    }
}

fn required(event: &CustomResourceEvent, keys: &[&str]) -> Result<String, HookError> {
    event
        .property(keys)
        .map(str::to_owned)
        .ok_or_else(|| HookError::BadRequest(format!("missing required property {}", keys[0])))
}

fn is_true(value: &str) -> bool {
    value.eq_ignore_ascii_case("true")
}
