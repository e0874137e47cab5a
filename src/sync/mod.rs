//! # Artifact Sync Hook
//!
//! Handler for `Custom::StaticCopy`: fetch the build-artifact zip from the
//! source bucket, extract it (optionally filtered to a subfolder prefix),
//! and sync the extracted tree to the website bucket. Steps run strictly in
//! order - fetch, extract, copy - and a fetch failure happens before any
//! destination mutation. Exactly one acknowledgment is sent per invocation.

pub mod archive;
mod request;

pub use request::SyncRequest;

use crate::cfn::{CfnAck, CustomResourceEvent, RequestKind, ResponseSender};
use crate::store::ObjectStore;
use crate::HookError;
use anyhow::Result;
use std::collections::HashMap;
use tempfile::TempDir;
use tracing::{error, info, warn};

/// Handle one sync invocation and acknowledge it exactly once.
pub async fn handle_event(
    event: &CustomResourceEvent,
    store: &dyn ObjectStore,
    responder: &dyn ResponseSender,
) -> Result<()> {
    info!(
        "Artifact sync {:?} for {}",
        event.request_type, event.logical_resource_id
    );

    // Deleting the custom resource must not delete published content: the
    // website bucket is retained across stack teardown.
    if event.request_type == RequestKind::Delete {
        return responder
            .send(&event.response_url, &CfnAck::success(event, HashMap::new()))
            .await;
    }

    match run_sync(event, store).await {
        Ok(origin_path) => {
            let mut data = HashMap::new();
            data.insert("DestPath".to_owned(), origin_path.clone());
            data.insert("OriginPath".to_owned(), origin_path);
            responder
                .send(&event.response_url, &CfnAck::success(event, data))
                .await
        }
        Err(err) => {
            error!("Artifact sync failed: {err}");
            responder
                .send(&event.response_url, &CfnAck::failed(event, err.to_string()))
                .await
        }
    }
}

/// Fetch, extract, copy. Returns the origin path (the subfolder the copy was
/// rooted at). Scoped temp dirs are released on every exit path.
async fn run_sync(
    event: &CustomResourceEvent,
    store: &dyn ObjectStore,
) -> Result<String, HookError> {
    let request = SyncRequest::from_event(event)?;

    info!(
        "Syncing s3://{}/{} (subfolder: {:?}) to s3://{}",
        request.source_bucket, request.source_key, request.subfolder, request.dest_bucket
    );

    // 1. Fetch the archive into a scoped download area.
    let download_dir = TempDir::new().map_err(|e| HookError::Fetch(e.into()))?;
    let archive_path = download_dir.path().join("artifact.zip");
    store
        .download(&request.source_bucket, &request.source_key, &archive_path)
        .await
        .map_err(HookError::Fetch)?;

    // 2. Extract into a second scoped area, filtered to the subfolder.
    let extract_dir = TempDir::new().map_err(|e| HookError::Extract(e.into()))?;
    let extracted =
        archive::extract_with_prefix(&archive_path, extract_dir.path(), &request.subfolder)
            .map_err(HookError::Extract)?;

    // 3. Copy the tree rooted at the subfolder. A subfolder that matched
    // nothing copies nothing; that is success, not an error.
    let copy_root = if request.wants_full_archive() {
        extract_dir.path().to_path_buf()
    } else {
        extract_dir.path().join(&request.subfolder)
    };

    if !copy_root.is_dir() {
        warn!(
            "Subfolder {:?} matched no archive entries; nothing to copy",
            request.subfolder
        );
        return Ok(request.subfolder);
    }

    let uploaded = store
        .sync_dir(&copy_root, &request.dest_bucket)
        .await
        .map_err(HookError::Copy)?;

    info!(
        "Synced {} of {} extracted files to s3://{}",
        uploaded, extracted, request.dest_bucket
    );
    Ok(request.subfolder)
}
