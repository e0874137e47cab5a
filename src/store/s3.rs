//! # S3 Object Store
//!
//! AWS S3 implementation of the [`ObjectStore`] seam. Each file is uploaded
//! with a plain `PutObject`, which writes a fresh object whose metadata is
//! exactly what the request carries - the metadata-replace copy policy, with
//! no merge against whatever the destination held before.

use super::ObjectStore;
use anyhow::{Context, Result};
use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

/// S3-backed [`ObjectStore`].
pub struct S3Store {
    client: S3Client,
}

impl std::fmt::Debug for S3Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Store").finish_non_exhaustive()
    }
}

impl S3Store {
    pub fn new(sdk_config: &aws_config::SdkConfig) -> Self {
        Self {
            client: S3Client::new(sdk_config),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn download(&self, bucket: &str, key: &str, dest: &Path) -> Result<()> {
        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .context(format!("Failed to get object s3://{bucket}/{key}"))?;

        let bytes = response
            .body
            .collect()
            .await
            .context(format!("Failed to read body of s3://{bucket}/{key}"))?
            .into_bytes();

        tokio::fs::write(dest, &bytes).await.context(format!(
            "Failed to write downloaded object to {}",
            dest.display()
        ))?;

        debug!("Downloaded s3://{}/{} ({} bytes)", bucket, key, bytes.len());
        Ok(())
    }

    async fn sync_dir(&self, source_root: &Path, dest_bucket: &str) -> Result<u32> {
        let mut uploaded = 0_u32;

        for entry in WalkDir::new(source_root) {
            let entry = entry.context("Failed to walk local sync tree")?;
            if !entry.file_type().is_file() {
                continue;
            }

            let key = relative_key(source_root, entry.path())?;
            let content_type = mime_guess::from_path(entry.path())
                .first_or_octet_stream()
                .essence_str()
                .to_owned();

            let body = ByteStream::from_path(entry.path()).await.context(format!(
                "Failed to open {} for upload",
                entry.path().display()
            ))?;

            self.client
                .put_object()
                .bucket(dest_bucket)
                .key(&key)
                .content_type(&content_type)
                .body(body)
                .send()
                .await
                .context(format!("Failed to upload {key} to s3://{dest_bucket}"))?;

            debug!("Uploaded {} ({}) to s3://{}", key, content_type, dest_bucket);
            uploaded += 1;
        }

        info!("Synced {} objects to s3://{}", uploaded, dest_bucket);
        Ok(uploaded)
    }
}

/// Object key for a file, relative to the sync root, with `/` separators.
pub(crate) fn relative_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path
        .strip_prefix(root)
        .context("Walked file is outside the sync root")?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}
