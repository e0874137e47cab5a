//! # Object Store Seam
//!
//! The sync hook depends on object storage through this trait rather than on
//! ambient process state, so the fetch/extract/copy core stays independent of
//! the S3 client and tests can inject a recording double.

mod memory;
mod s3;

pub use memory::MemoryStore;
pub use s3::S3Store;

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Object-storage operations the hooks depend on.
///
/// `sync_dir` is the delegation boundary: recursive copy with
/// metadata-replace semantics belongs to the storage client, not to the
/// workflow. The copy never deletes destination objects that have no
/// corresponding source file.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Download `s3://{bucket}/{key}` to a local file.
    async fn download(&self, bucket: &str, key: &str, dest: &Path) -> Result<()>;

    /// Recursively upload every file under `source_root` to the destination
    /// bucket, keyed by path relative to `source_root`, replacing destination
    /// object metadata wholesale. Returns the number of objects written.
    async fn sync_dir(&self, source_root: &Path, dest_bucket: &str) -> Result<u32>;
}
