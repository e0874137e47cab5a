//! # In-Memory Object Store
//!
//! Recording double for tests. Buckets are plain maps; `download` serves
//! pre-seeded objects and `sync_dir` captures every upload so assertions can
//! inspect exactly what a workflow wrote - and that a no-op workflow wrote
//! nothing.

use super::{s3::relative_key, ObjectStore};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};
use walkdir::WalkDir;

type Buckets = BTreeMap<String, BTreeMap<String, Vec<u8>>>;

/// In-memory [`ObjectStore`] double.
#[derive(Debug, Default)]
pub struct MemoryStore {
    buckets: Mutex<Buckets>,
    downloads: Mutex<u32>,
    writes: Mutex<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed an object so a later `download` can serve it.
    pub fn seed_object(&self, bucket: &str, key: &str, bytes: Vec<u8>) {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(bucket.to_owned())
            .or_default()
            .insert(key.to_owned(), bytes);
    }

    /// Sorted keys currently present in `bucket`.
    pub fn keys_in(&self, bucket: &str) -> Vec<String> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(bucket)
            .map(|objects| objects.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Object bytes, if present.
    pub fn object(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(bucket)
            .and_then(|objects| objects.get(key).cloned())
    }

    /// Number of `download` calls made against this store.
    pub fn download_count(&self) -> u32 {
        *self.downloads.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of objects written through `sync_dir`.
    pub fn write_count(&self) -> u32 {
        *self.writes.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn download(&self, bucket: &str, key: &str, dest: &Path) -> Result<()> {
        *self.downloads.lock().unwrap_or_else(PoisonError::into_inner) += 1;

        let bytes = self
            .buckets
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(bucket)
            .and_then(|objects| objects.get(key))
            .cloned()
            .ok_or_else(|| anyhow!("no such object: s3://{bucket}/{key}"))?;

        tokio::fs::write(dest, bytes)
            .await
            .context(format!("Failed to write object to {}", dest.display()))?;
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
            let bytes = std::fs::read(entry.path())
                .context(format!("Failed to read {}", entry.path().display()))?;

            self.buckets
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(dest_bucket.to_owned())
                .or_default()
                .insert(key, bytes);
            uploaded += 1;
        }

        *self.writes.lock().unwrap_or_else(PoisonError::into_inner) += uploaded;
        Ok(uploaded)
    }
}
