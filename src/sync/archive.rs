//! # Archive Extraction
//!
//! Zip extraction with the subfolder prefix filter. The filter is a raw
//! string-prefix test on entry names, matching the behavior the stack
//! templates have always had: prefix `a` also selects `ab/file.txt`. The
//! segment-boundary question is flagged in the tests, not silently fixed.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use tracing::{debug, warn};
use zip::ZipArchive;

/// Whole-archive sentinel values for the subfolder prefix.
pub fn is_trivial_prefix(prefix: &str) -> bool {
    matches!(prefix, "" | "." | "/")
}

/// Extract `archive_path` into `dest`, keeping entry paths. A trivial prefix
/// extracts everything; otherwise only entries whose name starts with
/// `prefix` are written. Returns the number of files extracted.
pub fn extract_with_prefix(archive_path: &Path, dest: &Path, prefix: &str) -> Result<u32> {
    let file = File::open(archive_path).context(format!(
        "Failed to open downloaded archive {}",
        archive_path.display()
    ))?;
    let mut archive = ZipArchive::new(file).context("Failed to read zip archive")?;

    let take_all = is_trivial_prefix(prefix);
    let mut extracted = 0_u32;

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .context("Failed to read zip entry")?;

        if !take_all && !entry.name().starts_with(prefix) {
            continue;
        }

        // enclosed_name rejects entries that would escape the extraction
        // root (absolute paths, `..` components).
        let Some(relative) = entry.enclosed_name() else {
            warn!("Skipping zip entry with unsafe path: {}", entry.name());
            continue;
        };
        let outpath = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&outpath)
                .context(format!("Failed to create directory {}", outpath.display()))?;
        } else {
            if let Some(parent) = outpath.parent() {
                std::fs::create_dir_all(parent)
                    .context(format!("Failed to create directory {}", parent.display()))?;
            }
            let mut outfile = File::create(&outpath)
                .context(format!("Failed to create file {}", outpath.display()))?;
            std::io::copy(&mut entry, &mut outfile)
                .context(format!("Failed to extract {}", entry.name()))?;
            extracted += 1;
        }
    }

    debug!(
        "Extracted {} files from {} (prefix: {:?})",
        extracted,
        archive_path.display(),
        prefix
    );
    Ok(extracted)
}
