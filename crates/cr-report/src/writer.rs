//! Atomic document persistence.
//!
//! Documents are complete-or-absent: content goes to a temporary file in the
//! destination directory first and only reaches the destination path through
//! a rename.

use crate::error::Result;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Write `contents` to `path` atomically.
pub fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    debug!(path = %path.display(), bytes = contents.len(), "writing document");

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    info!(path = %path.display(), bytes = contents.len(), "document written");
    Ok(())
}
