//! Atomic file operations

use std::path::Path;

/// Write data atomically using temp file + rename
pub async fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    tokio::fs::write(&temp_path, data).await?;
    tokio::fs::rename(temp_path, path).await?;
    Ok(())
}
