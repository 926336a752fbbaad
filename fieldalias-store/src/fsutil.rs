//! Filesystem helpers shared by the YAML backends.

use std::path::Path;

use tokio::fs;
use ulid::Ulid;

use crate::error::Result;

/// Write to a temp file then rename for atomic persistence.
/// Creates the parent directory if missing.
pub(crate) async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    fs::create_dir_all(dir).await?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}
