//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Create the parent directory of `data_file` if needed; warn when the file
/// itself is absent (the store starts empty in that case).
pub async fn ensure_data_dir(data_file: &Path) -> anyhow::Result<()> {
    if let Some(parent) = data_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", parent.display()))?;
    }
    if tokio::fs::metadata(data_file).await.is_err() {
        warn!(data_file = %data_file.display(), "data file not found; starting with an empty collection");
    } else {
        info!(data_file = %data_file.display(), "using existing data file");
    }
    Ok(())
}
