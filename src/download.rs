use crate::client::AnalysisApi;
use crate::model::ApiError;
use crate::utils::file_name_from_url;

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// Fetches a finished report and stores it in `dest_dir` under the name the service gave it.
pub async fn download_report(
    api: &dyn AnalysisApi,
    download_url: &str,
    filename_hint: Option<&str>,
    dest_dir: &Path,
) -> Result<PathBuf, ApiError> {
    let file_name = file_name_from_url(download_url).ok_or_else(|| {
        ApiError::MalformedEnvelope(format!("download_url has no file name: {}", download_url))
    })?;

    let bytes = api.fetch_file(download_url).await?;

    fs::create_dir_all(dest_dir).await?;
    let path = dest_dir.join(file_name);
    fs::write(&path, &bytes).await?;

    info!(
        "💾 Saved report {} ({} bytes) to {}",
        filename_hint.unwrap_or(file_name),
        bytes.len(),
        path.display()
    );
    Ok(path)
}
