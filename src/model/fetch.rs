//! One-shot download of the model artifact.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::info;

use crate::common::error::{DashError, DashResult};
use crate::common::time;

/// HTTP client with the configured overall request timeout.
pub fn client(timeout: Duration) -> DashResult<reqwest::Client> {
    Ok(reqwest::Client::builder().timeout(timeout).build()?)
}

/// GET `url` once and store the body at `dest`. Returns the number of bytes written.
///
/// The body lands in a `.part` sibling first and is renamed into place, so a
/// failed transfer never leaves a truncated artifact behind. No retry.
pub async fn download(client: &reqwest::Client, url: &str, dest: &Path) -> DashResult<u64> {
    let start = time::now_ms();
    info!(url, dest = %dest.display(), "fetching model artifact");

    let resp = client.get(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DashError::FetchStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }
    let body = resp.bytes().await?;

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DashError::io(parent, e))?;
    }
    let part = part_path(dest);
    store(&part, dest, &body).await?;

    info!(
        bytes = body.len(),
        dur_ms = time::elapsed_ms(start),
        "model artifact stored"
    );
    Ok(body.len() as u64)
}

/// Write `body` to `part` and rename it onto `dest`. The part file is removed on failure.
async fn store(part: &Path, dest: &Path, body: &[u8]) -> DashResult<()> {
    let result = match tokio::fs::write(part, body).await {
        Ok(()) => tokio::fs::rename(part, dest)
            .await
            .map_err(|e| DashError::io(dest, e)),
        Err(e) => Err(DashError::io(part, e)),
    };
    if result.is_err() {
        let _ = tokio::fs::remove_file(part).await;
    }
    result
}

fn part_path(dest: &Path) -> PathBuf {
    let mut name = OsString::from(dest.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}
