use log::{info, warn};
use reqwest::blocking::Client;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::services::archive;
use crate::services::config::ImageSource;
use crate::types::errors::FetchError;

const API_BASE_URL: &str = "https://api.github.com/repos";
const ARCHIVE_BASE_URL: &str = "https://github.com";

/// File inside the image database recording the commit it was built from.
pub const SHA_FILE: &str = "sha";

fn client() -> Result<Client, FetchError> {
    Ok(Client::builder()
        .timeout(Duration::from_secs(120))
        .user_agent(concat!("imagefix/", env!("CARGO_PKG_VERSION")))
        .build()?)
}

pub fn commit_url(source: &ImageSource) -> String {
    format!("{API_BASE_URL}/{}/commits/{}", source.repo, source.branch)
}

pub fn archive_url(source: &ImageSource) -> String {
    format!("{ARCHIVE_BASE_URL}/{}/archive/{}.zip", source.repo, source.branch)
}

/// Head commit of the source branch, or `None` if GitHub does not answer 200.
pub fn remote_head_sha(source: &ImageSource) -> Result<Option<String>, FetchError> {
    let response = client()?
        .get(commit_url(source))
        .header("Accept", "application/vnd.github.v3.sha")
        .send()?;

    if !response.status().is_success() {
        warn!(
            "Commit lookup for '{}' failed: HTTP {}",
            source.repo,
            response.status()
        );
        return Ok(None);
    }

    let sha = response.text()?.trim().to_string();
    Ok((!sha.is_empty()).then_some(sha))
}

/// Commit the local image database was built from, if recorded.
pub fn local_sha(image_db: &Path) -> Option<String> {
    fs::read_to_string(image_db.join(SHA_FILE))
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Bring the image database up to date with the remote branch.
///
/// Returns `true` if a new archive was downloaded. If the remote commit
/// cannot be determined the existing database is kept as-is.
pub fn sync_image_db(image_db: &Path, source: &ImageSource) -> Result<bool, FetchError> {
    let Some(remote) = remote_head_sha(source)? else {
        warn!("Could not determine remote image version, keeping local copy");
        return Ok(false);
    };

    if local_sha(image_db).as_deref() == Some(remote.as_str()) {
        info!("{} up to date", source.repo);
        return Ok(false);
    }

    info!("Downloading new version of {} ({remote})", source.repo);
    download_image_db(image_db, source, &remote)?;
    Ok(true)
}

fn download_image_db(image_db: &Path, source: &ImageSource, sha: &str) -> Result<(), FetchError> {
    let bytes = client()?
        .get(archive_url(source))
        .send()?
        .error_for_status()?
        .bytes()?;

    let mut temp_file = tempfile::NamedTempFile::new()?;
    temp_file.write_all(&bytes)?;
    temp_file.flush()?;

    if image_db.exists() {
        fs::remove_dir_all(image_db)?;
    }
    fs::create_dir_all(image_db)?;
    let count = archive::extract_zip(temp_file.path(), image_db, true)?;
    fs::write(image_db.join(SHA_FILE), sha)?;

    info!("Image database refreshed: {count} files at {}", image_db.display());
    Ok(())
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
