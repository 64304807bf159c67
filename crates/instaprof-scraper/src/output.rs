//! Output serialization: JSON and CSV files plus the optional profile
//! picture download.
//!
//! All failures here are local: they are logged and collapse to `None` so a
//! disk or network hiccup never aborts the remaining output steps.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use instaprof_core::ProfileRecord;

use crate::error::OutputError;

/// Bound on the profile picture download, connect plus body.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("instaprof/", env!("CARGO_PKG_VERSION"));

/// Writes the record as pretty-printed UTF-8 JSON to
/// `<dir>/profile_<username>.json`, creating `dir` if needed.
///
/// Returns the written path, or `None` on I/O failure (logged, non-fatal).
pub fn write_json(record: &ProfileRecord, dir: &Path) -> Option<PathBuf> {
    match try_write_json(record, dir) {
        Ok(path) => {
            info!(path = %path.display(), "profile data saved");
            Some(path)
        }
        Err(err) => {
            warn!(%err, "failed to write JSON output");
            None
        }
    }
}

fn try_write_json(record: &ProfileRecord, dir: &Path) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("profile_{}.json", record.username));
    // serde_json emits UTF-8 with non-ASCII characters unescaped.
    let json = serde_json::to_string_pretty(record)?;
    fs::write(&path, json)?;
    Ok(path)
}

/// One flattened CSV row; field order here is the column order.
#[derive(Serialize)]
struct CsvRow<'a> {
    username: &'a str,
    name: &'a str,
    bio: String,
    followers: &'a str,
    following: &'a str,
    posts: &'a str,
    website: &'a str,
    profile_url: &'a str,
    profile_pic_url: &'a str,
    scraped_at: String,
}

impl<'a> CsvRow<'a> {
    fn from_record(record: &'a ProfileRecord) -> Self {
        let opt = |value: &'a Option<String>| value.as_deref().unwrap_or("");
        Self {
            username: &record.username,
            name: opt(&record.name),
            // Newlines would break single-row consumers.
            bio: opt(&record.bio).replace('\n', " "),
            followers: opt(&record.followers),
            following: opt(&record.following),
            posts: opt(&record.posts),
            website: opt(&record.website),
            profile_url: &record.profile_url,
            profile_pic_url: opt(&record.profile_pic_url),
            scraped_at: record.scraped_at.to_rfc3339(),
        }
    }
}

/// Writes the record as a single-row CSV (with header) to
/// `<dir>/profile_<username>.csv`.
///
/// Failure records produce no file and `None`; I/O failures are logged and
/// collapse to `None`.
pub fn write_csv(record: &ProfileRecord, dir: &Path) -> Option<PathBuf> {
    if !record.success {
        debug!("skipping CSV output for failure record");
        return None;
    }
    match try_write_csv(record, dir) {
        Ok(path) => {
            info!(path = %path.display(), "CSV data saved");
            Some(path)
        }
        Err(err) => {
            warn!(%err, "failed to write CSV output");
            None
        }
    }
}

fn try_write_csv(record: &ProfileRecord, dir: &Path) -> Result<PathBuf, OutputError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("profile_{}.csv", record.username));
    let mut writer = csv::Writer::from_path(&path)?;
    writer.serialize(CsvRow::from_record(record))?;
    writer.flush()?;
    Ok(path)
}

/// HTTP client for the picture download: bounded timeout, descriptive UA.
///
/// # Errors
///
/// [`OutputError::Http`] if the underlying `reqwest::Client` cannot be
/// constructed.
pub fn http_client() -> Result<Client, OutputError> {
    let client = Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Streams the profile picture to `<dir>/<username>_profile.jpg`.
///
/// Returns the written path, or `None` on any HTTP or I/O error (logged,
/// non-fatal) — the JSON/CSV output is never affected by a failed download.
pub async fn download_picture(
    client: &Client,
    url: &str,
    username: &str,
    dir: &Path,
) -> Option<PathBuf> {
    match try_download_picture(client, url, username, dir).await {
        Ok(path) => {
            info!(path = %path.display(), "profile picture saved");
            Some(path)
        }
        Err(err) => {
            warn!(%err, "failed to download profile picture");
            None
        }
    }
}

async fn try_download_picture(
    client: &Client,
    url: &str,
    username: &str,
    dir: &Path,
) -> Result<PathBuf, OutputError> {
    let mut response = client.get(url).send().await?.error_for_status()?;

    tokio::fs::create_dir_all(dir).await?;
    let path = dir.join(format!("{username}_profile.jpg"));
    let mut file = tokio::fs::File::create(&path).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(path)
}
