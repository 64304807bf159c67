//! `instaprof` binary: one linear pass of launch, fetch, extract,
//! serialize, report.
//!
//! Exit codes: `0` on success (including an interrupted run that cleaned up
//! properly); `1` on an empty username, a fetch failure, or any unhandled
//! top-level error. No files are written for failed runs.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use instaprof_core::{format_summary, ProfileRecord};
use instaprof_scraper::session::suppress_automation_signals;
use instaprof_scraper::{
    extract_profile, fetch_profile_html, output, BrowserSession, FetchError, SessionConfig,
};

#[derive(Debug, Parser)]
#[command(name = "instaprof")]
#[command(about = "Extract public Instagram profile data into JSON/CSV")]
struct Cli {
    /// Instagram username to scrape
    username: String,

    /// Also save data as CSV
    #[arg(long)]
    csv: bool,

    /// Download the profile picture
    #[arg(long)]
    download_pic: bool,

    /// Run the browser in headless mode
    #[arg(long)]
    headless: bool,

    /// Output directory for JSON/CSV files
    #[arg(long, default_value = "data", env = "INSTAPROF_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Directory for downloaded profile pictures
    #[arg(long, default_value = "screenshots", env = "INSTAPROF_SCREENSHOTS_DIR")]
    screenshots_dir: PathBuf,

    /// Chrome user-data directory carrying an authenticated session
    #[arg(long)]
    chrome_profile: Option<PathBuf>,
}

/// Trims and lower-cases the input; empty-after-trim is rejected.
fn normalize_username(raw: &str) -> Option<String> {
    let username = raw.trim().to_lowercase();
    (!username.is_empty()).then_some(username)
}

async fn fetch_html(session: &BrowserSession, username: &str) -> Result<String, FetchError> {
    let page = session.new_page().await?;
    suppress_automation_signals(&page).await;
    fetch_profile_html(&page, username).await
}

/// Fetch plus extract; fetch failures collapse into a failure record rather
/// than propagating.
async fn scrape(session: &BrowserSession, username: &str) -> ProfileRecord {
    match fetch_html(session, username).await {
        Ok(html) => extract_profile(&html, username),
        Err(err) => ProfileRecord::failed(username, err.to_string()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let Some(username) = normalize_username(&cli.username) else {
        anyhow::bail!("username cannot be empty");
    };

    info!(%username, "starting profile scrape");
    let session = BrowserSession::launch(&SessionConfig {
        user_data_dir: cli.chrome_profile.clone(),
        headless: cli.headless,
    })
    .await
    .context("could not start browser session")?;

    // Race the pipeline against Ctrl-C so the browser is released on both
    // paths before anything touches the filesystem.
    let outcome = tokio::select! {
        record = scrape(&session, &username) => Some(record),
        _ = tokio::signal::ctrl_c() => None,
    };

    session.close().await;

    let Some(record) = outcome else {
        info!("interrupted; browser closed");
        return Ok(());
    };

    if !record.success {
        println!("{}", format_summary(&record));
        std::process::exit(1);
    }

    output::write_json(&record, &cli.output_dir);
    if cli.csv {
        output::write_csv(&record, &cli.output_dir);
    }
    if cli.download_pic {
        match record.profile_pic_url.as_deref() {
            Some(url) => match output::http_client() {
                Ok(client) => {
                    output::download_picture(&client, url, &username, &cli.screenshots_dir).await;
                }
                Err(err) => warn!(%err, "could not build download client"),
            },
            None => warn!("no profile picture URL to download"),
        }
    }

    println!("{}", format_summary(&record));
    Ok(())
}
