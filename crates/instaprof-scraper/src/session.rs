//! Browser session lifecycle.
//!
//! One Chromium instance is launched per run against an existing user
//! profile directory, so the session already carries the operator's
//! Instagram login cookies. The session is owned by the caller and closed
//! exactly once, on every exit path.

use std::path::PathBuf;

use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{FetchError, SessionError};

/// Best-effort removal of the `navigator.webdriver` automation flag.
const WEBDRIVER_SUPPRESSION_SCRIPT: &str =
    "Object.defineProperty(navigator, 'webdriver', {get: () => undefined})";

/// Launch options for the browser session.
#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Chrome user-data directory holding the authenticated cookie store.
    /// `None` falls back to the platform-conventional Chrome profile when
    /// one exists, else a throwaway profile.
    pub user_data_dir: Option<PathBuf>,

    /// Suppress the visible browser UI.
    pub headless: bool,
}

/// An owned, ready-to-use browser session.
///
/// Wraps the CDP connection and the event-handler task; pages are created
/// through [`new_page`](BrowserSession::new_page) and the whole session is
/// torn down by [`close`](BrowserSession::close).
pub struct BrowserSession {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl BrowserSession {
    /// Launches Chromium with the configured profile and automation-signal
    /// suppression flags.
    ///
    /// # Errors
    ///
    /// [`SessionError::Config`] if the launch arguments are rejected,
    /// [`SessionError::Launch`] if the browser binary is missing or the CDP
    /// handshake fails. Both are fatal; the caller exits non-zero.
    pub async fn launch(config: &SessionConfig) -> Result<Self, SessionError> {
        let mut builder = BrowserConfig::builder()
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--window-size=1920,1080")
            .arg("--disable-blink-features=AutomationControlled");

        if !config.headless {
            builder = builder.with_head();
        }

        match config.user_data_dir.clone().or_else(default_user_data_dir) {
            Some(dir) => {
                info!(profile = %dir.display(), "using Chrome profile");
                builder = builder.user_data_dir(dir);
            }
            None => warn!("no Chrome profile found; session will be unauthenticated"),
        }

        let browser_config = builder.build().map_err(SessionError::Config)?;
        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(SessionError::Launch)?;

        // The CDP event stream must be drained for the connection to make
        // progress; the task ends when the browser closes.
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        Ok(Self { browser, handler })
    }

    /// Opens a fresh blank page on this session.
    ///
    /// # Errors
    ///
    /// [`FetchError::Browser`] if the target cannot be created.
    pub async fn new_page(&self) -> Result<Page, FetchError> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(page)
    }

    /// Shuts the browser down. Errors during teardown are logged, not
    /// propagated; there is nothing useful a caller can do with them.
    pub async fn close(mut self) {
        if let Err(err) = self.browser.close().await {
            debug!(%err, "browser close request failed");
        }
        if let Err(err) = self.browser.wait().await {
            debug!(%err, "waiting for browser exit failed");
        }
        self.handler.abort();
    }
}

/// Evaluates the `navigator.webdriver` suppression script on a page.
/// Best-effort: failures are logged and ignored.
pub async fn suppress_automation_signals(page: &Page) {
    if let Err(err) = page.evaluate(WEBDRIVER_SUPPRESSION_SCRIPT.to_string()).await {
        debug!(%err, "automation-signal suppression skipped");
    }
}

/// Platform-conventional Chrome user-data directory, if it exists.
fn default_user_data_dir() -> Option<PathBuf> {
    let candidate = if cfg!(target_os = "windows") {
        PathBuf::from(std::env::var_os("LOCALAPPDATA")?).join("Google/Chrome/User Data")
    } else if cfg!(target_os = "macos") {
        PathBuf::from(std::env::var_os("HOME")?)
            .join("Library/Application Support/Google/Chrome")
    } else {
        PathBuf::from(std::env::var_os("HOME")?).join(".config/google-chrome")
    };
    candidate.is_dir().then_some(candidate)
}
