//! Profile page fetching: navigation, load detection, and settling.
//!
//! The fetcher hands back the page's rendered HTML as a plain string so the
//! extractor can stay pure and browser-free. No retries happen here; a
//! failed load is terminal for the run.

use std::time::Duration;

use chromiumoxide::Page;
use tokio::time::Instant;
use tracing::{debug, info};

use instaprof_core::profile_url;

use crate::error::FetchError;

/// Maximum wait for the landmark element after navigation.
pub const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum wait for client-side rendering to settle once the landmark is up.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(3);

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Element whose presence signals the profile template has rendered.
const LANDMARK_SELECTOR: &str = "main";

/// Notice Instagram renders for missing or private profiles.
const UNAVAILABLE_PHRASE: &str = "Sorry, this page isn't available";

/// Navigates to the profile page for `username` and returns its rendered
/// HTML once the page has loaded and settled.
///
/// # Errors
///
/// - [`FetchError::LoadTimeout`] — landmark element never appeared.
/// - [`FetchError::Unavailable`] — page carries the "not available" notice.
/// - [`FetchError::Browser`] — any protocol error mid-fetch.
pub async fn fetch_profile_html(page: &Page, username: &str) -> Result<String, FetchError> {
    let url = profile_url(username);
    info!(%url, "navigating to profile");
    page.goto(url.as_str()).await?;

    wait_for_landmark(page).await?;

    let html = page.content().await?;
    if page_unavailable(&html) {
        return Err(FetchError::Unavailable);
    }

    settle(page, html).await
}

/// Whether the markup carries Instagram's "not available" notice.
#[must_use]
pub fn page_unavailable(html: &str) -> bool {
    html.contains(UNAVAILABLE_PHRASE)
}

/// Polls for the landmark element until it appears or the load timeout
/// expires.
async fn wait_for_landmark(page: &Page) -> Result<(), FetchError> {
    let deadline = Instant::now() + PAGE_LOAD_TIMEOUT;
    loop {
        if page.find_element(LANDMARK_SELECTOR).await.is_ok() {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(FetchError::LoadTimeout);
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Waits for client-side rendering to finish by polling until two
/// consecutive content captures are identical, bounded by [`SETTLE_TIMEOUT`]
/// as the fallback maximum. Returns the final capture either way.
async fn settle(page: &Page, mut last: String) -> Result<String, FetchError> {
    let deadline = Instant::now() + SETTLE_TIMEOUT;
    while Instant::now() < deadline {
        tokio::time::sleep(POLL_INTERVAL).await;
        let current = page.content().await?;
        if current == last {
            debug!("page content stable");
            return Ok(current);
        }
        last = current;
    }
    debug!("settle timeout reached; using last capture");
    Ok(last)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_phrase_is_detected_anywhere_in_markup() {
        let html = format!(
            "<html><body><main><h1>{UNAVAILABLE_PHRASE}</h1>\
             <p>unrelated content</p></main></body></html>"
        );
        assert!(page_unavailable(&html));
    }

    #[test]
    fn ordinary_profile_markup_is_not_flagged() {
        let html = "<html><body><main><h2>NASA</h2></main></body></html>";
        assert!(!page_unavailable(html));
    }

    #[test]
    fn error_strings_match_the_record_contract() {
        assert_eq!(
            FetchError::LoadTimeout.to_string(),
            "Failed to load profile page"
        );
        assert_eq!(
            FetchError::Unavailable.to_string(),
            "Profile not found or private"
        );
    }
}
