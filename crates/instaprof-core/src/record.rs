//! The single domain entity: one scraped profile per run.
//!
//! ## Observed shape from live Instagram profile pages
//!
//! ### Counts
//! Instagram renders follower/following/post counts as display text, not
//! numbers — `"1,000"`, `"1.2M"`, `"50"` — so `followers`, `following`, and
//! `posts` are kept as the rendered strings and never normalized to integers.
//!
//! ### Field presence
//! Every content field is independently best-effort: a public profile with no
//! bio or no website is normal, and partial extraction is not an error. Only
//! a fetch-level failure (page never loads, profile not found or private)
//! produces a failure record, and a failure record carries no content fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Host all profile URLs are constructed against.
pub const PROFILE_URL_BASE: &str = "https://www.instagram.com";

/// Builds the canonical profile URL for a username, trailing slash included.
#[must_use]
pub fn profile_url(username: &str) -> String {
    format!("{PROFILE_URL_BASE}/{username}/")
}

/// Everything extracted from one profile page visit.
///
/// Invariants, enforced by the [`extracted`](ProfileRecord::extracted) and
/// [`failed`](ProfileRecord::failed) constructors:
///
/// - `success == false` ⇒ `error` is `Some` and every content field is `None`.
/// - `success == true` ⇒ `error` is `None`; `username`, `profile_url`, and
///   `scraped_at` are always populated; every content field is independently
///   optional.
///
/// The record is created once per run and never mutated after hand-off to the
/// serializer and reporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    /// Lower-cased input username, non-empty.
    pub username: String,

    /// Whether extraction completed without a fatal fetch error.
    pub success: bool,

    /// Human-readable failure cause; present iff `success` is false.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Canonical page URL, constructed from `username`.
    pub profile_url: String,

    /// Capture time, serialized as ISO-8601.
    pub scraped_at: DateTime<Utc>,

    /// Display name from the page header.
    pub name: Option<String>,

    /// Bio text; may come from the page's `<meta name="description">` tag
    /// when the rendered bio element is missing.
    pub bio: Option<String>,

    /// Follower count as rendered (e.g. `"1.2M"`).
    pub followers: Option<String>,

    /// Following count as rendered.
    pub following: Option<String>,

    /// Post count as rendered.
    pub posts: Option<String>,

    /// External website link, absolute URL.
    pub website: Option<String>,

    /// Profile picture image URL, absolute.
    pub profile_pic_url: Option<String>,
}

impl ProfileRecord {
    /// Success skeleton: all content fields start `None` and are filled in
    /// independently by the extractor.
    #[must_use]
    pub fn extracted(username: &str) -> Self {
        Self {
            username: username.to_owned(),
            success: true,
            error: None,
            profile_url: profile_url(username),
            scraped_at: Utc::now(),
            name: None,
            bio: None,
            followers: None,
            following: None,
            posts: None,
            website: None,
            profile_pic_url: None,
        }
    }

    /// Failure record: `error` populated, every content field absent.
    #[must_use]
    pub fn failed(username: &str, error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Self::extracted(username)
        }
    }
}

#[cfg(test)]
#[path = "record_test.rs"]
mod tests;
