//! Human-readable console rendering of a [`ProfileRecord`].

use std::fmt::Write as _;

use crate::record::ProfileRecord;

const BANNER: &str = "==================================================";

/// Formats a record as a multi-line console block.
///
/// Failure records render only the error line; absent fields on success
/// records render as `N/A`. Pure formatting, no I/O.
#[must_use]
pub fn format_summary(record: &ProfileRecord) -> String {
    if !record.success {
        let cause = record.error.as_deref().unwrap_or("Unknown error");
        return format!("Failed to scrape profile: {cause}");
    }

    let field = |value: &Option<String>| -> String {
        value.clone().unwrap_or_else(|| "N/A".to_owned())
    };

    let mut out = String::new();
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "INSTAGRAM PROFILE SUMMARY");
    let _ = writeln!(out, "{BANNER}");
    let _ = writeln!(out, "Username:    @{}", record.username);
    let _ = writeln!(out, "Name:        {}", field(&record.name));
    let _ = writeln!(out, "Bio:         {}", field(&record.bio));
    let _ = writeln!(out, "Posts:       {}", field(&record.posts));
    let _ = writeln!(out, "Followers:   {}", field(&record.followers));
    let _ = writeln!(out, "Following:   {}", field(&record.following));
    let _ = writeln!(out, "Website:     {}", field(&record.website));
    let _ = writeln!(out, "Profile URL: {}", record.profile_url);
    let _ = write!(out, "{BANNER}");
    out
}
