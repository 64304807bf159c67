//! Best-effort field extraction from captured profile-page HTML.
//!
//! Pure: operates on the HTML string the fetcher captured, so every lookup
//! is testable with mock pages and no browser. Each lookup is independent —
//! a missing element for one field never blocks the others — and absence is
//! a normal value, not an error.
//!
//! Selector notes: Instagram's class names (`x1lliihq` and friends) are
//! generated and opaque, but stable enough in practice to serve as the
//! lookup anchors, mirroring how the page is actually scraped.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use instaprof_core::ProfileRecord;

const NAME_SELECTOR: &str = "h2.x1lliihq";
const BIO_SELECTOR: &str = "div.x1lliihq.x193iq5w span";
/// Stat spans are taken positionally from profile anchors, with no username
/// filter applied to the href.
const STAT_SELECTOR: &str = "a[href] span";
const WEBSITE_SELECTOR: &str = r#"a.x1i10hfl[href^="http"]"#;
const META_DESCRIPTION_SELECTOR: &str = r#"meta[name="description"]"#;
const GENERIC_PIC_ALT: &str = "Profile photo";

/// Extracts a [`ProfileRecord`] from rendered profile-page HTML.
///
/// Always returns a `success == true` record: fetch-level failures never
/// reach this function, and per-field misses only leave the field `None`
/// (with a warning logged).
#[must_use]
pub fn extract_profile(html: &str, username: &str) -> ProfileRecord {
    let document = Html::parse_document(html);
    let mut record = ProfileRecord::extracted(username);

    record.name = first_text(&document, NAME_SELECTOR);
    if record.name.is_none() {
        warn!("could not find profile name");
    }

    record.bio = first_text(&document, BIO_SELECTOR);
    if record.bio.is_none() {
        warn!("could not find bio");
    }

    // Fixed order: posts, followers, following. Fewer than three matches
    // leaves all three unset.
    let stats = stat_texts(&document);
    if stats.len() >= 3 {
        record.posts = Some(stats[0].clone());
        record.followers = Some(stats[1].clone());
        record.following = Some(stats[2].clone());
    } else {
        warn!("could not find post/follower/following stats");
    }

    record.website = first_attr(&document, WEBSITE_SELECTOR, "href");
    if record.website.is_none() {
        warn!("no website link found");
    }

    record.profile_pic_url = profile_pic_url(&document, username);
    if record.profile_pic_url.is_none() {
        warn!("could not find profile picture");
    }

    // Metadata fallback fills the bio only; the name is never backfilled.
    if record.bio.is_none() {
        record.bio = first_attr(&document, META_DESCRIPTION_SELECTOR, "content");
    }

    record
}

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("valid css selector")
}

fn element_text(element: ElementRef<'_>) -> Option<String> {
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_owned())
}

/// Trimmed text of the first element matching `css`; empty text is a miss.
fn first_text(document: &Html, css: &str) -> Option<String> {
    document.select(&selector(css)).find_map(element_text)
}

/// Attribute value of the first element matching `css` that carries it
/// non-empty.
fn first_attr(document: &Html, css: &str, attr: &str) -> Option<String> {
    document.select(&selector(css)).find_map(|el| {
        el.value()
            .attr(attr)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    })
}

/// Non-empty span texts under profile anchors, in document order.
fn stat_texts(document: &Html) -> Vec<String> {
    document
        .select(&selector(STAT_SELECTOR))
        .filter_map(element_text)
        .collect()
}

/// Profile picture located by alt-text convention: either the
/// username-specific alt or the generic "Profile photo".
fn profile_pic_url(document: &Html, username: &str) -> Option<String> {
    let expected_alt = format!("{username}'s profile picture");
    document
        .select(&selector("img[alt]"))
        .find(|img| {
            img.value()
                .attr("alt")
                .is_some_and(|alt| alt == expected_alt || alt == GENERIC_PIC_ALT)
        })
        .and_then(|img| img.value().attr("src").map(str::to_owned))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
