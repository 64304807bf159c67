//! Integration tests for the output serializer.
//!
//! Filesystem cases run against `tempfile` directories; the picture
//! download runs against a local `wiremock` server so no real network
//! traffic is made.

use instaprof_core::ProfileRecord;
use instaprof_scraper::output::{download_picture, http_client, write_csv, write_json};

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn nasa_record() -> ProfileRecord {
    let mut record = ProfileRecord::extracted("nasa");
    record.name = Some("NASA".to_owned());
    record.bio = Some("Exploring the universe\nOne launch at a time".to_owned());
    record.posts = Some("1,000 posts".to_owned());
    record.followers = Some("1M followers".to_owned());
    record.following = Some("50 following".to_owned());
    record
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

#[test]
fn write_json_creates_directory_and_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("data");
    let record = nasa_record();

    let path = write_json(&record, &out).expect("expected a written path");
    assert_eq!(path, out.join("profile_nasa.json"));

    let body = std::fs::read_to_string(&path).unwrap();
    let parsed: ProfileRecord = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, record, "file contents must round-trip exactly");
}

#[test]
fn write_json_returns_none_when_destination_is_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    // A file where the directory should be makes create_dir_all fail.
    let blocker = dir.path().join("data");
    std::fs::write(&blocker, b"occupied").unwrap();

    assert_eq!(write_json(&nasa_record(), &blocker), None);
}

// ---------------------------------------------------------------------------
// CSV
// ---------------------------------------------------------------------------

#[test]
fn write_csv_skips_failure_records_entirely() {
    let dir = tempfile::tempdir().unwrap();
    let record = ProfileRecord::failed("ghost", "Profile not found or private");

    assert_eq!(write_csv(&record, dir.path()), None);
    assert!(
        !dir.path().join("profile_ghost.csv").exists(),
        "no CSV file may exist for a failure record"
    );
}

#[test]
fn write_csv_emits_fixed_header_and_flattened_bio() {
    let dir = tempfile::tempdir().unwrap();
    let record = nasa_record();

    let path = write_csv(&record, dir.path()).expect("expected a written path");
    assert_eq!(path, dir.path().join("profile_nasa.csv"));

    let body = std::fs::read_to_string(&path).unwrap();
    let mut lines = body.lines();
    assert_eq!(
        lines.next().unwrap(),
        "username,name,bio,followers,following,posts,website,profile_url,profile_pic_url,scraped_at"
    );
    let row = lines.next().unwrap();
    assert!(
        row.contains("Exploring the universe One launch at a time"),
        "bio newlines must be flattened to spaces, got: {row}"
    );
    assert!(lines.next().is_none(), "exactly one data row expected");
}

// ---------------------------------------------------------------------------
// Picture download
// ---------------------------------------------------------------------------

#[tokio::test]
async fn download_picture_writes_body_bytes_to_named_file() {
    let server = MockServer::start().await;
    let image = b"\xff\xd8\xff\xe0 not really a jpeg".to_vec();

    Mock::given(method("GET"))
        .and(path("/pic.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(image.clone()))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = http_client().unwrap();
    let url = format!("{}/pic.jpg", server.uri());

    let saved = download_picture(&client, &url, "nasa", dir.path())
        .await
        .expect("expected a written path");
    assert_eq!(saved, dir.path().join("nasa_profile.jpg"));
    assert_eq!(std::fs::read(&saved).unwrap(), image);
}

#[tokio::test]
async fn download_picture_404_leaves_no_file() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/pic.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let client = http_client().unwrap();
    let url = format!("{}/pic.jpg", server.uri());

    assert_eq!(download_picture(&client, &url, "nasa", dir.path()).await, None);
    assert!(!dir.path().join("nasa_profile.jpg").exists());
}

#[tokio::test]
async fn download_picture_connection_error_leaves_no_file() {
    // Grab a URI, then drop the server so the connection is refused.
    let server = MockServer::start().await;
    let url = format!("{}/pic.jpg", server.uri());
    drop(server);

    let dir = tempfile::tempdir().unwrap();
    let client = http_client().unwrap();

    assert_eq!(download_picture(&client, &url, "nasa", dir.path()).await, None);
    assert!(!dir.path().join("nasa_profile.jpg").exists());
}

#[tokio::test]
async fn failed_download_does_not_disturb_json_or_csv_output() {
    let dir = tempfile::tempdir().unwrap();
    let record = nasa_record();

    let json_path = write_json(&record, dir.path()).unwrap();
    let csv_path = write_csv(&record, dir.path()).unwrap();
    let json_before = std::fs::read_to_string(&json_path).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pic.jpg"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = http_client().unwrap();
    let url = format!("{}/pic.jpg", server.uri());
    assert_eq!(download_picture(&client, &url, "nasa", dir.path()).await, None);

    assert_eq!(std::fs::read_to_string(&json_path).unwrap(), json_before);
    assert!(csv_path.exists());
}
