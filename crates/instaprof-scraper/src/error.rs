use thiserror::Error;

/// Fatal session-launch failures. These abort the run before any output is
/// produced; nothing at this level is retried.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("failed to assemble browser config: {0}")]
    Config(String),

    #[error("failed to launch browser (is Chrome/Chromium installed?): {0}")]
    Launch(#[source] chromiumoxide::error::CdpError),
}

/// Page-fetch failures. Each variant's `Display` text is the exact `error`
/// string recorded on the failure `ProfileRecord`, so the messages here are
/// part of the output contract.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The landmark element never appeared within the page-load timeout.
    #[error("Failed to load profile page")]
    LoadTimeout,

    /// The page rendered Instagram's "not available" notice.
    #[error("Profile not found or private")]
    Unavailable,

    /// Any browser-protocol error mid-fetch.
    #[error("Unexpected error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),
}

/// Serialization and download failures. Callers catch these locally, log
/// them, and continue — output I/O is never fatal to the rest of the run.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
