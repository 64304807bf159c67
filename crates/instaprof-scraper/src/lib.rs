pub mod error;
pub mod extract;
pub mod fetch;
pub mod output;
pub mod session;

pub use error::{FetchError, OutputError, SessionError};
pub use extract::extract_profile;
pub use fetch::fetch_profile_html;
pub use session::{BrowserSession, SessionConfig};
