pub mod record;
pub mod report;

pub use record::{profile_url, ProfileRecord};
pub use report::format_summary;
