pub mod crawl;
pub mod error;
pub mod extract;
pub mod models;
pub mod profile;
pub mod sink;
pub mod testutil;
pub mod traits;

pub use crawl::{CrawlConfig, CrawlOutcome, CrawlService};
pub use error::AppError;
pub use models::{JobRecord, NOT_SPECIFIED};
pub use profile::SiteProfile;
pub use sink::CsvSink;
pub use traits::{PageSession, RecordSink};
