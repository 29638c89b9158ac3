use std::future::Future;
use std::path::Path;

use crate::error::AppError;
use crate::models::JobRecord;

/// A browser session positioned on the target site.
///
/// One implementation drives a real headless browser; tests substitute a
/// scripted mock. All three calls act on the same underlying tab, so the
/// session carries navigation state between them.
pub trait PageSession: Send + Sync + Clone {
    /// Navigate to `url`, wait for the page-loaded marker, and return the
    /// fully rendered HTML.
    fn open(&self, url: &str) -> impl Future<Output = Result<String, AppError>> + Send;

    /// Wait for the marker on whatever page the tab currently shows and
    /// return its rendered HTML. Used for pages reached via [`advance`],
    /// which navigates by clicking rather than by URL.
    ///
    /// [`advance`]: PageSession::advance
    fn snapshot(&self) -> impl Future<Output = Result<String, AppError>> + Send;

    /// Trigger the next-page control.
    ///
    /// Returns `Ok(false)` when the control is absent or disabled (true
    /// end-of-results), `Ok(true)` after a successful click plus settle
    /// delay. A click that fails mid-flight is an `Err`, which the driver
    /// treats the same as end-of-results.
    fn advance(&self) -> impl Future<Output = Result<bool, AppError>> + Send;
}

/// Persists a collected batch of records.
pub trait RecordSink {
    /// Write all records to `destination`, replacing any existing content.
    /// Returns the number of rows written.
    fn save(&self, records: &[JobRecord], destination: &Path) -> Result<usize, AppError>;
}
