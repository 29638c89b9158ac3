use thiserror::Error;

/// Application-wide error types for jobsift.
#[derive(Error, Debug)]
pub enum AppError {
    /// Browser process could not be launched or configured.
    #[error("Browser error: {0}")]
    Browser(String),

    /// Navigating to a page or reading its rendered content failed.
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// The page-loaded marker never appeared within the wait bound.
    #[error("Timed out after {0} seconds waiting for page content")]
    Timeout(u64),

    /// Triggering the next-page control failed (missing, stale, click error).
    #[error("Pagination error: {0}")]
    Pagination(String),

    /// CSV serialization/write failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}
