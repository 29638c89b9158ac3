use std::path::Path;

use crate::error::AppError;
use crate::models::JobRecord;
use crate::traits::RecordSink;

/// Writes the collected records as a flat CSV table.
///
/// One row per record, header row from the [`JobRecord`] field names, fixed
/// column order: title, company, department, location, posted_date,
/// job_link, job_id. The destination is replaced wholesale on every save.
#[derive(Debug, Clone, Default)]
pub struct CsvSink;

impl CsvSink {
    pub fn new() -> Self {
        Self
    }
}

impl RecordSink for CsvSink {
    fn save(&self, records: &[JobRecord], destination: &Path) -> Result<usize, AppError> {
        let mut writer = csv::Writer::from_path(destination)?;
        for record in records {
            writer.serialize(record)?;
        }
        writer.flush()?;

        tracing::info!(
            count = records.len(),
            path = %destination.display(),
            "Saved jobs to CSV"
        );
        Ok(records.len())
    }
}
