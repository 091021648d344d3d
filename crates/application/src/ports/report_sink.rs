//! Report output port

use domain::CollectionReport;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Destination for finished collection reports
#[cfg_attr(test, automock)]
pub trait ReportSink: Send + Sync {
    /// Write one report
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Output`] if the report cannot be written.
    fn emit(&self, report: &CollectionReport) -> Result<(), ApplicationError>;
}
