//! JSON-line report sink
//!
//! Writes each report as one compact JSON document followed by a newline
//! and flushes right away, so a log shipper tailing stdout sees every cycle
//! as soon as it finishes.

use std::io::{self, Write};

use application::error::ApplicationError;
use application::ports::ReportSink;
use domain::CollectionReport;
use parking_lot::Mutex;
use tracing::debug;

/// Sink writing one JSON line per report
pub struct JsonLineSink<W> {
    writer: Mutex<W>,
}

impl<W> std::fmt::Debug for JsonLineSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonLineSink").finish_non_exhaustive()
    }
}

impl JsonLineSink<io::Stdout> {
    /// Sink writing to the process's standard output
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> JsonLineSink<W> {
    /// Sink writing to an arbitrary writer
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write + Send> ReportSink for JsonLineSink<W> {
    fn emit(&self, report: &CollectionReport) -> Result<(), ApplicationError> {
        let line = report
            .to_json_line()
            .map_err(|e| ApplicationError::Internal(format!("Failed to serialize report: {e}")))?;

        let mut writer = self.writer.lock();
        writeln!(writer, "{line}")
            .and_then(|()| writer.flush())
            .map_err(|e| ApplicationError::Output(format!("Failed to write report: {e}")))?;

        debug!(bytes = line.len() + 1, "Report written");
        Ok(())
    }
}
