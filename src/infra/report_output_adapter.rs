use std::io::{BufWriter, Write};
use std::sync::Mutex;

use crate::app::ports::ReportOutputPort;
use crate::error::{PipelineError, Result};

/// Writes each report as pretty-printed JSON followed by a newline.
pub struct JsonReportWriter<W: Write + Send> {
    writer: Mutex<BufWriter<W>>,
}

impl JsonReportWriter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write + Send> JsonReportWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(BufWriter::new(writer)),
        }
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        let writer = self
            .writer
            .into_inner()
            .map_err(|_| PipelineError::Config("report writer lock poisoned".to_string()))?;
        writer
            .into_inner()
            .map_err(|e| PipelineError::Io(e.into_error()))
    }
}

impl<W: Write + Send> ReportOutputPort for JsonReportWriter<W> {
    fn write_report(&self, report: &serde_json::Value) -> Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| PipelineError::Config("report writer lock poisoned".to_string()))?;
        serde_json::to_writer_pretty(&mut *writer, report)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
