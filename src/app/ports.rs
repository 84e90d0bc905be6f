use serde::Serialize;

use crate::error::Result;

/// Where a finished pipeline report goes. The pipelines never print on their own.
pub trait ReportOutputPort: Send + Sync {
    fn write_report(&self, report: &serde_json::Value) -> Result<()>;
}

/// Serializes any report and hands it to the port.
pub fn publish<T: Serialize>(port: &dyn ReportOutputPort, report: &T) -> Result<()> {
    let value = serde_json::to_value(report)?;
    port.write_report(&value)
}
