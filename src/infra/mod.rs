// Infrastructure adapters for application ports

pub mod report_output_adapter;

pub use report_output_adapter::JsonReportWriter;
