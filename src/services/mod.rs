//! Report services.

pub mod demand_report;

pub use demand_report::{DemandReport, DemandReportService, ReportError};
