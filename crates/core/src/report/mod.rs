//! Fused telemetry reports
//!
//! - [`types`]: report record, status enums and composition
//! - [`line`]: text line codec consumed by the host viewer
//! - [`sink`]: output trait

pub mod line;
pub mod sink;
pub mod types;

pub use line::{
    format_line, parse_line, write_line, LineError, ParsedLine, LINE_END, REPORT_LINE_CAPACITY,
};
pub use sink::{ReportSink, SinkError};
pub use types::{
    Direction, FusedReport, GyroStatus, ObjectStatus, ReportConfig, ReportFields,
    DEFAULT_GYRO_THRESHOLD,
};
