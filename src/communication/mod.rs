//! Communication
//!
//! Outbound telemetry. Reports leave the device as CRLF-terminated text lines
//! on a UART (9600 baud, 8N1 by default).

pub mod report_sink;

pub use report_sink::UartReportSink;
