//! Report output seam

use super::types::FusedReport;

/// Sink error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkError {
    /// Report did not fit the line buffer
    Format,
    /// Underlying transport rejected the write
    Transport,
}

impl SinkError {
    pub fn as_str(&self) -> &'static str {
        match self {
            SinkError::Format => "Format",
            SinkError::Transport => "Transport",
        }
    }
}

impl core::fmt::Display for SinkError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SinkError::Format => write!(f, "report line formatting failed"),
            SinkError::Transport => write!(f, "report transport write failed"),
        }
    }
}

/// Destination for fused reports (serial port, log, test capture)
pub trait ReportSink {
    fn emit(&mut self, report: &FusedReport) -> Result<(), SinkError>;
}
