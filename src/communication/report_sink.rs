//! UART Report Sink
//!
//! Streams fused reports as telemetry lines over a serial port.
//!
//! # Wire format
//!
//! One ASCII line per report, CRLF terminated:
//!
//! ```text
//! distance=42,yaw=123.45,direction=Right,object=Detected,gyro=Moving
//! ```
//!
//! Optional fields follow the report's enabled set.
//!
//! # Usage
//!
//! ```ignore
//! use heading_fuse::communication::UartReportSink;
//! use heading_fuse_core::report::ReportSink;
//!
//! let mut sink = UartReportSink::new(uart);
//! sink.emit(&report)?;
//! ```

use crate::platform::UartInterface;
use heading_fuse_core::report::{format_line, FusedReport, ReportSink, SinkError};

/// Telemetry line writer over a UART
pub struct UartReportSink<U: UartInterface> {
    uart: U,
    lines_sent: u32,
}

impl<U: UartInterface> UartReportSink<U> {
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            lines_sent: 0,
        }
    }

    /// Lines fully written so far
    pub fn lines_sent(&self) -> u32 {
        self.lines_sent
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    pub fn release(self) -> U {
        self.uart
    }

    fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), SinkError> {
        while !bytes.is_empty() {
            let written = self
                .uart
                .write(bytes)
                .map_err(|_| SinkError::Transport)?;
            if written == 0 {
                return Err(SinkError::Transport);
            }
            bytes = &bytes[written.min(bytes.len())..];
        }
        Ok(())
    }
}

impl<U: UartInterface> ReportSink for UartReportSink<U> {
    fn emit(&mut self, report: &FusedReport) -> Result<(), SinkError> {
        let line = format_line(report).map_err(|_| SinkError::Format)?;
        self.write_all(line.as_bytes())?;
        self.lines_sent = self.lines_sent.wrapping_add(1);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::MockUart;
    use crate::platform::traits::UartConfig;
    use heading_fuse_core::report::{Direction, GyroStatus, ObjectStatus};

    fn report() -> FusedReport {
        FusedReport {
            distance: 42,
            strength: 100,
            roll: 0.0,
            pitch: 0.0,
            yaw: 123.456,
            yaw_rate: 2.0,
            direction: Some(Direction::Right),
            object: Some(ObjectStatus::Detected),
            gyro: Some(GyroStatus::Moving),
            orientation_valid: true,
        }
    }

    #[test]
    fn emits_one_crlf_line_per_report() {
        let mut sink = UartReportSink::new(MockUart::new(UartConfig::TELEMETRY));
        sink.emit(&report()).unwrap();
        sink.emit(&FusedReport {
            direction: None,
            object: None,
            gyro: None,
            ..report()
        })
        .unwrap();

        let text = core::str::from_utf8(sink.uart().sent()).unwrap();
        assert_eq!(
            text,
            "distance=42,yaw=123.46,direction=Right,object=Detected,gyro=Moving\r\n\
             distance=42,yaw=123.46\r\n"
        );
        assert_eq!(sink.lines_sent(), 2);
    }

    #[test]
    fn write_failure_is_transport_error() {
        let mut uart = MockUart::new(UartConfig::TELEMETRY);
        uart.fail_writes(true);
        let mut sink = UartReportSink::new(uart);

        assert_eq!(sink.emit(&report()), Err(SinkError::Transport));
        assert_eq!(sink.lines_sent(), 0);
    }

    #[test]
    fn short_writes_are_completed() {
        let mut uart = MockUart::new(UartConfig::TELEMETRY);
        uart.limit_write_chunk(Some(3));
        let mut sink = UartReportSink::new(uart);

        sink.emit(&report()).unwrap();
        assert_eq!(
            sink.uart().sent(),
            b"distance=42,yaw=123.46,direction=Right,object=Detected,gyro=Moving\r\n"
        );
    }
}
