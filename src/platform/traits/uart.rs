//! UART interface trait

use crate::platform::Result;

/// UART configuration
#[derive(Debug, Clone, Copy)]
pub struct UartConfig {
    pub baud_rate: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self { baud_rate: 115_200 }
    }
}

impl UartConfig {
    /// TF-Mini default link rate
    pub const LIDAR: Self = Self { baud_rate: 115_200 };
    /// Telemetry link to the host viewer
    pub const TELEMETRY: Self = Self { baud_rate: 9_600 };
}

/// UART interface trait
///
/// Reads never block: they return whatever is already buffered.
pub trait UartInterface {
    /// Write bytes, returning how many were accepted
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read up to `buffer.len()` buffered bytes, returning how many were read
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Returns `true` if at least one byte is buffered
    fn available(&mut self) -> bool;

    /// Block until all written bytes have left the transmitter
    fn flush(&mut self) -> Result<()>;
}
