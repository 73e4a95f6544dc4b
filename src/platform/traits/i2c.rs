//! Blocking I2C master

use crate::platform::Result;

#[derive(Debug, Clone, Copy)]
pub struct I2cConfig {
    /// SCL rate in Hz
    pub frequency: u32,
}

impl Default for I2cConfig {
    /// 400 kHz fast mode, the MPU-6050 maximum
    fn default() -> Self {
        Self { frequency: 400_000 }
    }
}

/// Blocking I2C master with 7-bit addressing
///
/// Failures (NACK, lost arbitration, timeout) surface as
/// `PlatformError::I2c`.
pub trait I2cInterface {
    /// Send `data` to `addr` in one transaction
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()>;

    /// Fill `buffer` from `addr` in one transaction
    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()>;

    /// Send `write_data`, then read into `read_buffer` after a repeated start.
    ///
    /// Register reads put the start register in `write_data`.
    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()>;
}
