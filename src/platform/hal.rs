//! Adapters from `embedded-hal` / `embedded-io` peripherals
//!
//! Any HAL that implements the ecosystem traits (rp-hal, esp-hal, stm32 HALs,
//! linux-embedded-hal) plugs into the platform traits through these wrappers.

use crate::platform::{
    error::{I2cError, PlatformError, UartError},
    traits::{I2cInterface, TimerInterface, UartInterface},
    Result,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::{Error as _, ErrorKind, I2c};
use embedded_io::{Read, ReadReady, Write};
use heading_fuse_core::traits::TimeSource;

fn map_i2c_error(kind: ErrorKind) -> PlatformError {
    let err = match kind {
        ErrorKind::NoAcknowledge(_) => I2cError::Nack,
        ErrorKind::ArbitrationLoss => I2cError::ArbitrationLost,
        _ => I2cError::BusError,
    };
    PlatformError::I2c(err)
}

/// [`I2cInterface`] over an `embedded_hal::i2c::I2c` bus
pub struct HalI2c<I> {
    inner: I,
}

impl<I: I2c> HalI2c<I> {
    pub fn new(inner: I) -> Self {
        Self { inner }
    }

    /// Give the bus back
    pub fn release(self) -> I {
        self.inner
    }
}

impl<I: I2c> I2cInterface for HalI2c<I> {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.inner
            .write(addr, data)
            .map_err(|e| map_i2c_error(e.kind()))
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.inner
            .read(addr, buffer)
            .map_err(|e| map_i2c_error(e.kind()))
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.inner
            .write_read(addr, write_data, read_buffer)
            .map_err(|e| map_i2c_error(e.kind()))
    }
}

/// [`UartInterface`] over an `embedded-io` serial port
pub struct IoUart<U> {
    inner: U,
}

impl<U: Read + Write + ReadReady> IoUart<U> {
    pub fn new(inner: U) -> Self {
        Self { inner }
    }

    pub fn release(self) -> U {
        self.inner
    }
}

impl<U: Read + Write + ReadReady> UartInterface for IoUart<U> {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.inner
            .write(data)
            .map_err(|_| PlatformError::Uart(UartError::WriteFailed))
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        // embedded-io reads block when nothing is buffered
        if buffer.is_empty() || !self.available() {
            return Ok(0);
        }
        self.inner
            .read(buffer)
            .map_err(|_| PlatformError::Uart(UartError::ReadFailed))
    }

    fn available(&mut self) -> bool {
        self.inner.read_ready().unwrap_or(false)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner
            .flush()
            .map_err(|_| PlatformError::Uart(UartError::WriteFailed))
    }
}

/// [`TimerInterface`] from an `embedded-hal` delay and a monotonic clock
pub struct DelayTimer<D, T> {
    delay: D,
    clock: T,
}

impl<D: DelayNs, T: TimeSource> DelayTimer<D, T> {
    pub fn new(delay: D, clock: T) -> Self {
        Self { delay, clock }
    }
}

impl<D: DelayNs, T: TimeSource> TimerInterface for DelayTimer<D, T> {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.delay.delay_us(us);
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay.delay_ms(ms);
        Ok(())
    }

    fn now_us(&self) -> u64 {
        self.clock.now_us()
    }
}
