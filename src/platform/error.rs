//! Errors raised by the UART, I2C and timer abstractions
//!
//! HAL adapters fold their vendor errors into these enums; device drivers see
//! them only after conversion into [`BusError`].

use core::fmt;
use heading_fuse_core::traits::BusError;

pub type Result<T> = core::result::Result<T, PlatformError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformError {
    Uart(UartError),
    I2c(I2cError),
    Timer(TimerError),
    /// A peripheral was configured with values it cannot honour
    InvalidConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UartError {
    WriteFailed,
    ReadFailed,
    /// Receive FIFO overflowed and bytes were dropped
    Overrun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cError {
    /// Bus fault other than NACK or arbitration (framing, stuck lines)
    BusError,
    /// Target did not acknowledge its address or a data byte
    Nack,
    ArbitrationLost,
    Timeout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerError {
    InvalidDuration,
}

impl UartError {
    pub fn as_str(&self) -> &'static str {
        match self {
            UartError::WriteFailed => "write failed",
            UartError::ReadFailed => "read failed",
            UartError::Overrun => "overrun",
        }
    }
}

impl I2cError {
    pub fn as_str(&self) -> &'static str {
        match self {
            I2cError::BusError => "bus fault",
            I2cError::Nack => "nack",
            I2cError::ArbitrationLost => "arbitration lost",
            I2cError::Timeout => "timeout",
        }
    }
}

impl PlatformError {
    /// Peripheral the error came from
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformError::Uart(_) => "Uart",
            PlatformError::I2c(_) => "I2c",
            PlatformError::Timer(_) => "Timer",
            PlatformError::InvalidConfig => "InvalidConfig",
        }
    }
}

impl fmt::Display for PlatformError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlatformError::Uart(e) => write!(f, "uart: {}", e.as_str()),
            PlatformError::I2c(e) => write!(f, "i2c: {}", e.as_str()),
            PlatformError::Timer(TimerError::InvalidDuration) => {
                f.write_str("timer: invalid duration")
            }
            PlatformError::InvalidConfig => f.write_str("invalid peripheral configuration"),
        }
    }
}

/// NACK and timeout keep their meaning for drivers; everything else is a
/// failed transfer.
impl From<PlatformError> for BusError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::I2c(I2cError::Nack) => BusError::Nack,
            PlatformError::I2c(I2cError::Timeout) => BusError::Timeout,
            _ => BusError::TransferFailed,
        }
    }
}
