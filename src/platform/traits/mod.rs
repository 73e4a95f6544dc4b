//! Peripheral traits the drivers are written against

pub mod i2c;
pub mod timer;
pub mod uart;

pub use i2c::{I2cConfig, I2cInterface};
pub use timer::TimerInterface;
pub use uart::{UartConfig, UartInterface};
