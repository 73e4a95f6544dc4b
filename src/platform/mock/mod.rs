//! In-memory peripherals
//!
//! Built for unit tests and, with the `mock` feature, for host-side
//! integration tests and simulation.

#![cfg(any(test, feature = "mock"))]

mod i2c;
mod timer;
mod uart;

pub use i2c::{I2cOp, MockI2c};
pub use timer::MockTimer;
pub use uart::MockUart;
