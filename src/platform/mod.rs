//! Platform abstraction layer
//!
//! Peripheral traits the drivers are written against, adapters from the
//! `embedded-hal` / `embedded-io` ecosystem, and in-memory mocks.

pub mod error;
pub mod hal;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export commonly used types
pub use error::{PlatformError, Result};
pub use traits::{I2cInterface, TimerInterface, UartInterface};
