//! Device drivers
//!
//! Drivers are written against the platform traits and the core transport
//! traits, so the same code runs on hardware and against mocks.
//!
//! ## Modules
//!
//! - `bus`: UART → `ByteSource` and I2C → `RegisterBus` adapters
//! - `imu`: MPU-6050 driver
//! - `lidar`: TF-Mini LiDAR driver

pub mod bus;
pub mod imu;
pub mod lidar;
