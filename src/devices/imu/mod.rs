//! IMU Drivers
//!
//! Drivers implement `heading_fuse_core::ahrs::ImuSource` over a
//! `RegisterBus`.
//!
//! - `mpu6050`: MPU-6050 6-axis IMU

pub mod mpu6050;

pub use mpu6050::{AccelRange, GyroRange, Mpu6050, Mpu6050Config};
