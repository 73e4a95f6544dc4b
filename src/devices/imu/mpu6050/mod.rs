//! MPU-6050 6-Axis IMU Driver
//!
//! Register-bus driver for the InvenSense MPU-6050.
//!
//! ## Features
//!
//! - 3-axis gyroscope: ±250, ±500, ±1000, ±2000 °/s
//! - 3-axis accelerometer: ±2, ±4, ±8, ±16 g
//! - Z-only gyro read for yaw-only deployments
//! - Single 14-byte burst for combined accel + gyro samples
//!
//! ## Usage
//!
//! ```ignore
//! use heading_fuse::devices::bus::I2cRegisterBus;
//! use heading_fuse::devices::imu::{Mpu6050, Mpu6050Config};
//!
//! let mut imu = Mpu6050::new(I2cRegisterBus::new(i2c), Mpu6050Config::default());
//! imu.init(&mut timer)?;
//! let yaw_rate = imu.read_gyro_z()?;
//! ```

mod config;
mod driver;
pub mod registers;

pub use config::{AccelRange, GyroRange, Mpu6050Config};
pub use driver::Mpu6050;
