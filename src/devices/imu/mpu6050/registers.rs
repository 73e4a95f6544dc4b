//! MPU-6050 registers used by the driver
//!
//! Addresses from the MPU-6000/MPU-6050 Register Map (RM-MPU-6000A-00 v4.2).

/// I2C address with AD0 low
pub const MPU6050_ADDR: u8 = 0x68;

/// Gyroscope configuration (FS_SEL in bits 4:3)
pub const GYRO_CONFIG: u8 = 0x1B;

/// Accelerometer configuration (AFS_SEL in bits 4:3)
pub const ACCEL_CONFIG: u8 = 0x1C;

// Data registers are big-endian, high byte first

pub const ACCEL_XOUT_H: u8 = 0x3B;
pub const GYRO_XOUT_H: u8 = 0x43;
pub const GYRO_ZOUT_H: u8 = 0x47;

/// Accel, temperature and gyro as one burst starting at `ACCEL_XOUT_H`
pub const SENSOR_BURST_LEN: usize = 14;

pub const PWR_MGMT_1: u8 = 0x6B;

/// Clear SLEEP, internal 8 MHz oscillator
pub const PWR_MGMT_1_WAKE: u8 = 0x00;

pub const WHO_AM_I: u8 = 0x75;

/// Expected WHO_AM_I value
pub const MPU6050_WHO_AM_I_VALUE: u8 = 0x68;

/// Settle time after each bring-up step and around calibration
pub const SETTLE_MS: u32 = 20;
