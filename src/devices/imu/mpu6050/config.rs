//! MPU-6050 driver configuration

use super::registers::MPU6050_ADDR;

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GyroRange {
    Dps250,
    Dps500,
    /// ±1000 °/s
    #[default]
    Dps1000,
    Dps2000,
}

impl GyroRange {
    /// `GYRO_CONFIG` value (FS_SEL in bits 4:3)
    pub fn register_value(self) -> u8 {
        match self {
            GyroRange::Dps250 => 0x00,
            GyroRange::Dps500 => 0x08,
            GyroRange::Dps1000 => 0x10,
            GyroRange::Dps2000 => 0x18,
        }
    }

    /// LSB per °/s
    pub fn sensitivity(self) -> f32 {
        match self {
            GyroRange::Dps250 => 131.0,
            GyroRange::Dps500 => 65.5,
            GyroRange::Dps1000 => 32.8,
            GyroRange::Dps2000 => 16.4,
        }
    }
}

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccelRange {
    G2,
    G4,
    /// ±8 g
    #[default]
    G8,
    G16,
}

impl AccelRange {
    /// `ACCEL_CONFIG` value (AFS_SEL in bits 4:3)
    pub fn register_value(self) -> u8 {
        match self {
            AccelRange::G2 => 0x00,
            AccelRange::G4 => 0x08,
            AccelRange::G8 => 0x10,
            AccelRange::G16 => 0x18,
        }
    }

    /// LSB per g
    pub fn sensitivity(self) -> f32 {
        match self {
            AccelRange::G2 => 16384.0,
            AccelRange::G4 => 8192.0,
            AccelRange::G8 => 4096.0,
            AccelRange::G16 => 2048.0,
        }
    }
}

/// MPU-6050 driver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mpu6050Config {
    /// 7-bit I2C address
    pub address: u8,
    pub gyro_range: GyroRange,
    pub accel_range: AccelRange,
}

impl Default for Mpu6050Config {
    fn default() -> Self {
        Self {
            address: MPU6050_ADDR,
            gyro_range: GyroRange::default(),
            accel_range: AccelRange::default(),
        }
    }
}
