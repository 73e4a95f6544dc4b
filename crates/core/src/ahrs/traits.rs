//! IMU source trait and sample types
//!
//! The calibrator and the orientation estimator consume angular rate and
//! acceleration through [`ImuSource`]. Drivers (MPU-6050 over I2C, simulators,
//! test doubles) implement it.
//!
//! Units follow the hobby-IMU convention the fusion math is tuned for:
//! acceleration in g, angular rate in degrees per second.

use crate::traits::BusError;
use nalgebra::Vector3;

/// IMU error types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImuError {
    /// Register bus transfer failed
    Bus(BusError),
    /// Device identity check failed or device not woken up
    NotInitialized,
    /// Device returned data that cannot be used
    InvalidData,
}

impl ImuError {
    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            ImuError::Bus(_) => "Bus",
            ImuError::NotInitialized => "NotInitialized",
            ImuError::InvalidData => "InvalidData",
        }
    }
}

impl From<BusError> for ImuError {
    fn from(err: BusError) -> Self {
        ImuError::Bus(err)
    }
}

impl core::fmt::Display for ImuError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ImuError::Bus(e) => write!(f, "IMU bus error: {}", e),
            ImuError::NotInitialized => write!(f, "IMU not initialized"),
            ImuError::InvalidData => write!(f, "IMU returned invalid data"),
        }
    }
}

/// Axes fused by the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrackedAxes {
    /// Yaw from the Z gyro only
    #[default]
    YawOnly,
    /// Roll and pitch (complementary filter) plus yaw
    RollPitchYaw,
}

impl TrackedAxes {
    /// Whether roll/pitch tilt from the accelerometer is used
    pub fn uses_accel(self) -> bool {
        matches!(self, TrackedAxes::RollPitchYaw)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrackedAxes::YawOnly => "YawOnly",
            TrackedAxes::RollPitchYaw => "RollPitchYaw",
        }
    }

    /// Parameter-store encoding (0 = yaw only, 1 = roll/pitch/yaw)
    pub fn id(self) -> i32 {
        match self {
            TrackedAxes::YawOnly => 0,
            TrackedAxes::RollPitchYaw => 1,
        }
    }

    /// Decode the parameter-store encoding
    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            0 => Some(TrackedAxes::YawOnly),
            1 => Some(TrackedAxes::RollPitchYaw),
            _ => None,
        }
    }
}

/// One scaled IMU sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImuSample {
    /// Acceleration (g)
    pub accel: Vector3<f32>,
    /// Angular rate (°/s)
    pub gyro_rate: Vector3<f32>,
}

/// Scaled IMU readings
pub trait ImuSource {
    /// Read angular rate on all three axes (°/s).
    fn read_gyro(&mut self) -> Result<Vector3<f32>, ImuError>;

    /// Read acceleration on all three axes (g).
    fn read_accel(&mut self) -> Result<Vector3<f32>, ImuError>;

    /// Read the Z (yaw) angular rate (°/s).
    ///
    /// Drivers should override this when the Z axis can be read on its own.
    fn read_gyro_z(&mut self) -> Result<f32, ImuError> {
        Ok(self.read_gyro()?.z)
    }

    /// Read accelerometer and gyroscope together.
    fn read_sample(&mut self) -> Result<ImuSample, ImuError> {
        let accel = self.read_accel()?;
        let gyro_rate = self.read_gyro()?;
        Ok(ImuSample { accel, gyro_rate })
    }
}
