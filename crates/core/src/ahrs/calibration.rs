//! Startup bias calibration
//!
//! The sensor is assumed still while `sample_count` readings are averaged.
//! The averages become the gyro rate bias and, when roll/pitch are tracked,
//! the accelerometer tilt-angle bias.

use super::traits::{ImuError, ImuSource, TrackedAxes};
use nalgebra::{Vector2, Vector3};

/// Default number of samples averaged at startup
pub const DEFAULT_CALIBRATION_SAMPLES: u16 = 200;

/// Biases subtracted from every reading once calibration completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationBias {
    /// Accelerometer tilt-angle bias, x/y (°)
    pub accel_angle_bias: Vector2<f32>,
    /// Gyro rate bias (°/s)
    pub gyro_rate_bias: Vector3<f32>,
}

impl Default for CalibrationBias {
    /// Zero bias
    fn default() -> Self {
        Self {
            accel_angle_bias: Vector2::zeros(),
            gyro_rate_bias: Vector3::zeros(),
        }
    }
}

/// Tilt angles from a gravity vector (°)
///
/// ```text
/// x = atan( ay / sqrt(ax² + az²)) * 180/π
/// y = atan(-ax / sqrt(ay² + az²)) * 180/π
/// ```
pub fn accel_tilt_angles(accel: &Vector3<f32>) -> Vector2<f32> {
    let x = libm::atanf(accel.y / libm::sqrtf(accel.x * accel.x + accel.z * accel.z));
    let y = libm::atanf(-accel.x / libm::sqrtf(accel.y * accel.y + accel.z * accel.z));
    Vector2::new(x.to_degrees(), y.to_degrees())
}

/// Tilt angles, or `None` when the sample has no usable gravity direction
/// (an all-zero or non-finite reading)
pub fn checked_tilt_angles(accel: &Vector3<f32>) -> Option<Vector2<f32>> {
    let tilt = accel_tilt_angles(accel);
    (tilt.x.is_finite() && tilt.y.is_finite()).then_some(tilt)
}

/// Incremental bias estimator
///
/// Sums are kept in `f64` so that averaging N identical samples gives the
/// sample value back exactly.
#[derive(Debug, Clone)]
pub struct BiasAccumulator {
    target: u16,
    count: u16,
    gyro_sum: [f64; 3],
    tilt_sum: [f64; 2],
}

impl BiasAccumulator {
    /// Create an accumulator expecting `target` samples (at least one)
    pub fn new(target: u16) -> Self {
        Self {
            target: target.max(1),
            count: 0,
            gyro_sum: [0.0; 3],
            tilt_sum: [0.0; 2],
        }
    }

    /// Add a yaw-only sample (Z rate, °/s)
    pub fn add_gyro_z(&mut self, rate_z: f32) {
        if self.is_complete() {
            return;
        }
        self.gyro_sum[2] += rate_z as f64;
        self.count += 1;
    }

    /// Add a full sample: tilt angles are derived from the accelerometer.
    ///
    /// A sample without a usable tilt is refused with
    /// [`ImuError::InvalidData`] and not counted.
    pub fn add_sample(
        &mut self,
        gyro_rate: &Vector3<f32>,
        accel: &Vector3<f32>,
    ) -> Result<(), ImuError> {
        if self.is_complete() {
            return Ok(());
        }
        let tilt = checked_tilt_angles(accel).ok_or(ImuError::InvalidData)?;
        for (sum, value) in self.gyro_sum.iter_mut().zip(gyro_rate.iter()) {
            *sum += *value as f64;
        }
        self.tilt_sum[0] += tilt.x as f64;
        self.tilt_sum[1] += tilt.y as f64;
        self.count += 1;
        Ok(())
    }

    /// Samples collected so far
    pub fn count(&self) -> u16 {
        self.count
    }

    /// Fraction of the target collected, 0.0 to 1.0
    pub fn progress(&self) -> f32 {
        self.count as f32 / self.target as f32
    }

    pub fn is_complete(&self) -> bool {
        self.count >= self.target
    }

    /// Compute the bias. Returns `None` until the target is reached.
    pub fn finish(&self) -> Option<CalibrationBias> {
        if !self.is_complete() {
            return None;
        }
        let n = self.count as f64;
        Some(CalibrationBias {
            accel_angle_bias: Vector2::new(
                (self.tilt_sum[0] / n) as f32,
                (self.tilt_sum[1] / n) as f32,
            ),
            gyro_rate_bias: Vector3::new(
                (self.gyro_sum[0] / n) as f32,
                (self.gyro_sum[1] / n) as f32,
                (self.gyro_sum[2] / n) as f32,
            ),
        })
    }
}

/// Blocking startup calibration
#[derive(Debug, Clone, Copy)]
pub struct ImuCalibrator {
    axes: TrackedAxes,
    sample_count: u16,
}

impl ImuCalibrator {
    pub fn new(axes: TrackedAxes, sample_count: u16) -> Self {
        Self {
            axes,
            sample_count: sample_count.max(1),
        }
    }

    pub fn axes(&self) -> TrackedAxes {
        self.axes
    }

    pub fn sample_count(&self) -> u16 {
        self.sample_count
    }

    /// Read `sample_count` samples and average them.
    ///
    /// Yaw-only calibration reads just the Z rate. Any read failure, or an
    /// accelerometer sample without a usable tilt, aborts.
    pub fn run<I: ImuSource>(&self, imu: &mut I) -> Result<CalibrationBias, ImuError> {
        let mut acc = BiasAccumulator::new(self.sample_count);
        while !acc.is_complete() {
            match self.axes {
                TrackedAxes::YawOnly => acc.add_gyro_z(imu.read_gyro_z()?),
                TrackedAxes::RollPitchYaw => {
                    let sample = imu.read_sample()?;
                    acc.add_sample(&sample.gyro_rate, &sample.accel)?;
                }
            }
        }
        acc.finish().ok_or(ImuError::InvalidData)
    }
}
