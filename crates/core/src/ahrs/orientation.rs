//! Gyro-integrating orientation estimator
//!
//! Forward-Euler integration of bias-corrected angular rate. When roll and
//! pitch are tracked they are blended with accelerometer tilt through a
//! complementary filter:
//!
//! ```text
//! roll  = gyro_weight * gyro_angle.x + accel_weight * tilt.x
//! pitch = gyro_weight * gyro_angle.y + accel_weight * tilt.y
//! ```
//!
//! Yaw is gyro-only and kept in `[0, 360)`.

use super::angle::wrap_360;
use super::calibration::{checked_tilt_angles, CalibrationBias, DEFAULT_CALIBRATION_SAMPLES};
use super::traits::{ImuError, ImuSource, TrackedAxes};
use nalgebra::{Vector2, Vector3};

/// Default complementary-filter gyro weight
pub const DEFAULT_GYRO_WEIGHT: f32 = 0.96;

/// Default complementary-filter accelerometer weight
pub const DEFAULT_ACCEL_WEIGHT: f32 = 0.04;

/// Estimator configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AhrsConfig {
    /// Axes to track
    pub axes: TrackedAxes,
    /// Samples averaged during startup calibration
    pub calibration_samples: u16,
    /// Weight of the integrated gyro angle
    pub gyro_weight: f32,
    /// Weight of the accelerometer tilt angle
    pub accel_weight: f32,
}

impl Default for AhrsConfig {
    fn default() -> Self {
        Self {
            axes: TrackedAxes::YawOnly,
            calibration_samples: DEFAULT_CALIBRATION_SAMPLES,
            gyro_weight: DEFAULT_GYRO_WEIGHT,
            accel_weight: DEFAULT_ACCEL_WEIGHT,
        }
    }
}

impl AhrsConfig {
    /// Weights in `[0, 1]` and at least one calibration sample
    pub fn is_valid(&self) -> bool {
        self.calibration_samples > 0
            && (0.0..=1.0).contains(&self.gyro_weight)
            && (0.0..=1.0).contains(&self.accel_weight)
    }
}

/// Whether the last read succeeded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationHealth {
    /// Last update integrated a fresh sample
    Valid,
    /// Last read failed; angles are from the last good sample
    Stale,
}

impl OrientationHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrientationHealth::Valid => "Valid",
            OrientationHealth::Stale => "Stale",
        }
    }
}

/// Current orientation estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationState {
    /// Roll (°), zero unless roll/pitch are tracked
    pub roll: f32,
    /// Pitch (°), zero unless roll/pitch are tracked
    pub pitch: f32,
    /// Yaw (°), always in `[0, 360)`
    pub yaw: f32,
    /// Integrated gyro angles (°); `z` equals `yaw`
    pub gyro_angle: Vector3<f32>,
    /// Bias-corrected angular rate from the last sample (°/s)
    pub rate: Vector3<f32>,
    /// Timestamp of the last integrated sample (ms)
    pub last_sample_ms: u64,
}

impl OrientationState {
    fn at(now_ms: u64) -> Self {
        Self {
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
            gyro_angle: Vector3::zeros(),
            rate: Vector3::zeros(),
            last_sample_ms: now_ms,
        }
    }

    /// Yaw rate (°/s)
    pub fn yaw_rate(&self) -> f32 {
        self.rate.z
    }
}

/// Orientation estimator
///
/// Built from a completed calibration; there is no uncalibrated estimator.
#[derive(Debug, Clone)]
pub struct OrientationEstimator {
    config: AhrsConfig,
    bias: CalibrationBias,
    state: OrientationState,
    health: OrientationHealth,
    error_count: u32,
}

impl OrientationEstimator {
    /// Start estimating at `now_ms`, the clock value when calibration ended.
    pub fn new(config: AhrsConfig, bias: CalibrationBias, now_ms: u64) -> Self {
        Self {
            config,
            bias,
            state: OrientationState::at(now_ms),
            health: OrientationHealth::Valid,
            error_count: 0,
        }
    }

    pub fn config(&self) -> &AhrsConfig {
        &self.config
    }

    pub fn bias(&self) -> &CalibrationBias {
        &self.bias
    }

    pub fn state(&self) -> &OrientationState {
        &self.state
    }

    pub fn health(&self) -> OrientationHealth {
        self.health
    }

    pub fn is_valid(&self) -> bool {
        self.health == OrientationHealth::Valid
    }

    /// Failed reads since construction
    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Read the IMU and integrate up to `now_ms`.
    ///
    /// On a read failure nothing is integrated and the previous timestamp is
    /// kept, so the next good sample covers the whole gap. An accelerometer
    /// sample without a usable tilt still integrates the gyro but leaves roll
    /// and pitch at their last values.
    pub fn update<I: ImuSource>(&mut self, imu: &mut I, now_ms: u64) -> Result<(), ImuError> {
        let reading = match self.config.axes {
            TrackedAxes::YawOnly => imu
                .read_gyro_z()
                .map(|z| (Vector3::new(0.0, 0.0, z), None)),
            TrackedAxes::RollPitchYaw => imu
                .read_sample()
                .map(|s| (s.gyro_rate, checked_tilt_angles(&s.accel))),
        };

        let (rate, tilt) = match reading {
            Ok(r) => r,
            Err(e) => {
                self.health = OrientationHealth::Stale;
                self.error_count = self.error_count.saturating_add(1);
                return Err(e);
            }
        };

        let elapsed_s = now_ms.saturating_sub(self.state.last_sample_ms) as f32 / 1000.0;
        self.step(rate, tilt, elapsed_s);
        self.state.last_sample_ms = now_ms;
        self.health = OrientationHealth::Valid;
        Ok(())
    }

    /// Integrate one sample over `elapsed_s` seconds.
    ///
    /// `raw_rate` is the uncorrected gyro rate (°/s); `tilt` the uncorrected
    /// accelerometer tilt angles, ignored in yaw-only mode.
    pub fn step(&mut self, raw_rate: Vector3<f32>, tilt: Option<Vector2<f32>>, elapsed_s: f32) {
        let mut rate = raw_rate - self.bias.gyro_rate_bias;
        if !self.config.axes.uses_accel() {
            rate.x = 0.0;
            rate.y = 0.0;
        }
        self.state.rate = rate;

        let angle = &mut self.state.gyro_angle;
        angle.x += rate.x * elapsed_s;
        angle.y += rate.y * elapsed_s;
        angle.z = wrap_360(angle.z + rate.z * elapsed_s);
        self.state.yaw = angle.z;

        if let (true, Some(tilt)) = (self.config.axes.uses_accel(), tilt) {
            let acc = tilt - self.bias.accel_angle_bias;
            let (gw, aw) = (self.config.gyro_weight, self.config.accel_weight);
            self.state.roll = gw * self.state.gyro_angle.x + aw * acc.x;
            self.state.pitch = gw * self.state.gyro_angle.y + aw * acc.y;
        }
    }
}
