//! Heading and attitude estimation from a 6-axis IMU
//!
//! Lifecycle: an [`ImuCalibrator`] averages the startup bias, then an
//! [`OrientationEstimator`] is built from the resulting [`CalibrationBias`].
//! The estimator cannot exist before calibration.

pub mod angle;
pub mod calibration;
pub mod orientation;
pub mod traits;

pub use angle::{wrap_180, wrap_360, HeadingReference};
pub use calibration::{
    accel_tilt_angles, checked_tilt_angles, BiasAccumulator, CalibrationBias, ImuCalibrator,
    DEFAULT_CALIBRATION_SAMPLES,
};
pub use orientation::{
    AhrsConfig, OrientationEstimator, OrientationHealth, OrientationState, DEFAULT_ACCEL_WEIGHT,
    DEFAULT_GYRO_WEIGHT,
};
pub use traits::{ImuError, ImuSample, ImuSource, TrackedAxes};
