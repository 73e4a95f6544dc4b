//! Fusion Parameter Definitions
//!
//! Every tunable of the LiDAR + IMU telemetry loop as a parameter-store entry.
//!
//! # Parameters
//!
//! - `LIDAR_HEADER` - Frame header byte (default 0x59)
//! - `LIDAR_POLICY` - Range policy: 0 = reject outside window, 1 = clamp to ceiling
//! - `LIDAR_MIN_DIST` - Reject window lower bound, exclusive
//! - `LIDAR_MAX_DIST` - Reject window upper bound, exclusive
//! - `LIDAR_CEILING` - Clamp ceiling
//! - `LIDAR_RESYNC` - Keep partial frames across polls and realign after checksum errors
//! - `AHRS_CAL_SAMP` - Startup calibration sample count
//! - `AHRS_AXES` - Tracked axes: 0 = yaw only, 1 = roll/pitch/yaw
//! - `AHRS_CF_GYRO` - Complementary filter gyro weight
//! - `AHRS_CF_ACC` - Complementary filter accelerometer weight
//! - `RPT_GYRO_THR` - Yaw-rate threshold for direction and gyro status (°/s)
//! - `RPT_FIELDS` - Optional report fields bitmask (1 = direction, 2 = object, 4 = gyro)

use super::error::ParameterError;
use super::storage::{ParamValue, ParameterStore};
use crate::ahrs::{
    AhrsConfig, TrackedAxes, DEFAULT_ACCEL_WEIGHT, DEFAULT_CALIBRATION_SAMPLES,
    DEFAULT_GYRO_WEIGHT,
};
use crate::lidar::{
    LidarConfig, RangePolicy, SyncStrategy, DEFAULT_CLAMP_CEILING, DEFAULT_REJECT_MAX,
    DEFAULT_REJECT_MIN, FRAME_HEADER,
};
use crate::report::{ReportConfig, ReportFields, DEFAULT_GYRO_THRESHOLD};

// --- Defaults ---

const DEFAULT_POLICY: i32 = 1;
const DEFAULT_AXES: i32 = 0;

// --- Ranges ---

const MIN_CAL_SAMPLES: i32 = 1;
const MAX_CAL_SAMPLES: i32 = 5000;

const MIN_WEIGHT: f32 = 0.0;
const MAX_WEIGHT: f32 = 1.0;

const MIN_GYRO_THRESHOLD: f32 = 0.0;
const MAX_GYRO_THRESHOLD: f32 = 90.0;

/// Allowed deviation of `gyro_weight + accel_weight` from 1
const WEIGHT_SUM_TOLERANCE: f32 = 1e-3;

/// Fusion parameters loaded from parameter store
#[derive(Debug, Clone, PartialEq)]
pub struct FusionParams {
    pub lidar_header: u8,
    pub range_policy: RangePolicy,
    pub resync: bool,
    pub calibration_samples: u16,
    pub axes: TrackedAxes,
    pub gyro_weight: f32,
    pub accel_weight: f32,
    pub gyro_threshold: f32,
    pub report_fields: ReportFields,
}

impl Default for FusionParams {
    fn default() -> Self {
        Self {
            lidar_header: FRAME_HEADER,
            range_policy: RangePolicy::default(),
            resync: false,
            calibration_samples: DEFAULT_CALIBRATION_SAMPLES,
            axes: TrackedAxes::YawOnly,
            gyro_weight: DEFAULT_GYRO_WEIGHT,
            accel_weight: DEFAULT_ACCEL_WEIGHT,
            gyro_threshold: DEFAULT_GYRO_THRESHOLD,
            report_fields: ReportFields::all(),
        }
    }
}

impl FusionParams {
    /// Register fusion parameters with default values
    pub fn register_defaults(store: &mut ParameterStore) -> Result<(), ParameterError> {
        store.register("LIDAR_HEADER", ParamValue::Int(FRAME_HEADER as i32))?;
        store.register("LIDAR_POLICY", ParamValue::Int(DEFAULT_POLICY))?;
        store.register("LIDAR_MIN_DIST", ParamValue::Int(DEFAULT_REJECT_MIN as i32))?;
        store.register("LIDAR_MAX_DIST", ParamValue::Int(DEFAULT_REJECT_MAX as i32))?;
        store.register("LIDAR_CEILING", ParamValue::Int(DEFAULT_CLAMP_CEILING as i32))?;
        store.register("LIDAR_RESYNC", ParamValue::Bool(false))?;
        store.register(
            "AHRS_CAL_SAMP",
            ParamValue::Int(DEFAULT_CALIBRATION_SAMPLES as i32),
        )?;
        store.register("AHRS_AXES", ParamValue::Int(DEFAULT_AXES))?;
        store.register("AHRS_CF_GYRO", ParamValue::Float(DEFAULT_GYRO_WEIGHT))?;
        store.register("AHRS_CF_ACC", ParamValue::Float(DEFAULT_ACCEL_WEIGHT))?;
        store.register("RPT_GYRO_THR", ParamValue::Float(DEFAULT_GYRO_THRESHOLD))?;
        store.register(
            "RPT_FIELDS",
            ParamValue::Int(ReportFields::all().bits() as i32),
        )?;

        Ok(())
    }

    /// Load fusion parameters from parameter store.
    ///
    /// Missing or mistyped entries fall back to defaults; numeric values are
    /// clamped into range.
    pub fn from_store(store: &ParameterStore) -> Self {
        let max_dist = u16::MAX as i32;
        let min = load_int(store, "LIDAR_MIN_DIST", DEFAULT_REJECT_MIN as i32, 0, max_dist);
        let max = load_int(store, "LIDAR_MAX_DIST", DEFAULT_REJECT_MAX as i32, 0, max_dist);
        let ceiling = load_int(store, "LIDAR_CEILING", DEFAULT_CLAMP_CEILING as i32, 1, max_dist);
        let range_policy = match load_int(store, "LIDAR_POLICY", DEFAULT_POLICY, 0, 1) {
            0 => RangePolicy::Reject {
                min: min as u16,
                max: max as u16,
            },
            _ => RangePolicy::Clamp {
                ceiling: ceiling as u16,
            },
        };

        let axes = TrackedAxes::from_id(load_int(store, "AHRS_AXES", DEFAULT_AXES, 0, 1))
            .unwrap_or_default();
        let fields_bits = load_int(
            store,
            "RPT_FIELDS",
            ReportFields::all().bits() as i32,
            0,
            ReportFields::all().bits() as i32,
        );

        Self {
            lidar_header: load_int(store, "LIDAR_HEADER", FRAME_HEADER as i32, 0, 0xFF) as u8,
            range_policy,
            resync: load_bool(store, "LIDAR_RESYNC", false),
            calibration_samples: load_int(
                store,
                "AHRS_CAL_SAMP",
                DEFAULT_CALIBRATION_SAMPLES as i32,
                MIN_CAL_SAMPLES,
                MAX_CAL_SAMPLES,
            ) as u16,
            axes,
            gyro_weight: load_float(
                store,
                "AHRS_CF_GYRO",
                DEFAULT_GYRO_WEIGHT,
                MIN_WEIGHT,
                MAX_WEIGHT,
            ),
            accel_weight: load_float(
                store,
                "AHRS_CF_ACC",
                DEFAULT_ACCEL_WEIGHT,
                MIN_WEIGHT,
                MAX_WEIGHT,
            ),
            gyro_threshold: load_float(
                store,
                "RPT_GYRO_THR",
                DEFAULT_GYRO_THRESHOLD,
                MIN_GYRO_THRESHOLD,
                MAX_GYRO_THRESHOLD,
            ),
            report_fields: ReportFields::from_bits_truncate(fields_bits as u8),
        }
    }

    /// Validate fusion parameters
    pub fn is_valid(&self) -> bool {
        if let RangePolicy::Reject { min, max } = self.range_policy {
            // window must admit at least one distance
            if max <= min.saturating_add(1) {
                return false;
            }
        }
        if let RangePolicy::Clamp { ceiling } = self.range_policy {
            if ceiling == 0 {
                return false;
            }
        }
        if self.calibration_samples == 0 {
            return false;
        }
        if !(MIN_WEIGHT..=MAX_WEIGHT).contains(&self.gyro_weight)
            || !(MIN_WEIGHT..=MAX_WEIGHT).contains(&self.accel_weight)
        {
            return false;
        }
        if libm::fabsf(self.gyro_weight + self.accel_weight - 1.0) > WEIGHT_SUM_TOLERANCE {
            return false;
        }
        if !(MIN_GYRO_THRESHOLD..=MAX_GYRO_THRESHOLD).contains(&self.gyro_threshold) {
            return false;
        }

        true
    }

    pub fn to_lidar_config(&self) -> LidarConfig {
        LidarConfig {
            header: self.lidar_header,
            policy: self.range_policy,
            sync: if self.resync {
                SyncStrategy::Buffered
            } else {
                SyncStrategy::PerCall
            },
        }
    }

    pub fn to_ahrs_config(&self) -> AhrsConfig {
        AhrsConfig {
            axes: self.axes,
            calibration_samples: self.calibration_samples,
            gyro_weight: self.gyro_weight,
            accel_weight: self.accel_weight,
        }
    }

    pub fn to_report_config(&self) -> ReportConfig {
        ReportConfig {
            fields: self.report_fields,
            gyro_threshold: self.gyro_threshold,
        }
    }
}

/// Load a float parameter from store with clamping
fn load_float(store: &ParameterStore, name: &str, default: f32, min: f32, max: f32) -> f32 {
    match store.get(name) {
        Some(ParamValue::Float(v)) if v.is_finite() => v.clamp(min, max),
        Some(ParamValue::Int(v)) => (*v as f32).clamp(min, max),
        _ => default,
    }
}

/// Load an integer parameter from store with clamping
fn load_int(store: &ParameterStore, name: &str, default: i32, min: i32, max: i32) -> i32 {
    match store.get(name) {
        Some(ParamValue::Int(v)) => (*v).clamp(min, max),
        _ => default,
    }
}

fn load_bool(store: &ParameterStore, name: &str, default: bool) -> bool {
    match store.get(name) {
        Some(ParamValue::Bool(v)) => *v,
        Some(ParamValue::Int(v)) => *v != 0,
        _ => default,
    }
}
