//! Fused report and status classification

use crate::ahrs::OrientationState;
use crate::lidar::LidarReading;
use bitflags::bitflags;

/// Default yaw-rate threshold for direction and motion status (°/s)
pub const DEFAULT_GYRO_THRESHOLD: f32 = 1.5;

bitflags! {
    /// Optional fields appended to each report
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ReportFields: u8 {
        /// Turning direction from yaw rate
        const DIRECTION = 0b00000001;
        /// Object detected in front of the LiDAR
        const OBJECT = 0b00000010;
        /// Gyro moving/still status
        const GYRO = 0b00000100;
    }
}

/// Turning direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Stationary,
}

impl Direction {
    /// Classify a yaw rate against a symmetric threshold.
    ///
    /// Positive rate beyond the threshold is a right turn.
    pub fn classify(yaw_rate: f32, threshold: f32) -> Self {
        if yaw_rate > threshold {
            Direction::Right
        } else if yaw_rate < -threshold {
            Direction::Left
        } else {
            Direction::Stationary
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Left => "Left",
            Direction::Right => "Right",
            Direction::Stationary => "Stationary",
        }
    }
}

/// Object presence within LiDAR range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStatus {
    Detected,
    Absent,
}

impl ObjectStatus {
    /// An object is detected when the distance is strictly below `ceiling`.
    pub fn classify(distance: u16, ceiling: u16) -> Self {
        if distance < ceiling {
            ObjectStatus::Detected
        } else {
            ObjectStatus::Absent
        }
    }

    /// Wire text; absence is spelled `None`
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectStatus::Detected => "Detected",
            ObjectStatus::Absent => "None",
        }
    }
}

/// Whether the sensor is rotating
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GyroStatus {
    Moving,
    Still,
}

impl GyroStatus {
    pub fn classify(yaw_rate: f32, threshold: f32) -> Self {
        if libm::fabsf(yaw_rate) > threshold {
            GyroStatus::Moving
        } else {
            GyroStatus::Still
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GyroStatus::Moving => "Moving",
            GyroStatus::Still => "Still",
        }
    }
}

/// Report composition settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReportConfig {
    /// Optional fields to include
    pub fields: ReportFields,
    /// Yaw-rate threshold for direction and gyro status (°/s)
    pub gyro_threshold: f32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            fields: ReportFields::all(),
            gyro_threshold: DEFAULT_GYRO_THRESHOLD,
        }
    }
}

/// One fused telemetry record, built per validated LiDAR frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FusedReport {
    /// Distance after range policy
    pub distance: u16,
    pub strength: u16,
    pub roll: f32,
    pub pitch: f32,
    /// Yaw in `[0, 360)`
    pub yaw: f32,
    /// Bias-corrected yaw rate (°/s)
    pub yaw_rate: f32,
    pub direction: Option<Direction>,
    pub object: Option<ObjectStatus>,
    pub gyro: Option<GyroStatus>,
    /// False when the orientation came from a stale IMU sample
    pub orientation_valid: bool,
}

impl FusedReport {
    /// Combine a LiDAR reading with the current orientation.
    ///
    /// `object_ceiling` is the distance at which nothing counts as detected.
    pub fn compose(
        reading: &LidarReading,
        orientation: &OrientationState,
        orientation_valid: bool,
        config: &ReportConfig,
        object_ceiling: u16,
    ) -> Self {
        let yaw_rate = orientation.yaw_rate();
        let threshold = config.gyro_threshold;
        let fields = config.fields;

        Self {
            distance: reading.distance,
            strength: reading.strength,
            roll: orientation.roll,
            pitch: orientation.pitch,
            yaw: orientation.yaw,
            yaw_rate,
            direction: fields
                .contains(ReportFields::DIRECTION)
                .then(|| Direction::classify(yaw_rate, threshold)),
            object: fields
                .contains(ReportFields::OBJECT)
                .then(|| ObjectStatus::classify(reading.distance, object_ceiling)),
            gyro: fields
                .contains(ReportFields::GYRO)
                .then(|| GyroStatus::classify(yaw_rate, threshold)),
            orientation_valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;

    fn orientation(yaw: f32, rate_z: f32) -> OrientationState {
        OrientationState {
            roll: 0.0,
            pitch: 0.0,
            yaw,
            gyro_angle: Vector3::new(0.0, 0.0, yaw),
            rate: Vector3::new(0.0, 0.0, rate_z),
            last_sample_ms: 0,
        }
    }

    fn reading(distance: u16) -> LidarReading {
        LidarReading {
            distance,
            strength: 10,
            clamped: false,
        }
    }

    #[test]
    fn test_direction_thresholds() {
        assert_eq!(Direction::classify(1.6, 1.5), Direction::Right);
        assert_eq!(Direction::classify(-1.6, 1.5), Direction::Left);
        assert_eq!(Direction::classify(1.5, 1.5), Direction::Stationary);
        assert_eq!(Direction::classify(-1.5, 1.5), Direction::Stationary);
        assert_eq!(Direction::classify(0.0, 1.5), Direction::Stationary);
    }

    #[test]
    fn test_gyro_status_is_symmetric() {
        assert_eq!(GyroStatus::classify(2.0, 1.5), GyroStatus::Moving);
        assert_eq!(GyroStatus::classify(-2.0, 1.5), GyroStatus::Moving);
        assert_eq!(GyroStatus::classify(1.5, 1.5), GyroStatus::Still);
    }

    #[test]
    fn test_object_below_ceiling() {
        assert_eq!(ObjectStatus::classify(69, 70), ObjectStatus::Detected);
        assert_eq!(ObjectStatus::classify(70, 70), ObjectStatus::Absent);
        assert_eq!(ObjectStatus::Absent.as_str(), "None");
    }

    #[test]
    fn test_compose_all_fields() {
        let report = FusedReport::compose(
            &reading(4),
            &orientation(12.5, -3.0),
            true,
            &ReportConfig::default(),
            70,
        );
        assert_eq!(report.distance, 4);
        assert_eq!(report.yaw, 12.5);
        assert_eq!(report.direction, Some(Direction::Left));
        assert_eq!(report.object, Some(ObjectStatus::Detected));
        assert_eq!(report.gyro, Some(GyroStatus::Moving));
        assert!(report.orientation_valid);
    }

    #[test]
    fn test_compose_without_optional_fields() {
        let config = ReportConfig {
            fields: ReportFields::empty(),
            ..Default::default()
        };
        let report = FusedReport::compose(&reading(70), &orientation(0.0, 0.0), false, &config, 70);
        assert_eq!(report.direction, None);
        assert_eq!(report.object, None);
        assert_eq!(report.gyro, None);
        assert!(!report.orientation_valid);
    }
}
