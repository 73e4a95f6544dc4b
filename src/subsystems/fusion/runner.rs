//! Fusion loop
//!
//! One cooperative polling loop per device: each cycle integrates the IMU up
//! to the current time, polls the LiDAR for a frame, and for every accepted
//! frame composes a report from the reading and the orientation as of now.
//!
//! The loop can only be built from a [`CalibrationBias`], so no report is
//! produced before calibration has finished.

use super::stats::LoopStats;
use crate::devices::lidar::TfMini;
use heading_fuse_core::ahrs::{
    AhrsConfig, CalibrationBias, HeadingReference, ImuCalibrator, ImuError, ImuSource,
    OrientationEstimator, OrientationState,
};
use heading_fuse_core::lidar::LidarConfig;
use heading_fuse_core::parameters::FusionParams;
use heading_fuse_core::report::{FusedReport, ReportConfig, ReportSink};
use heading_fuse_core::traits::{ByteSource, TimeSource};

/// Loop configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FusionConfig {
    pub lidar: LidarConfig,
    pub ahrs: AhrsConfig,
    pub report: ReportConfig,
}

impl FusionConfig {
    pub fn from_params(params: &FusionParams) -> Self {
        Self {
            lidar: params.to_lidar_config(),
            ahrs: params.to_ahrs_config(),
            report: params.to_report_config(),
        }
    }

    /// Distance below which an object counts as detected
    pub fn object_ceiling(&self) -> u16 {
        self.lidar.policy.ceiling()
    }
}

/// LiDAR + IMU fusion loop
pub struct FusionLoop<I, B, S, T>
where
    I: ImuSource,
    B: ByteSource,
    S: ReportSink,
    T: TimeSource,
{
    imu: I,
    lidar: TfMini<B>,
    sink: S,
    time: T,
    estimator: OrientationEstimator,
    report_config: ReportConfig,
    object_ceiling: u16,
    heading_reference: HeadingReference,
    last_report: Option<FusedReport>,
    stats: LoopStats,
}

impl<I, B, S, T> FusionLoop<I, B, S, T>
where
    I: ImuSource,
    B: ByteSource,
    S: ReportSink,
    T: TimeSource,
{
    /// Calibrate the IMU, then build the loop.
    ///
    /// Blocks for the configured number of calibration samples. The device
    /// must be at rest.
    pub fn start(
        mut imu: I,
        source: B,
        sink: S,
        time: T,
        config: FusionConfig,
    ) -> Result<Self, ImuError> {
        let calibrator = ImuCalibrator::new(config.ahrs.axes, config.ahrs.calibration_samples);
        crate::log_info!(
            "Calibrating {} over {} samples",
            config.ahrs.axes.as_str(),
            calibrator.sample_count()
        );
        let bias = calibrator.run(&mut imu).map_err(|e| {
            crate::log_error!("IMU calibration failed: {}", e.as_str());
            e
        })?;
        Ok(Self::with_bias(imu, source, sink, time, config, bias))
    }

    /// Build the loop from an existing calibration.
    ///
    /// Integration starts at the current time.
    pub fn with_bias(
        imu: I,
        source: B,
        sink: S,
        time: T,
        config: FusionConfig,
        bias: CalibrationBias,
    ) -> Self {
        let estimator = OrientationEstimator::new(config.ahrs, bias, time.now_ms());
        crate::log_info!(
            "Fusion loop started: gyro z bias {}, object ceiling {}",
            bias.gyro_rate_bias.z,
            config.object_ceiling()
        );
        Self {
            imu,
            lidar: TfMini::new(source, config.lidar),
            sink,
            time,
            estimator,
            report_config: config.report,
            object_ceiling: config.object_ceiling(),
            heading_reference: HeadingReference::new(),
            last_report: None,
            stats: LoopStats::default(),
        }
    }

    /// Run one cycle.
    ///
    /// Returns the report composed this cycle, if a frame was accepted.
    /// Faults are counted and logged; none stops the loop.
    pub fn cycle(&mut self) -> Option<FusedReport> {
        self.stats.cycles = self.stats.cycles.wrapping_add(1);

        let now_ms = self.time.now_ms();
        if let Err(err) = self.estimator.update(&mut self.imu, now_ms) {
            self.stats.imu_errors = self.stats.imu_errors.wrapping_add(1);
            crate::log_warn!("IMU read failed, orientation stale: {}", err.as_str());
        }

        let reading = self.lidar.poll();
        self.stats.absorb_framing(&self.lidar.stats());
        let reading = reading?;

        let valid = self.estimator.is_valid();
        let report = FusedReport::compose(
            &reading,
            self.estimator.state(),
            valid,
            &self.report_config,
            self.object_ceiling,
        );
        if !valid {
            self.stats.stale_reports = self.stats.stale_reports.wrapping_add(1);
        }

        match self.sink.emit(&report) {
            Ok(()) => self.stats.reports = self.stats.reports.wrapping_add(1),
            Err(err) => {
                self.stats.sink_errors = self.stats.sink_errors.wrapping_add(1);
                crate::log_warn!("Report not delivered: {}", err.as_str());
            }
        }

        self.last_report = Some(report);
        Some(report)
    }

    /// Cycle forever.
    pub fn run(&mut self) -> ! {
        loop {
            self.cycle();
        }
    }

    /// Make the current yaw the zero heading
    pub fn zero_heading(&mut self) {
        let yaw = self.estimator.state().yaw;
        self.heading_reference.set(yaw);
        crate::log_info!("Heading zeroed at {}", yaw);
    }

    /// Current yaw relative to the zero heading, in `(-180, 180]`.
    ///
    /// Absolute yaw until [`FusionLoop::zero_heading`] is called.
    pub fn relative_heading(&self) -> f32 {
        self.heading_reference.relative(self.estimator.state().yaw)
    }

    pub fn orientation(&self) -> &OrientationState {
        self.estimator.state()
    }

    pub fn estimator(&self) -> &OrientationEstimator {
        &self.estimator
    }

    pub fn last_report(&self) -> Option<FusedReport> {
        self.last_report
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    pub fn imu_mut(&mut self) -> &mut I {
        &mut self.imu
    }

    pub fn source_mut(&mut self) -> &mut B {
        self.lidar.source_mut()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
