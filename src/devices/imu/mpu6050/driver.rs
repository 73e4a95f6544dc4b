//! MPU-6050 Driver Implementation

use super::config::{AccelRange, GyroRange, Mpu6050Config};
use super::registers::{self, SENSOR_BURST_LEN, SETTLE_MS};
use crate::platform::TimerInterface;
use heading_fuse_core::ahrs::{CalibrationBias, ImuCalibrator, ImuError, ImuSample, ImuSource};
use heading_fuse_core::traits::{BusError, RegisterBus};
use nalgebra::Vector3;

/// Maximum consecutive errors before marking sensor unhealthy
const MAX_CONSECUTIVE_ERRORS: u32 = 3;

/// MPU-6050 driver
///
/// Implements [`ImuSource`] with angular rate in °/s and acceleration in g.
/// Reads fail with [`ImuError::NotInitialized`] until [`Mpu6050::init`]
/// succeeds.
pub struct Mpu6050<R: RegisterBus> {
    bus: R,
    config: Mpu6050Config,
    /// Raw to °/s
    gyro_scale: f32,
    /// Raw to g
    accel_scale: f32,
    healthy: bool,
    /// Consecutive bus errors
    error_count: u32,
    initialized: bool,
}

impl<R: RegisterBus> Mpu6050<R> {
    pub fn new(bus: R, config: Mpu6050Config) -> Self {
        Self {
            bus,
            config,
            gyro_scale: 1.0 / config.gyro_range.sensitivity(),
            accel_scale: 1.0 / config.accel_range.sensitivity(),
            healthy: false,
            error_count: 0,
            initialized: false,
        }
    }

    /// Wake the device and program both full-scale ranges.
    ///
    /// Each write is followed by a settle delay.
    pub fn init<T: TimerInterface>(&mut self, timer: &mut T) -> Result<(), ImuError> {
        let whoami = self.read_register(registers::WHO_AM_I)?;
        if whoami == registers::MPU6050_WHO_AM_I_VALUE {
            crate::log_info!("MPU-6050 detected (WHO_AM_I: {})", whoami);
        } else {
            // Clone parts report other IDs but share the register map
            crate::log_warn!("Unexpected IMU WHO_AM_I: {}, continuing", whoami);
        }

        let steps = [
            (registers::PWR_MGMT_1, registers::PWR_MGMT_1_WAKE),
            (
                registers::ACCEL_CONFIG,
                self.config.accel_range.register_value(),
            ),
            (
                registers::GYRO_CONFIG,
                self.config.gyro_range.register_value(),
            ),
        ];
        for (reg, value) in steps {
            self.write_register(reg, value)?;
            settle(timer)?;
        }

        self.initialized = true;
        self.healthy = true;
        crate::log_info!(
            "MPU-6050 initialized: gyro cfg {}, accel cfg {}",
            self.config.gyro_range.register_value(),
            self.config.accel_range.register_value()
        );
        Ok(())
    }

    /// Estimate sensor bias with the device at rest.
    ///
    /// Settles before and after sampling.
    pub fn calibrate<T: TimerInterface>(
        &mut self,
        calibrator: &ImuCalibrator,
        timer: &mut T,
    ) -> Result<CalibrationBias, ImuError> {
        settle(timer)?;
        crate::log_info!(
            "Calibrating IMU over {} samples, keep still",
            calibrator.sample_count()
        );
        let bias = calibrator.run(self)?;
        settle(timer)?;
        crate::log_info!(
            "IMU calibrated: gyro bias [{}, {}, {}]",
            bias.gyro_rate_bias.x,
            bias.gyro_rate_bias.y,
            bias.gyro_rate_bias.z
        );
        Ok(bias)
    }

    pub fn config(&self) -> &Mpu6050Config {
        &self.config
    }

    pub fn is_healthy(&self) -> bool {
        self.initialized && self.healthy
    }

    pub fn error_count(&self) -> u32 {
        self.error_count
    }

    /// Reconfigure gyroscope range
    ///
    /// Takes effect in hardware on the next [`Mpu6050::init`].
    pub fn set_gyro_range(&mut self, range: GyroRange) {
        self.config.gyro_range = range;
        self.gyro_scale = 1.0 / range.sensitivity();
    }

    /// Reconfigure accelerometer range
    ///
    /// Takes effect in hardware on the next [`Mpu6050::init`].
    pub fn set_accel_range(&mut self, range: AccelRange) {
        self.config.accel_range = range;
        self.accel_scale = 1.0 / range.sensitivity();
    }

    pub fn bus_mut(&mut self) -> &mut R {
        &mut self.bus
    }

    pub fn release(self) -> R {
        self.bus
    }

    fn ensure_initialized(&self) -> Result<(), ImuError> {
        if self.initialized {
            Ok(())
        } else {
            Err(ImuError::NotInitialized)
        }
    }

    /// Track consecutive failures and convert the bus result
    fn track<V>(&mut self, result: Result<V, BusError>) -> Result<V, ImuError> {
        match result {
            Ok(value) => {
                self.error_count = 0;
                self.healthy = true;
                Ok(value)
            }
            Err(err) => {
                self.error_count += 1;
                if self.error_count >= MAX_CONSECUTIVE_ERRORS && self.healthy {
                    self.healthy = false;
                    crate::log_error!(
                        "MPU-6050 unhealthy after {} bus errors ({})",
                        self.error_count,
                        err.as_str()
                    );
                }
                Err(ImuError::Bus(err))
            }
        }
    }

    fn read_register(&mut self, reg: u8) -> Result<u8, ImuError> {
        let mut buf = [0u8; 1];
        let result = self
            .bus
            .read_registers(self.config.address, reg, &mut buf);
        self.track(result)?;
        Ok(buf[0])
    }

    fn write_register(&mut self, reg: u8, value: u8) -> Result<(), ImuError> {
        let result = self.bus.write_register(self.config.address, reg, value);
        self.track(result)
    }

    fn read_block<const N: usize>(&mut self, start: u8) -> Result<[u8; N], ImuError> {
        self.ensure_initialized()?;
        let mut buf = [0u8; N];
        let result = self
            .bus
            .read_registers(self.config.address, start, &mut buf);
        self.track(result)?;
        Ok(buf)
    }

    fn convert_gyro(&self, bytes: &[u8]) -> Vector3<f32> {
        to_vector(bytes) * self.gyro_scale
    }

    fn convert_accel(&self, bytes: &[u8]) -> Vector3<f32> {
        to_vector(bytes) * self.accel_scale
    }
}

/// Three big-endian signed words
fn to_vector(bytes: &[u8]) -> Vector3<f32> {
    let word = |i: usize| i16::from_be_bytes([bytes[i], bytes[i + 1]]) as f32;
    Vector3::new(word(0), word(2), word(4))
}

fn settle<T: TimerInterface>(timer: &mut T) -> Result<(), ImuError> {
    timer.delay_ms(SETTLE_MS).map_err(BusError::from)?;
    Ok(())
}

impl<R: RegisterBus> ImuSource for Mpu6050<R> {
    fn read_gyro(&mut self) -> Result<Vector3<f32>, ImuError> {
        let raw = self.read_block::<6>(registers::GYRO_XOUT_H)?;
        Ok(self.convert_gyro(&raw))
    }

    fn read_accel(&mut self) -> Result<Vector3<f32>, ImuError> {
        let raw = self.read_block::<6>(registers::ACCEL_XOUT_H)?;
        Ok(self.convert_accel(&raw))
    }

    fn read_gyro_z(&mut self) -> Result<f32, ImuError> {
        let raw = self.read_block::<2>(registers::GYRO_ZOUT_H)?;
        Ok(i16::from_be_bytes(raw) as f32 * self.gyro_scale)
    }

    fn read_sample(&mut self) -> Result<ImuSample, ImuError> {
        let raw = self.read_block::<SENSOR_BURST_LEN>(registers::ACCEL_XOUT_H)?;
        Ok(ImuSample {
            accel: self.convert_accel(&raw[0..6]),
            gyro_rate: self.convert_gyro(&raw[8..14]),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::bus::I2cRegisterBus;
    use crate::platform::error::I2cError;
    use crate::platform::mock::{MockI2c, MockTimer};
    use crate::platform::traits::I2cConfig;
    use heading_fuse_core::ahrs::TrackedAxes;

    const ADDR: u8 = registers::MPU6050_ADDR;

    fn driver() -> Mpu6050<I2cRegisterBus<MockI2c>> {
        let mut i2c = MockI2c::new(I2cConfig::default());
        i2c.set_registers(ADDR, registers::WHO_AM_I, &[0x68]);
        Mpu6050::new(I2cRegisterBus::new(i2c), Mpu6050Config::default())
    }

    fn initialized() -> Mpu6050<I2cRegisterBus<MockI2c>> {
        let mut imu = driver();
        imu.init(&mut MockTimer::new()).unwrap();
        imu
    }

    fn set_registers(imu: &mut Mpu6050<I2cRegisterBus<MockI2c>>, reg: u8, data: &[u8]) {
        imu.bus_mut().i2c_mut().set_registers(ADDR, reg, data);
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 1e-4,
            "{} != {}",
            actual,
            expected
        );
    }

    #[test]
    fn init_runs_bring_up_sequence() {
        let mut imu = driver();
        let mut timer = MockTimer::new();
        imu.init(&mut timer).unwrap();

        assert_eq!(
            imu.bus_mut().i2c().register_writes(ADDR),
            vec![(0x6B, 0x00), (0x1C, 0x10), (0x1B, 0x10)]
        );
        assert_eq!(timer.delay_calls(), 3);
        assert_eq!(timer.now_us(), 60_000);
        assert!(imu.is_healthy());
    }

    #[test]
    fn init_accepts_unknown_who_am_i() {
        let mut imu = driver();
        set_registers(&mut imu, registers::WHO_AM_I, &[0x72]);
        assert!(imu.init(&mut MockTimer::new()).is_ok());
    }

    #[test]
    fn init_fails_on_bus_error() {
        let mut imu = driver();
        imu.bus_mut().i2c_mut().fail_with(Some(I2cError::Nack));
        assert_eq!(
            imu.init(&mut MockTimer::new()),
            Err(ImuError::Bus(BusError::Nack))
        );
        assert!(!imu.is_healthy());
    }

    #[test]
    fn reads_require_init() {
        let mut imu = driver();
        assert_eq!(imu.read_gyro_z(), Err(ImuError::NotInitialized));
    }

    #[test]
    fn gyro_z_reads_only_high_low_pair() {
        let mut imu = initialized();
        set_registers(&mut imu, registers::GYRO_ZOUT_H, &[0x01, 0x48]);
        imu.bus_mut().i2c_mut().clear_ops();

        // 328 / 32.8 LSB per °/s
        assert_close(imu.read_gyro_z().unwrap(), 10.0);
        assert_eq!(imu.bus_mut().i2c().ops().len(), 1);
    }

    #[test]
    fn gyro_and_accel_are_scaled() {
        let mut imu = initialized();
        // gyro: -328, 0, 656
        set_registers(
            &mut imu,
            registers::GYRO_XOUT_H,
            &[0xFE, 0xB8, 0x00, 0x00, 0x02, 0x90],
        );
        // accel: 0, 2048, 4096
        set_registers(
            &mut imu,
            registers::ACCEL_XOUT_H,
            &[0x00, 0x00, 0x08, 0x00, 0x10, 0x00],
        );

        let gyro = imu.read_gyro().unwrap();
        assert_close(gyro.x, -10.0);
        assert_close(gyro.y, 0.0);
        assert_close(gyro.z, 20.0);

        let accel = imu.read_accel().unwrap();
        assert_close(accel.x, 0.0);
        assert_close(accel.y, 0.5);
        assert_close(accel.z, 1.0);
    }

    #[test]
    fn sample_burst_skips_temperature() {
        let mut imu = initialized();
        set_registers(
            &mut imu,
            registers::ACCEL_XOUT_H,
            &[
                0x00, 0x00, 0x00, 0x00, 0x10, 0x00, // accel
                0x12, 0x34, // temperature
                0x00, 0x00, 0x00, 0x00, 0x01, 0x48, // gyro
            ],
        );

        let sample = imu.read_sample().unwrap();
        assert_close(sample.accel.z, 1.0);
        assert_close(sample.gyro_rate.z, 10.0);
        assert_close(sample.gyro_rate.x, 0.0);
    }

    #[test]
    fn consecutive_errors_mark_unhealthy() {
        let mut imu = initialized();
        imu.bus_mut()
            .i2c_mut()
            .fail_with(Some(I2cError::Timeout));

        for _ in 0..MAX_CONSECUTIVE_ERRORS {
            assert_eq!(
                imu.read_gyro_z(),
                Err(ImuError::Bus(BusError::Timeout))
            );
        }
        assert!(!imu.is_healthy());
        assert_eq!(imu.error_count(), MAX_CONSECUTIVE_ERRORS);

        imu.bus_mut().i2c_mut().fail_with(None);
        set_registers(&mut imu, registers::GYRO_ZOUT_H, &[0x00, 0x00]);
        imu.read_gyro_z().unwrap();
        assert!(imu.is_healthy());
        assert_eq!(imu.error_count(), 0);
    }

    #[test]
    fn calibrate_averages_yaw_rate_with_settle_delays() {
        let mut imu = initialized();
        set_registers(&mut imu, registers::GYRO_ZOUT_H, &[0x00, 0x52]);
        let mut timer = MockTimer::new();

        let bias = imu
            .calibrate(&ImuCalibrator::new(TrackedAxes::YawOnly, 200), &mut timer)
            .unwrap();

        // 82 / 32.8
        assert_close(bias.gyro_rate_bias.z, 2.5);
        assert_eq!(timer.delay_calls(), 2);
    }

    #[test]
    fn range_change_rescales() {
        let mut imu = initialized();
        imu.set_gyro_range(GyroRange::Dps250);
        set_registers(&mut imu, registers::GYRO_ZOUT_H, &[0x00, 0x83]);
        assert_close(imu.read_gyro_z().unwrap(), 1.0);
    }
}
