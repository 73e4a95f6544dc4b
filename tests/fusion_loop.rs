//! End-to-end fusion loop tests
//!
//! Real drivers (MPU-6050, TF-Mini, UART report sink) over in-memory
//! peripherals.

use heading_fuse::communication::UartReportSink;
use heading_fuse::devices::bus::{I2cRegisterBus, UartByteSource};
use heading_fuse::devices::imu::{Mpu6050, Mpu6050Config};
use heading_fuse::platform::error::{I2cError, PlatformError};
use heading_fuse::platform::{I2cInterface, Result, TimerInterface, UartInterface};
use heading_fuse::subsystems::fusion::{FusionConfig, FusionLoop};
use heading_fuse_core::ahrs::{AhrsConfig, ImuCalibrator, TrackedAxes};
use heading_fuse_core::lidar::{RawFrame, FRAME_HEADER};
use heading_fuse_core::parameters::{FusionParams, ParamValue, ParameterStore};
use heading_fuse_core::report::parse_line;
use heading_fuse_core::traits::MockTime;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

const GYRO_ZOUT_H: u8 = 0x47;

// =============================================================================
// Peripherals
// =============================================================================

/// Register file shared with the test body
#[derive(Clone)]
struct Registers(Rc<RefCell<[u8; 128]>>);

impl Default for Registers {
    fn default() -> Self {
        Self(Rc::new(RefCell::new([0u8; 128])))
    }
}

impl Registers {
    fn set_i16(&self, reg: u8, value: i16) {
        let [hi, lo] = value.to_be_bytes();
        let mut regs = self.0.borrow_mut();
        regs[reg as usize] = hi;
        regs[reg as usize + 1] = lo;
    }

    fn get(&self, reg: u8) -> u8 {
        self.0.borrow()[reg as usize]
    }
}

struct FakeI2c {
    regs: Registers,
    offline: Rc<RefCell<bool>>,
}

impl I2cInterface for FakeI2c {
    fn write(&mut self, _addr: u8, data: &[u8]) -> Result<()> {
        if *self.offline.borrow() {
            return Err(PlatformError::I2c(I2cError::Nack));
        }
        if let [reg, value] = *data {
            self.regs.0.borrow_mut()[reg as usize] = value;
        }
        Ok(())
    }

    fn read(&mut self, _addr: u8, _buffer: &mut [u8]) -> Result<()> {
        Ok(())
    }

    fn write_read(&mut self, _addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        if *self.offline.borrow() {
            return Err(PlatformError::I2c(I2cError::Timeout));
        }
        let start = write_data[0] as usize;
        let regs = self.regs.0.borrow();
        read_buffer.copy_from_slice(&regs[start..start + read_buffer.len()]);
        Ok(())
    }
}

/// Serial line: bytes pushed by the test, everything written is captured
#[derive(Clone, Default)]
struct Line {
    rx: Rc<RefCell<VecDeque<u8>>>,
    tx: Rc<RefCell<Vec<u8>>>,
}

impl Line {
    fn push_frame(&self, distance: u16, strength: u16) {
        let frame = RawFrame::encode(FRAME_HEADER, distance, strength, 0);
        self.rx.borrow_mut().extend(frame.as_bytes().iter().copied());
    }

    fn take_text(&self) -> String {
        String::from_utf8(std::mem::take(&mut *self.tx.borrow_mut())).unwrap()
    }
}

impl UartInterface for Line {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        self.tx.borrow_mut().extend_from_slice(data);
        Ok(data.len())
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let mut rx = self.rx.borrow_mut();
        let mut n = 0;
        while n < buffer.len() {
            match rx.pop_front() {
                Some(byte) => buffer[n] = byte,
                None => break,
            }
            n += 1;
        }
        Ok(n)
    }

    fn available(&mut self) -> bool {
        !self.rx.borrow().is_empty()
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Default)]
struct CountingTimer {
    now_us: u64,
}

impl TimerInterface for CountingTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.now_us += us as u64;
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms * 1000)
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}

struct Rig {
    regs: Registers,
    offline: Rc<RefCell<bool>>,
    lidar_line: Line,
    telemetry_line: Line,
}

impl Rig {
    fn new() -> Self {
        let regs = Registers::default();
        regs.0.borrow_mut()[0x75] = 0x68;
        Self {
            regs,
            offline: Rc::new(RefCell::new(false)),
            lidar_line: Line::default(),
            telemetry_line: Line::default(),
        }
    }

    fn imu(&self) -> Mpu6050<I2cRegisterBus<FakeI2c>> {
        Mpu6050::new(
            I2cRegisterBus::new(FakeI2c {
                regs: self.regs.clone(),
                offline: self.offline.clone(),
            }),
            Mpu6050Config::default(),
        )
    }
}

/// 32.8 LSB per °/s at ±1000 °/s
fn dps(rate: f32) -> i16 {
    (rate * 32.8).round() as i16
}

// =============================================================================
// Tests
// =============================================================================

#[test]
fn telemetry_lines_track_heading() {
    let rig = Rig::new();
    let time = MockTime::new();
    let mut timer = CountingTimer::default();

    let mut imu = rig.imu();
    imu.init(&mut timer).unwrap();
    assert_eq!(rig.regs.get(0x6B), 0x00);
    assert_eq!(rig.regs.get(0x1B), 0x10);
    assert_eq!(rig.regs.get(0x1C), 0x10);

    // Resting bias of 2.5 °/s
    rig.regs.set_i16(GYRO_ZOUT_H, dps(2.5));
    let bias = imu
        .calibrate(&ImuCalibrator::new(TrackedAxes::YawOnly, 200), &mut timer)
        .unwrap();

    let mut fusion = FusionLoop::with_bias(
        imu,
        UartByteSource::new(rig.lidar_line.clone()),
        UartReportSink::new(rig.telemetry_line.clone()),
        &time,
        FusionConfig::default(),
        bias,
    );

    // Turning right at 12.5 °/s raw, 10 °/s after bias
    rig.regs.set_i16(GYRO_ZOUT_H, dps(12.5));
    rig.lidar_line.push_frame(42, 300);
    time.advance_ms(1000);
    fusion.cycle().unwrap();

    let text = rig.telemetry_line.take_text();
    assert!(text.ends_with("\r\n"));
    let parsed = parse_line(&text).unwrap();
    assert_eq!(parsed.distance, 42);
    assert!((parsed.yaw - 10.0).abs() < 0.02);
    assert_eq!(
        text,
        "distance=42,yaw=10.00,direction=Right,object=Detected,gyro=Moving\r\n"
    );

    // At rest, far away
    rig.regs.set_i16(GYRO_ZOUT_H, dps(2.5));
    rig.lidar_line.push_frame(900, 300);
    time.advance_ms(1000);
    fusion.cycle().unwrap();
    assert_eq!(
        rig.telemetry_line.take_text(),
        "distance=70,yaw=10.00,direction=Stationary,object=None,gyro=Still\r\n"
    );
    assert_eq!(fusion.stats().reports, 2);
}

#[test]
fn bus_outage_keeps_reporting_with_stale_orientation() {
    let rig = Rig::new();
    let time = MockTime::new();
    let mut timer = CountingTimer::default();

    let mut imu = rig.imu();
    imu.init(&mut timer).unwrap();
    rig.regs.set_i16(GYRO_ZOUT_H, dps(-20.0));

    let mut fusion = FusionLoop::start(
        imu,
        UartByteSource::new(rig.lidar_line.clone()),
        UartReportSink::new(rig.telemetry_line.clone()),
        &time,
        FusionConfig {
            ahrs: AhrsConfig {
                calibration_samples: 1,
                ..Default::default()
            },
            ..FusionConfig::default()
        },
    )
    .unwrap();
    // Calibrated at -20 °/s; from here on a raw 0 reads as +20 °/s
    rig.regs.set_i16(GYRO_ZOUT_H, 0);

    *rig.offline.borrow_mut() = true;
    rig.lidar_line.push_frame(15, 1);
    time.advance_ms(500);
    let report = fusion.cycle().unwrap();
    assert!(!report.orientation_valid);
    assert_eq!(report.yaw, 0.0);
    assert_eq!(fusion.stats().imu_errors, 1);
    assert!(rig.telemetry_line.take_text().starts_with("distance=15,yaw=0.00"));

    *rig.offline.borrow_mut() = false;
    rig.lidar_line.push_frame(15, 1);
    time.advance_ms(500);
    let report = fusion.cycle().unwrap();
    assert!(report.orientation_valid);
    assert!((report.yaw - 20.0).abs() < 0.05);
}

#[test]
fn parameters_select_reject_policy_and_fields() {
    let mut store = ParameterStore::new();
    FusionParams::register_defaults(&mut store).unwrap();
    store.set("LIDAR_POLICY", ParamValue::Int(0)).unwrap();
    store.set("RPT_FIELDS", ParamValue::Int(0)).unwrap();
    let params = FusionParams::from_store(&store);
    assert!(params.is_valid());

    let rig = Rig::new();
    let time = MockTime::new();
    let mut imu = rig.imu();
    imu.init(&mut CountingTimer::default()).unwrap();

    let mut fusion = FusionLoop::start(
        imu,
        UartByteSource::new(rig.lidar_line.clone()),
        UartReportSink::new(rig.telemetry_line.clone()),
        &time,
        FusionConfig::from_params(&params),
    )
    .unwrap();

    rig.lidar_line.push_frame(1300, 1);
    rig.lidar_line.push_frame(500, 1);
    assert!(fusion.cycle().is_none());
    assert!(fusion.cycle().is_some());

    assert_eq!(rig.telemetry_line.take_text(), "distance=500,yaw=0.00\r\n");
    assert_eq!(fusion.stats().rejected, 1);
}
