//! Telemetry line codec
//!
//! One report per line, comma-separated `key=value` pairs:
//!
//! ```text
//! distance=<int>,yaw=<float .2>[,direction=<Right|Left|Stationary>][,object=<Detected|None>][,gyro=<Moving|Still>]\r\n
//! ```
//!
//! Optional fields are written only when present in the report. The parser
//! ignores keys it does not know.

use super::types::{Direction, FusedReport, GyroStatus, ObjectStatus};
use core::fmt::Write;
use heapless::String;

/// Line buffer size, enough for every field at its widest
pub const REPORT_LINE_CAPACITY: usize = 96;

/// Line terminator
pub const LINE_END: &str = "\r\n";

/// Line codec errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineError {
    /// Line buffer too small
    Overflow,
    /// Segment without `=`
    Malformed,
    /// Required key absent
    MissingField(&'static str),
    /// Value could not be parsed for the named key
    InvalidValue(&'static str),
}

impl core::fmt::Display for LineError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LineError::Overflow => write!(f, "line buffer overflow"),
            LineError::Malformed => write!(f, "malformed key=value segment"),
            LineError::MissingField(key) => write!(f, "missing field: {}", key),
            LineError::InvalidValue(key) => write!(f, "invalid value for {}", key),
        }
    }
}

/// Write `report` as one terminated line.
pub fn write_line<W: Write>(out: &mut W, report: &FusedReport) -> core::fmt::Result {
    write!(out, "distance={},yaw={:.2}", report.distance, report.yaw)?;
    if let Some(direction) = report.direction {
        write!(out, ",direction={}", direction.as_str())?;
    }
    if let Some(object) = report.object {
        write!(out, ",object={}", object.as_str())?;
    }
    if let Some(gyro) = report.gyro {
        write!(out, ",gyro={}", gyro.as_str())?;
    }
    out.write_str(LINE_END)
}

/// Format `report` into a fixed-capacity line.
pub fn format_line(report: &FusedReport) -> Result<String<REPORT_LINE_CAPACITY>, LineError> {
    let mut line = String::new();
    write_line(&mut line, report).map_err(|_| LineError::Overflow)?;
    Ok(line)
}

/// Fields recovered from a telemetry line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParsedLine {
    pub distance: u16,
    pub yaw: f32,
    pub direction: Option<Direction>,
    pub object: Option<ObjectStatus>,
    pub gyro: Option<GyroStatus>,
}

/// Parse one telemetry line, with or without its terminator.
pub fn parse_line(line: &str) -> Result<ParsedLine, LineError> {
    let mut distance = None;
    let mut yaw = None;
    let mut direction = None;
    let mut object = None;
    let mut gyro = None;

    for segment in line.trim_end_matches(['\r', '\n']).split(',') {
        let (key, value) = segment.split_once('=').ok_or(LineError::Malformed)?;
        match key.trim() {
            "distance" => {
                distance = Some(
                    value
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| LineError::InvalidValue("distance"))?,
                )
            }
            "yaw" => {
                yaw = Some(
                    value
                        .trim()
                        .parse::<f32>()
                        .map_err(|_| LineError::InvalidValue("yaw"))?,
                )
            }
            "direction" => {
                direction = Some(match value.trim() {
                    "Left" => Direction::Left,
                    "Right" => Direction::Right,
                    "Stationary" => Direction::Stationary,
                    _ => return Err(LineError::InvalidValue("direction")),
                })
            }
            "object" => {
                object = Some(match value.trim() {
                    "Detected" => ObjectStatus::Detected,
                    "None" => ObjectStatus::Absent,
                    _ => return Err(LineError::InvalidValue("object")),
                })
            }
            "gyro" => {
                gyro = Some(match value.trim() {
                    "Moving" => GyroStatus::Moving,
                    "Still" => GyroStatus::Still,
                    _ => return Err(LineError::InvalidValue("gyro")),
                })
            }
            _ => {}
        }
    }

    Ok(ParsedLine {
        distance: distance.ok_or(LineError::MissingField("distance"))?,
        yaw: yaw.ok_or(LineError::MissingField("yaw"))?,
        direction,
        object,
        gyro,
    })
}
