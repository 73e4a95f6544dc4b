//! Typed TF-Mini frame

/// Default frame header byte (sent twice)
pub const FRAME_HEADER: u8 = 0x59;

/// Total frame length: 2 header + 6 payload + 1 checksum
pub const FRAME_LEN: usize = 9;

/// Number of leading bytes covered by the checksum
const CHECKSUM_SPAN: usize = FRAME_LEN - 1;

/// Low 8 bits of the sum of `bytes`
pub fn checksum(bytes: &[u8]) -> u8 {
    bytes.iter().fold(0u8, |acc, b| acc.wrapping_add(*b))
}

/// One complete frame as read from the wire
///
/// Accessors interpret the payload; they do not imply the frame is valid.
/// Call [`RawFrame::is_valid`] first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawFrame([u8; FRAME_LEN]);

impl RawFrame {
    /// Wrap raw bytes
    pub const fn from_bytes(bytes: [u8; FRAME_LEN]) -> Self {
        Self(bytes)
    }

    /// Build a well-formed frame for the given measurement.
    ///
    /// Used by simulators and tests to produce byte streams the sensor would send.
    pub fn encode(header: u8, distance: u16, strength: u16, aux: u16) -> Self {
        let d = distance.to_le_bytes();
        let s = strength.to_le_bytes();
        let a = aux.to_le_bytes();
        let mut bytes = [header, header, d[0], d[1], s[0], s[1], a[0], a[1], 0];
        bytes[CHECKSUM_SPAN] = checksum(&bytes[..CHECKSUM_SPAN]);
        Self(bytes)
    }

    /// Underlying bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_LEN] {
        &self.0
    }

    /// Checksum computed over the first eight bytes
    pub fn computed_checksum(&self) -> u8 {
        checksum(&self.0[..CHECKSUM_SPAN])
    }

    /// Checksum byte carried by the frame
    pub fn received_checksum(&self) -> u8 {
        self.0[CHECKSUM_SPAN]
    }

    /// Whether the carried checksum matches the computed one
    pub fn is_valid(&self) -> bool {
        self.computed_checksum() == self.received_checksum()
    }

    /// Distance, little-endian payload bytes 0-1
    pub fn distance(&self) -> u16 {
        u16::from_le_bytes([self.0[2], self.0[3]])
    }

    /// Signal strength, little-endian payload bytes 2-3
    pub fn strength(&self) -> u16 {
        u16::from_le_bytes([self.0[4], self.0[5]])
    }

    /// Sensor-defined auxiliary word (temperature on TF-Mini S)
    pub fn aux(&self) -> u16 {
        u16::from_le_bytes([self.0[6], self.0[7]])
    }
}

/// Validated range measurement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LidarReading {
    /// Distance in sensor units (cm on TF-Mini by default)
    pub distance: u16,
    /// Signal strength
    pub strength: u16,
    /// Distance was reduced to the clamp ceiling
    pub clamped: bool,
}
