//! Transport abstractions for the two sensor streams.
//!
//! The range sensor delivers a byte stream (`ByteSource`), the IMU is read
//! through addressed register blocks (`RegisterBus`). Both are provided by the
//! platform layer; the core only consumes them.

/// Errors reported by a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Device did not acknowledge its address
    Nack,
    /// Transfer failed on the wire
    TransferFailed,
    /// Transfer did not complete in time
    Timeout,
    /// Fewer bytes arrived than requested
    Underflow,
}

impl BusError {
    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            BusError::Nack => "Nack",
            BusError::TransferFailed => "TransferFailed",
            BusError::Timeout => "Timeout",
            BusError::Underflow => "Underflow",
        }
    }
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            BusError::Nack => write!(f, "device did not acknowledge"),
            BusError::TransferFailed => write!(f, "bus transfer failed"),
            BusError::Timeout => write!(f, "bus transfer timed out"),
            BusError::Underflow => write!(f, "bus returned fewer bytes than requested"),
        }
    }
}

/// Sequential byte stream with a non-blocking availability check
///
/// # Contract
///
/// - `available()` never blocks
/// - `read_byte()` returns `None` on underflow; callers are responsible for
///   not over-reading
pub trait ByteSource {
    /// Returns `true` if at least one byte can be read without blocking.
    fn available(&mut self) -> bool;

    /// Read the next byte, or `None` if the stream is currently empty.
    fn read_byte(&mut self) -> Option<u8>;
}

/// Register-addressed device bus (I2C style)
///
/// Multi-byte values are conventionally big-endian 16-bit pairs.
pub trait RegisterBus {
    /// Read `buf.len()` consecutive registers starting at `start`.
    fn read_registers(&mut self, device: u8, start: u8, buf: &mut [u8]) -> Result<(), BusError>;

    /// Write a single register.
    fn write_register(&mut self, device: u8, reg: u8, value: u8) -> Result<(), BusError>;

    /// Read one big-endian signed 16-bit word starting at `start`.
    fn read_i16(&mut self, device: u8, start: u8) -> Result<i16, BusError> {
        let mut buf = [0u8; 2];
        self.read_registers(device, start, &mut buf)?;
        Ok(i16::from_be_bytes(buf))
    }
}
