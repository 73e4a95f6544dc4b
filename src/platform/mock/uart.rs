//! Simulated serial line
//!
//! Bytes fed by the test come out of `read`; everything written is kept for
//! inspection. Writes can be made to fail or to accept only a few bytes per
//! call, as a full hardware FIFO would.

use crate::platform::{
    error::{PlatformError, UartError},
    traits::{UartConfig, UartInterface},
    Result,
};
use std::collections::VecDeque;
use std::vec::Vec;

/// In-memory UART
///
/// ```ignore
/// use heading_fuse::platform::mock::MockUart;
/// use heading_fuse::platform::traits::{UartConfig, UartInterface};
///
/// let mut uart = MockUart::new(UartConfig::LIDAR);
/// uart.feed(&[0x59, 0x59]);
/// let mut buf = [0u8; 4];
/// assert_eq!(uart.read(&mut buf).unwrap(), 2);
/// ```
#[derive(Debug)]
pub struct MockUart {
    config: UartConfig,
    rx: VecDeque<u8>,
    sent: Vec<u8>,
    fail_writes: bool,
    write_chunk: Option<usize>,
}

impl MockUart {
    pub fn new(config: UartConfig) -> Self {
        Self {
            config,
            rx: VecDeque::new(),
            sent: Vec::new(),
            fail_writes: false,
            write_chunk: None,
        }
    }

    /// Queue bytes for the receiver
    pub fn feed(&mut self, data: &[u8]) {
        self.rx.extend(data.iter().copied());
    }

    /// Received bytes not read yet
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Everything written so far
    pub fn sent(&self) -> &[u8] {
        &self.sent
    }

    pub fn take_sent(&mut self) -> Vec<u8> {
        core::mem::take(&mut self.sent)
    }

    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Accept at most `chunk` bytes per `write` call
    pub fn limit_write_chunk(&mut self, chunk: Option<usize>) {
        self.write_chunk = chunk;
    }

    pub fn baud_rate(&self) -> u32 {
        self.config.baud_rate
    }
}

impl UartInterface for MockUart {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        if self.fail_writes {
            return Err(PlatformError::Uart(UartError::WriteFailed));
        }
        let n = self.write_chunk.map_or(data.len(), |c| c.min(data.len()));
        self.sent.extend_from_slice(&data[..n]);
        Ok(n)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        let n = buffer.len().min(self.rx.len());
        for (slot, byte) in buffer.iter_mut().zip(self.rx.drain(..n)) {
            *slot = byte;
        }
        Ok(n)
    }

    fn available(&mut self) -> bool {
        !self.rx.is_empty()
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
