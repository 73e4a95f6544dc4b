//! Simulated I2C bus
//!
//! Every 7-bit address owns a 256-byte register file. A `[reg, value]` write
//! stores into it, a `write_read` starting at `reg` reads consecutive
//! registers back (wrapping at 0xFF), exactly like an auto-incrementing
//! sensor. Plain reads drain a byte queue instead.

use crate::platform::{
    error::{I2cError, PlatformError},
    traits::{I2cConfig, I2cInterface},
    Result,
};
use std::collections::{BTreeMap, VecDeque};
use std::vec::Vec;

/// Recorded bus operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum I2cOp {
    Write { addr: u8, data: Vec<u8> },
    Read { addr: u8, len: usize },
    WriteRead {
        addr: u8,
        write_data: Vec<u8>,
        read_len: usize,
    },
}

/// In-memory I2C bus with per-address register files
#[derive(Debug)]
pub struct MockI2c {
    config: I2cConfig,
    devices: BTreeMap<u8, [u8; 256]>,
    queue: VecDeque<u8>,
    ops: Vec<I2cOp>,
    fault: Option<I2cError>,
}

impl MockI2c {
    pub fn new(config: I2cConfig) -> Self {
        Self {
            config,
            devices: BTreeMap::new(),
            queue: VecDeque::new(),
            ops: Vec::new(),
            fault: None,
        }
    }

    /// Preload consecutive registers of `addr` starting at `start`
    pub fn set_registers(&mut self, addr: u8, start: u8, data: &[u8]) {
        let file = self.devices.entry(addr).or_insert([0; 256]);
        for (offset, byte) in data.iter().enumerate() {
            file[start.wrapping_add(offset as u8) as usize] = *byte;
        }
    }

    /// Current content of one register (zero if never written)
    pub fn register(&self, addr: u8, reg: u8) -> u8 {
        self.devices
            .get(&addr)
            .map_or(0, |file| file[reg as usize])
    }

    /// Bytes returned by plain `read` calls
    pub fn queue_read(&mut self, data: &[u8]) {
        self.queue.extend(data.iter().copied());
    }

    /// Fail every operation with `fault` until called with `None`
    pub fn fail_with(&mut self, fault: Option<I2cError>) {
        self.fault = fault;
    }

    /// Operations seen so far, oldest first
    pub fn ops(&self) -> &[I2cOp] {
        &self.ops
    }

    pub fn clear_ops(&mut self) {
        self.ops.clear();
    }

    /// `(register, value)` pairs written to `addr`, in order
    pub fn register_writes(&self, addr: u8) -> Vec<(u8, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                I2cOp::Write { addr: a, data } if *a == addr && data.len() == 2 => {
                    Some((data[0], data[1]))
                }
                _ => None,
            })
            .collect()
    }

    pub fn frequency(&self) -> u32 {
        self.config.frequency
    }

    fn check_fault(&self) -> Result<()> {
        self.fault.map_or(Ok(()), |e| Err(PlatformError::I2c(e)))
    }
}

impl I2cInterface for MockI2c {
    fn write(&mut self, addr: u8, data: &[u8]) -> Result<()> {
        self.check_fault()?;
        if let Some((&reg, values)) = data.split_first() {
            self.set_registers(addr, reg, values);
        }
        self.ops.push(I2cOp::Write {
            addr,
            data: data.to_vec(),
        });
        Ok(())
    }

    fn read(&mut self, addr: u8, buffer: &mut [u8]) -> Result<()> {
        self.check_fault()?;
        for slot in buffer.iter_mut() {
            *slot = self.queue.pop_front().unwrap_or(0);
        }
        self.ops.push(I2cOp::Read {
            addr,
            len: buffer.len(),
        });
        Ok(())
    }

    fn write_read(&mut self, addr: u8, write_data: &[u8], read_buffer: &mut [u8]) -> Result<()> {
        self.check_fault()?;
        let start = write_data.first().copied().unwrap_or(0);
        for (offset, slot) in read_buffer.iter_mut().enumerate() {
            *slot = self.register(addr, start.wrapping_add(offset as u8));
        }
        self.ops.push(I2cOp::WriteRead {
            addr,
            write_data: write_data.to_vec(),
            read_len: read_buffer.len(),
        });
        Ok(())
    }
}
