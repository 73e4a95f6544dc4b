//! Transport adapters
//!
//! Bridges the platform peripheral traits onto the transport traits the
//! fusion core consumes: a UART becomes a [`ByteSource`], an I2C bus becomes
//! a [`RegisterBus`].

use crate::platform::{I2cInterface, UartInterface};
use heading_fuse_core::traits::{BusError, ByteSource, RegisterBus};

/// Byte-at-a-time reader over a UART
pub struct UartByteSource<U: UartInterface> {
    uart: U,
    read_errors: u32,
}

impl<U: UartInterface> UartByteSource<U> {
    pub fn new(uart: U) -> Self {
        Self {
            uart,
            read_errors: 0,
        }
    }

    /// Failed UART reads, reported to the decoder as underflow
    pub fn read_errors(&self) -> u32 {
        self.read_errors
    }

    pub fn uart(&self) -> &U {
        &self.uart
    }

    pub fn uart_mut(&mut self) -> &mut U {
        &mut self.uart
    }

    pub fn release(self) -> U {
        self.uart
    }
}

impl<U: UartInterface> ByteSource for UartByteSource<U> {
    fn available(&mut self) -> bool {
        self.uart.available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        match self.uart.read(&mut byte) {
            Ok(1) => Some(byte[0]),
            Ok(_) => None,
            Err(_) => {
                self.read_errors = self.read_errors.wrapping_add(1);
                None
            }
        }
    }
}

/// Register access over an I2C bus
pub struct I2cRegisterBus<I: I2cInterface> {
    i2c: I,
}

impl<I: I2cInterface> I2cRegisterBus<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    pub fn i2c(&self) -> &I {
        &self.i2c
    }

    pub fn i2c_mut(&mut self) -> &mut I {
        &mut self.i2c
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2cInterface> RegisterBus for I2cRegisterBus<I> {
    fn read_registers(&mut self, device: u8, start: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.i2c.write_read(device, &[start], buf)?;
        Ok(())
    }

    fn write_register(&mut self, device: u8, reg: u8, value: u8) -> Result<(), BusError> {
        self.i2c.write(device, &[reg, value])?;
        Ok(())
    }
}
