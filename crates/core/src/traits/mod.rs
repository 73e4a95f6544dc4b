//! Core traits for platform-agnostic fusion logic.
//!
//! This module provides trait abstractions that decouple the fusion
//! algorithms from platform-specific transports and clocks.
//!
//! # Design
//!
//! - Trait definitions are pure and have no feature gates
//! - Mock implementations are always available for host testing
//! - Platform implementations (UART, I2C, timers) live in the root crate

pub mod bus;
pub mod time;

pub use bus::{BusError, ByteSource, RegisterBus};
pub use time::{MockTime, TimeSource};
