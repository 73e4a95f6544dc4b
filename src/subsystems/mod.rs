//! Subsystems
//!
//! - `fusion`: calibrate, integrate and report loop

pub mod fusion;
