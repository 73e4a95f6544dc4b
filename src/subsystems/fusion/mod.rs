//! LiDAR + IMU fusion subsystem
//!
//! - `runner`: the polling loop ([`FusionLoop`]) and its configuration
//! - `stats`: loop counters

pub mod runner;
pub mod stats;

pub use runner::{FusionConfig, FusionLoop};
pub use stats::LoopStats;
