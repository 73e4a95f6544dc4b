//! heading_fuse_core - Pure no_std fusion logic for heading_fuse
//!
//! This crate contains the platform-agnostic algorithms and types behind the
//! LiDAR + IMU telemetry loop. Everything here can be tested on host without
//! feature flags or hardware.
//!
//! # Design Principles
//!
//! - **Zero cfg**: No `#[cfg(feature = ...)]` directives
//! - **Pure no_std**: No std library, no allocator
//! - **Trait abstractions**: Byte streams, register buses and clocks are injected via traits
//!
//! # Modules
//!
//! - [`traits`]: Platform-agnostic I/O and time abstractions
//! - [`lidar`]: TF-Mini frame synchronization, checksum validation and range policy
//! - [`ahrs`]: IMU bias calibration and orientation estimation
//! - [`report`]: Fused report types, status classification and the telemetry line codec
//! - [`parameters`]: Parameter store and fusion parameter definitions

#![no_std]

pub mod ahrs;
pub mod lidar;
pub mod parameters;
pub mod report;
pub mod traits;
