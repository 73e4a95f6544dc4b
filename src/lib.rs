#![cfg_attr(not(test), no_std)]

//! heading_fuse - LiDAR range and IMU heading telemetry
//!
//! This library provides the platform abstraction, device drivers and the
//! fusion loop that pairs TF-Mini range frames with MPU-6050 heading. The
//! algorithms themselves live in `heading_fuse_core`.

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Platform abstraction layer
pub mod platform;

// Device drivers using platform abstraction
pub mod devices;

// Logging
pub mod core;

// Report output
pub mod communication;

// Fusion loop
pub mod subsystems;
