//! Core infrastructure shared by devices and subsystems

pub mod logging;
