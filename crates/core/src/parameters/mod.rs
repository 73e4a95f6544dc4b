//! Parameter management types
//!
//! A small named-value store plus the fusion parameter definitions that map
//! store entries onto the LiDAR, AHRS and report configurations.

pub mod error;
pub mod fusion;
pub mod storage;

pub use error::ParameterError;
pub use fusion::FusionParams;
pub use storage::{ParamName, ParamValue, ParameterStore, MAX_PARAMS, PARAM_NAME_LEN};
