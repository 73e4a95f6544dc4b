//! Range sensor drivers
//!
//! - `tfmini`: Benewake TF-Mini serial LiDAR

pub mod tfmini;

pub use tfmini::TfMini;
