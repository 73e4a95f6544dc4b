//! TF-Mini LiDAR framing
//!
//! The sensor streams fixed 9-byte frames over UART:
//!
//! ```text
//! ┌──────┬──────┬────────┬────────┬──────────┬──────────┬───────┬───────┬──────────┐
//! │ 0x59 │ 0x59 │ Dist_L │ Dist_H │ Stren_L  │ Stren_H  │ Aux_L │ Aux_H │ Checksum │
//! └──────┴──────┴────────┴────────┴──────────┴──────────┴───────┴───────┴──────────┘
//! ```
//!
//! The checksum is the low byte of the sum of the first eight bytes.
//!
//! - [`frame`]: Typed 9-byte frame and checksum
//! - [`policy`]: Plausible-range policy (reject or clamp)
//! - [`decoder`]: Non-blocking header sync and frame validation

pub mod decoder;
pub mod frame;
pub mod policy;

pub use decoder::{DecoderStats, FrameDecoder, FrameError, LidarConfig, SyncStrategy};
pub use frame::{checksum, LidarReading, RawFrame, FRAME_HEADER, FRAME_LEN};
pub use policy::{RangePolicy, DEFAULT_CLAMP_CEILING, DEFAULT_REJECT_MAX, DEFAULT_REJECT_MIN};
