//! TF-Mini LiDAR driver
//!
//! Owns the byte stream and the frame decoder. Each [`TfMini::poll`] runs
//! the decoder once; framing faults are counted and logged, never returned,
//! so a noisy line cannot stall the caller.

use heading_fuse_core::lidar::{DecoderStats, FrameDecoder, FrameError, LidarConfig, LidarReading};
use heading_fuse_core::traits::ByteSource;

/// TF-Mini LiDAR on a byte stream
pub struct TfMini<B: ByteSource> {
    source: B,
    decoder: FrameDecoder,
    last_reading: Option<LidarReading>,
    last_error: Option<FrameError>,
}

impl<B: ByteSource> TfMini<B> {
    pub fn new(source: B, config: LidarConfig) -> Self {
        Self {
            source,
            decoder: FrameDecoder::new(config),
            last_reading: None,
            last_error: None,
        }
    }

    /// Poll for one frame.
    ///
    /// Returns the reading when a valid, admitted frame was completed on
    /// this call.
    pub fn poll(&mut self) -> Option<LidarReading> {
        match self.decoder.poll(&mut self.source) {
            Ok(Some(reading)) => {
                if reading.clamped {
                    crate::log_trace!("LiDAR distance clamped to {}", reading.distance);
                }
                self.last_reading = Some(reading);
                Some(reading)
            }
            Ok(None) => None,
            Err(err) => {
                self.log_frame_error(&err);
                self.last_error = Some(err);
                None
            }
        }
    }

    fn log_frame_error(&self, err: &FrameError) {
        match err {
            FrameError::ChecksumMismatch { received, computed } => {
                crate::log_warn!(
                    "LiDAR checksum mismatch: received {} computed {}",
                    received,
                    computed
                );
            }
            FrameError::OutOfRange(distance) => {
                crate::log_debug!("LiDAR distance {} outside range, dropped", distance);
            }
            other => {
                crate::log_trace!("LiDAR framing: {}", other.as_str());
            }
        }
    }

    /// Most recent accepted reading
    pub fn last_reading(&self) -> Option<LidarReading> {
        self.last_reading
    }

    /// Most recent framing fault
    pub fn last_error(&self) -> Option<FrameError> {
        self.last_error
    }

    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }

    pub fn config(&self) -> &LidarConfig {
        self.decoder.config()
    }

    pub fn source_mut(&mut self) -> &mut B {
        &mut self.source
    }

    /// Drop any partially received frame
    pub fn resync(&mut self) {
        self.decoder.reset();
    }
}
