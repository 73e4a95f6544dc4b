//! Fusion loop counters

use heading_fuse_core::lidar::DecoderStats;

/// Running loop statistics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    /// Completed cycles
    pub cycles: u32,
    /// Reports handed to the sink successfully
    pub reports: u32,
    /// Readings whose distance was clamped
    pub clamped: u32,
    /// Bytes dropped while looking for a frame header
    pub header_mismatches: u32,
    /// Frames cut short by an empty stream
    pub short_frames: u32,
    /// Frames dropped on checksum mismatch
    pub checksum_errors: u32,
    /// Frames suppressed by the range policy
    pub rejected: u32,
    /// Failed IMU reads
    pub imu_errors: u32,
    /// Reports composed while the orientation was stale
    pub stale_reports: u32,
    /// Reports the sink failed to deliver
    pub sink_errors: u32,
}

impl LoopStats {
    /// Copy the framing counters from the decoder
    pub fn absorb_framing(&mut self, decoder: &DecoderStats) {
        self.clamped = decoder.clamped;
        self.header_mismatches = decoder.header_mismatches;
        self.short_frames = decoder.short_frames;
        self.checksum_errors = decoder.checksum_errors;
        self.rejected = decoder.rejected;
    }

    /// All frames dropped for any reason
    pub fn framing_errors(&self) -> u32 {
        self.header_mismatches
            .saturating_add(self.short_frames)
            .saturating_add(self.checksum_errors)
            .saturating_add(self.rejected)
    }
}
