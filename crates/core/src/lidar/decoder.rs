//! Non-blocking TF-Mini frame decoder
//!
//! Called once per loop iteration. It never waits for bytes: it looks at what
//! the [`ByteSource`] already holds and either yields a validated reading,
//! reports why a frame was dropped, or reports that nothing is ready yet.
//!
//! # Synchronization strategies
//!
//! - [`SyncStrategy::PerCall`] (default): header sync happens inside a single
//!   call. A header byte not followed by a second header byte is dropped, and
//!   the seven frame bytes after the header pair are read without re-checking
//!   availability. Nothing is carried between calls, so a frame that is only
//!   partially buffered is lost.
//! - [`SyncStrategy::Buffered`]: partial frames are kept across calls and a
//!   frame that fails its checksum is rescanned for the next header pair
//!   before its bytes are dropped.

use super::frame::{LidarReading, RawFrame, FRAME_HEADER, FRAME_LEN};
use super::policy::RangePolicy;
use crate::traits::ByteSource;

/// Header synchronization strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncStrategy {
    /// Sync and read a whole frame within one call, keep no state
    #[default]
    PerCall,
    /// Accumulate across calls and realign after checksum failures
    Buffered,
}

/// Decoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LidarConfig {
    /// Header byte expected twice at the start of every frame
    pub header: u8,
    /// Range policy applied to checksum-valid frames
    pub policy: RangePolicy,
    /// Header synchronization strategy
    pub sync: SyncStrategy,
}

impl Default for LidarConfig {
    fn default() -> Self {
        Self {
            header: FRAME_HEADER,
            policy: RangePolicy::default(),
            sync: SyncStrategy::default(),
        }
    }
}

/// Reasons a frame was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Byte at a header position was not the header value
    HeaderMismatch,
    /// Stream ran dry in the middle of a frame
    ShortFrame,
    /// Carried checksum does not match the computed one
    ChecksumMismatch { received: u8, computed: u8 },
    /// Distance outside the configured window
    OutOfRange(u16),
}

impl FrameError {
    /// Return variant name as a static string (usable with defmt on embedded)
    pub fn as_str(&self) -> &'static str {
        match self {
            FrameError::HeaderMismatch => "HeaderMismatch",
            FrameError::ShortFrame => "ShortFrame",
            FrameError::ChecksumMismatch { .. } => "ChecksumMismatch",
            FrameError::OutOfRange(_) => "OutOfRange",
        }
    }
}

impl core::fmt::Display for FrameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            FrameError::HeaderMismatch => write!(f, "frame header mismatch"),
            FrameError::ShortFrame => write!(f, "frame truncated"),
            FrameError::ChecksumMismatch { received, computed } => write!(
                f,
                "checksum mismatch: received {:#04x}, computed {:#04x}",
                received, computed
            ),
            FrameError::OutOfRange(distance) => write!(f, "distance {} out of range", distance),
        }
    }
}

/// Running decoder counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderStats {
    /// Readings emitted
    pub readings: u32,
    /// Readings emitted with a clamped distance
    pub clamped: u32,
    /// Bytes dropped while looking for a header
    pub header_mismatches: u32,
    /// Frames lost to stream underflow
    pub short_frames: u32,
    /// Frames dropped on checksum mismatch
    pub checksum_errors: u32,
    /// Valid frames suppressed by the range policy
    pub rejected: u32,
}

/// TF-Mini frame decoder
pub struct FrameDecoder {
    config: LidarConfig,
    buffer: [u8; FRAME_LEN],
    len: usize,
    stats: DecoderStats,
}

impl FrameDecoder {
    /// Create a decoder
    pub fn new(config: LidarConfig) -> Self {
        Self {
            config,
            buffer: [0; FRAME_LEN],
            len: 0,
            stats: DecoderStats::default(),
        }
    }

    /// Active configuration
    pub fn config(&self) -> &LidarConfig {
        &self.config
    }

    /// Counters since creation
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    /// Bytes of a partial frame held over from previous calls
    pub fn pending(&self) -> usize {
        self.len
    }

    /// Drop any partial frame
    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Poll the byte source once.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(reading))` for a checksum-valid frame admitted by the range policy
    /// - `Ok(None)` when no complete frame is available yet
    /// - `Err(FrameError)` when bytes were consumed and dropped
    pub fn poll<B: ByteSource>(
        &mut self,
        source: &mut B,
    ) -> Result<Option<LidarReading>, FrameError> {
        match self.config.sync {
            SyncStrategy::PerCall => self.poll_per_call(source),
            SyncStrategy::Buffered => self.poll_buffered(source),
        }
    }

    fn poll_per_call<B: ByteSource>(
        &mut self,
        source: &mut B,
    ) -> Result<Option<LidarReading>, FrameError> {
        let header = self.config.header;

        if !source.available() {
            return Ok(None);
        }
        let Some(first) = source.read_byte() else {
            return Ok(None);
        };
        if first != header {
            self.stats.header_mismatches += 1;
            return Err(FrameError::HeaderMismatch);
        }

        // The second byte is read whether or not it has arrived yet.
        if source.read_byte() != Some(header) {
            self.stats.header_mismatches += 1;
            return Err(FrameError::HeaderMismatch);
        }

        let mut bytes = [header; FRAME_LEN];
        for slot in bytes.iter_mut().skip(2) {
            match source.read_byte() {
                Some(byte) => *slot = byte,
                None => {
                    self.stats.short_frames += 1;
                    return Err(FrameError::ShortFrame);
                }
            }
        }

        self.validate(RawFrame::from_bytes(bytes))
    }

    fn poll_buffered<B: ByteSource>(
        &mut self,
        source: &mut B,
    ) -> Result<Option<LidarReading>, FrameError> {
        let header = self.config.header;

        while source.available() {
            let Some(byte) = source.read_byte() else {
                break;
            };

            if self.len < 2 {
                if byte == header {
                    self.buffer[self.len] = byte;
                    self.len += 1;
                } else {
                    self.len = 0;
                    self.stats.header_mismatches += 1;
                }
                continue;
            }

            self.buffer[self.len] = byte;
            self.len += 1;
            if self.len < FRAME_LEN {
                continue;
            }

            let frame = RawFrame::from_bytes(self.buffer);
            self.len = 0;
            if !frame.is_valid() {
                self.realign(&frame);
            }
            return self.validate(frame);
        }

        Ok(None)
    }

    /// Keep the tail of a bad frame starting at the next header pair.
    fn realign(&mut self, frame: &RawFrame) {
        let header = self.config.header;
        let bytes = frame.as_bytes();

        let start = (1..FRAME_LEN).find(|&i| {
            bytes[i] == header && (i + 1 == FRAME_LEN || bytes[i + 1] == header)
        });

        if let Some(start) = start {
            let tail = &bytes[start..];
            self.buffer[..tail.len()].copy_from_slice(tail);
            self.len = tail.len();
        }
    }

    fn validate(&mut self, frame: RawFrame) -> Result<Option<LidarReading>, FrameError> {
        if !frame.is_valid() {
            self.stats.checksum_errors += 1;
            return Err(FrameError::ChecksumMismatch {
                received: frame.received_checksum(),
                computed: frame.computed_checksum(),
            });
        }

        let raw_distance = frame.distance();
        match self.config.policy.apply(raw_distance) {
            Some((distance, clamped)) => {
                self.stats.readings += 1;
                if clamped {
                    self.stats.clamped += 1;
                }
                Ok(Some(LidarReading {
                    distance,
                    strength: frame.strength(),
                    clamped,
                }))
            }
            None => {
                self.stats.rejected += 1;
                Err(FrameError::OutOfRange(raw_distance))
            }
        }
    }
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new(LidarConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Fixed-capacity byte queue standing in for a UART receive buffer
    struct ByteQueue {
        bytes: heapless::Vec<u8, 64>,
        pos: usize,
    }

    impl ByteQueue {
        fn new(bytes: &[u8]) -> Self {
            let mut queue = Self {
                bytes: heapless::Vec::new(),
                pos: 0,
            };
            queue.push(bytes);
            queue
        }

        fn push(&mut self, bytes: &[u8]) {
            self.bytes.extend_from_slice(bytes).unwrap();
        }

        fn remaining(&self) -> usize {
            self.bytes.len() - self.pos
        }
    }

    impl ByteSource for ByteQueue {
        fn available(&mut self) -> bool {
            self.pos < self.bytes.len()
        }

        fn read_byte(&mut self) -> Option<u8> {
            let byte = self.bytes.get(self.pos).copied();
            if byte.is_some() {
                self.pos += 1;
            }
            byte
        }
    }

    fn documented_frame() -> [u8; FRAME_LEN] {
        let sum = (0x59u32 + 0x59 + 4 + 10) & 0xFF;
        [0x59, 0x59, 0x04, 0x00, 0x0A, 0x00, 0, 0, sum as u8]
    }

    fn decoder(sync: SyncStrategy, policy: RangePolicy) -> FrameDecoder {
        FrameDecoder::new(LidarConfig {
            header: FRAME_HEADER,
            policy,
            sync,
        })
    }

    #[test]
    fn empty_source_yields_nothing() {
        let mut decoder = FrameDecoder::default();
        let mut source = ByteQueue::new(&[]);
        assert_eq!(decoder.poll(&mut source), Ok(None));
        assert_eq!(decoder.stats(), DecoderStats::default());
    }

    #[test]
    fn documented_frame_emits_reading() {
        let mut decoder = FrameDecoder::default();
        let mut source = ByteQueue::new(&documented_frame());

        let reading = decoder.poll(&mut source).unwrap().unwrap();
        assert_eq!(
            reading,
            LidarReading {
                distance: 4,
                strength: 10,
                clamped: false
            }
        );
        assert_eq!(source.remaining(), 0);
        assert_eq!(decoder.stats().readings, 1);
    }

    #[test]
    fn corrupted_checksum_emits_nothing() {
        let mut bytes = documented_frame();
        bytes[8] = bytes[8].wrapping_add(1);

        for sync in [SyncStrategy::PerCall, SyncStrategy::Buffered] {
            let mut decoder = decoder(sync, RangePolicy::default());
            let mut source = ByteQueue::new(&bytes);
            let result = decoder.poll(&mut source);
            assert!(matches!(result, Err(FrameError::ChecksumMismatch { .. })));
            assert_eq!(decoder.stats().checksum_errors, 1);
            assert_eq!(decoder.stats().readings, 0);
        }
    }

    #[test]
    fn non_header_byte_is_discarded_one_per_call() {
        let mut decoder = FrameDecoder::default();
        let mut source = ByteQueue::new(&[0x00, 0x11]);
        source.push(&documented_frame());

        assert_eq!(decoder.poll(&mut source), Err(FrameError::HeaderMismatch));
        assert_eq!(decoder.poll(&mut source), Err(FrameError::HeaderMismatch));
        assert!(decoder.poll(&mut source).unwrap().is_some());
        assert_eq!(decoder.stats().header_mismatches, 2);
    }

    #[test]
    fn single_header_then_other_byte_drops_both() {
        let mut decoder = FrameDecoder::default();
        let mut source = ByteQueue::new(&[0x59, 0x10]);

        assert_eq!(decoder.poll(&mut source), Err(FrameError::HeaderMismatch));
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn per_call_loses_partially_buffered_frame() {
        let frame = documented_frame();
        let mut decoder = FrameDecoder::default();
        let mut source = ByteQueue::new(&frame[..4]);

        assert_eq!(decoder.poll(&mut source), Err(FrameError::ShortFrame));
        source.push(&frame[4..]);

        // Remaining bytes are not a header pair, so they drain as noise
        while source.available() {
            assert!(decoder.poll(&mut source).is_err());
        }
        assert_eq!(decoder.stats().readings, 0);
        assert_eq!(decoder.stats().short_frames, 1);
    }

    #[test]
    fn buffered_keeps_partial_frame_across_calls() {
        let frame = documented_frame();
        let mut decoder = decoder(SyncStrategy::Buffered, RangePolicy::default());
        let mut source = ByteQueue::new(&frame[..4]);

        assert_eq!(decoder.poll(&mut source), Ok(None));
        assert_eq!(decoder.pending(), 4);

        source.push(&frame[4..]);
        let reading = decoder.poll(&mut source).unwrap().unwrap();
        assert_eq!(reading.distance, 4);
        assert_eq!(decoder.pending(), 0);
    }

    #[test]
    fn per_call_loses_frame_after_spurious_header() {
        let mut decoder = FrameDecoder::default();
        let mut source = ByteQueue::new(&[0x59]);
        source.push(&documented_frame());

        let mut readings = 0;
        while source.available() {
            if let Ok(Some(_)) = decoder.poll(&mut source) {
                readings += 1;
            }
        }
        assert_eq!(readings, 0);
        assert_eq!(decoder.stats().checksum_errors, 1);
    }

    #[test]
    fn buffered_recovers_frame_after_spurious_header() {
        let mut decoder = decoder(SyncStrategy::Buffered, RangePolicy::default());
        let mut source = ByteQueue::new(&[0x59]);
        source.push(&documented_frame());

        assert!(matches!(
            decoder.poll(&mut source),
            Err(FrameError::ChecksumMismatch { .. })
        ));
        let reading = decoder.poll(&mut source).unwrap().unwrap();
        assert_eq!(reading.distance, 4);
        assert_eq!(reading.strength, 10);
    }

    #[test]
    fn buffered_skips_noise_within_one_call() {
        let mut decoder = decoder(SyncStrategy::Buffered, RangePolicy::default());
        let mut source = ByteQueue::new(&[0x01, 0x59, 0x02, 0x03]);
        source.push(&documented_frame());

        let reading = decoder.poll(&mut source).unwrap().unwrap();
        assert_eq!(reading.distance, 4);
        assert_eq!(decoder.stats().header_mismatches, 3);
    }

    #[test]
    fn clamp_policy_reports_ceiling() {
        let bytes = *RawFrame::encode(FRAME_HEADER, 350, 900, 0).as_bytes();
        let mut decoder = decoder(SyncStrategy::PerCall, RangePolicy::Clamp { ceiling: 70 });
        let mut source = ByteQueue::new(&bytes);

        let reading = decoder.poll(&mut source).unwrap().unwrap();
        assert_eq!(reading.distance, 70);
        assert_eq!(reading.strength, 900);
        assert!(reading.clamped);
        assert_eq!(decoder.stats().clamped, 1);
    }

    #[test]
    fn reject_policy_suppresses_out_of_range() {
        let mut decoder = decoder(SyncStrategy::PerCall, RangePolicy::reject_default());

        for (distance, expected) in [(0u16, false), (1, true), (1199, true), (1200, false)] {
            let bytes = *RawFrame::encode(FRAME_HEADER, distance, 1, 0).as_bytes();
            let mut source = ByteQueue::new(&bytes);
            let result = decoder.poll(&mut source);
            if expected {
                assert_eq!(result.unwrap().unwrap().distance, distance);
            } else {
                assert_eq!(result, Err(FrameError::OutOfRange(distance)));
            }
        }
        assert_eq!(decoder.stats().rejected, 2);
    }

    #[test]
    fn custom_header_byte() {
        let bytes = *RawFrame::encode(0x5A, 12, 34, 0).as_bytes();
        let mut decoder = FrameDecoder::new(LidarConfig {
            header: 0x5A,
            ..LidarConfig::default()
        });
        let mut source = ByteQueue::new(&bytes);
        assert_eq!(decoder.poll(&mut source).unwrap().unwrap().distance, 12);
    }

    #[test]
    fn back_to_back_frames_decode_one_per_call() {
        let mut decoder = FrameDecoder::default();
        let mut source = ByteQueue::new(RawFrame::encode(FRAME_HEADER, 10, 1, 0).as_bytes());
        source.push(RawFrame::encode(FRAME_HEADER, 20, 2, 0).as_bytes());

        assert_eq!(decoder.poll(&mut source).unwrap().unwrap().distance, 10);
        assert_eq!(decoder.poll(&mut source).unwrap().unwrap().distance, 20);
        assert_eq!(decoder.poll(&mut source), Ok(None));
    }

    #[test]
    fn frame_error_display() {
        let err = FrameError::ChecksumMismatch {
            received: 0x01,
            computed: 0xC0,
        };
        let mut text: heapless::String<64> = heapless::String::new();
        core::fmt::write(&mut text, format_args!("{}", err)).unwrap();
        assert_eq!(
            text.as_str(),
            "checksum mismatch: received 0x01, computed 0xc0"
        );
        assert_eq!(err.as_str(), "ChecksumMismatch");
    }
}
