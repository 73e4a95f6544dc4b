//! Monotonic clock abstraction.
//!
//! The orientation estimator integrates angular rate over wall-clock time, so
//! every cycle needs a monotonic millisecond timestamp. `TimeSource` hides the
//! platform timer; `MockTime` drives deterministic host tests.

use core::cell::Cell;

/// Platform-agnostic monotonic time source.
///
/// # Example
///
/// ```
/// use heading_fuse_core::traits::{MockTime, TimeSource};
///
/// fn elapsed_seconds<T: TimeSource>(time: &T, previous_ms: u64) -> f32 {
///     time.elapsed_ms_since(previous_ms) as f32 / 1000.0
/// }
///
/// let time = MockTime::new();
/// time.advance_ms(250);
/// assert_eq!(elapsed_seconds(&time, 0), 0.25);
/// ```
pub trait TimeSource: Clone + Send + Sync {
    /// Returns current time in milliseconds since system start.
    fn now_ms(&self) -> u64;

    /// Returns current time in microseconds since system start.
    fn now_us(&self) -> u64;

    /// Milliseconds elapsed since `reference_ms`, saturating at zero.
    fn elapsed_ms_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

/// Mock time source with manual advancement.
///
/// Clones are independent clocks. To drive a component from a test, hand it
/// `&MockTime` and advance the original.
///
/// ```
/// use heading_fuse_core::traits::{MockTime, TimeSource};
///
/// let time = MockTime::new();
/// time.advance_ms(20);
/// assert_eq!(time.now_ms(), 20);
/// assert_eq!(time.now_us(), 20_000);
/// ```
#[derive(Clone, Default)]
pub struct MockTime {
    current_us: Cell<u64>,
}

// Safety: MockTime is only used in single-threaded test contexts where Cell
// is sound. The Send + Sync bounds exist for embedded clock implementations.
unsafe impl Send for MockTime {}
unsafe impl Sync for MockTime {}

impl MockTime {
    /// Creates a new `MockTime` starting at time 0.
    pub fn new() -> Self {
        Self {
            current_us: Cell::new(0),
        }
    }

    /// Creates a new `MockTime` starting at `ms` milliseconds.
    pub fn with_initial_ms(ms: u64) -> Self {
        Self {
            current_us: Cell::new(ms * 1000),
        }
    }

    /// Sets the current time to an absolute value in milliseconds.
    pub fn set_ms(&self, ms: u64) {
        self.current_us.set(ms * 1000);
    }

    /// Advances the clock by `us` microseconds.
    pub fn advance_us(&self, us: u64) {
        self.current_us.set(self.current_us.get() + us);
    }

    /// Advances the clock by `ms` milliseconds.
    pub fn advance_ms(&self, ms: u64) {
        self.advance_us(ms * 1000);
    }
}

impl<T: TimeSource> TimeSource for &T {
    fn now_ms(&self) -> u64 {
        (**self).now_ms()
    }

    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.current_us.get() / 1000
    }

    fn now_us(&self) -> u64 {
        self.current_us.get()
    }
}
