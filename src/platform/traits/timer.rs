//! Timer interface trait

use crate::platform::Result;

/// Blocking delays and a monotonic clock
pub trait TimerInterface {
    /// Busy-wait for `us` microseconds
    fn delay_us(&mut self, us: u32) -> Result<()>;

    /// Busy-wait for `ms` milliseconds
    fn delay_ms(&mut self, ms: u32) -> Result<()>;

    /// Microseconds since an arbitrary epoch
    fn now_us(&self) -> u64;

    /// Milliseconds since an arbitrary epoch
    fn now_ms(&self) -> u64 {
        self.now_us() / 1000
    }
}
