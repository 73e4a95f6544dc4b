//! Simulated clock

use crate::platform::{traits::TimerInterface, Result};

/// Clock that jumps forward by each requested delay
#[derive(Debug, Default)]
pub struct MockTimer {
    now_us: u64,
    delay_calls: u32,
}

impl MockTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of delay calls made so far
    pub fn delay_calls(&self) -> u32 {
        self.delay_calls
    }
}

impl TimerInterface for MockTimer {
    fn delay_us(&mut self, us: u32) -> Result<()> {
        self.now_us = self.now_us.wrapping_add(us as u64);
        self.delay_calls += 1;
        Ok(())
    }

    fn delay_ms(&mut self, ms: u32) -> Result<()> {
        self.delay_us(ms.saturating_mul(1000))
    }

    fn now_us(&self) -> u64 {
        self.now_us
    }
}
