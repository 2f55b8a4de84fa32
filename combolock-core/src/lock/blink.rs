//! Indicator blink timing
//!
//! Replaces busy-wait flashing: the controller asks the pattern for the
//! indicator level at each tick's timestamp. Timestamps are wrapping
//! milliseconds.

/// On/off blink pattern starting with the indicators on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlinkPattern {
    started_ms: u32,
    half_period_ms: u32,
    /// Full on/off cycles, or `None` to blink forever
    cycles: Option<u32>,
}

impl BlinkPattern {
    /// Blink for a fixed number of cycles
    pub fn cycles(started_ms: u32, half_period_ms: u32, cycles: u32) -> Self {
        Self {
            started_ms,
            half_period_ms: half_period_ms.max(1),
            cycles: Some(cycles),
        }
    }

    /// Blink until replaced
    pub fn forever(started_ms: u32, half_period_ms: u32) -> Self {
        Self {
            started_ms,
            half_period_ms: half_period_ms.max(1),
            cycles: None,
        }
    }

    fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.started_ms)
    }

    /// Check if a finite pattern has run out
    pub fn is_finished(&self, now_ms: u32) -> bool {
        match self.cycles {
            Some(cycles) => {
                let duration = cycles.saturating_mul(2).saturating_mul(self.half_period_ms);
                self.elapsed(now_ms) >= duration
            }
            None => false,
        }
    }

    /// Indicator level at a point in time
    pub fn is_on(&self, now_ms: u32) -> bool {
        !self.is_finished(now_ms) && (self.elapsed(now_ms) / self.half_period_ms) % 2 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite_pattern() {
        let blink = BlinkPattern::cycles(1000, 250, 2);

        assert!(blink.is_on(1000));
        assert!(blink.is_on(1249));
        assert!(!blink.is_on(1250));
        assert!(blink.is_on(1500));
        assert!(!blink.is_on(1750));
        assert!(!blink.is_finished(1999));
        assert!(blink.is_finished(2000));
        assert!(!blink.is_on(2000));
    }

    #[test]
    fn test_forever_pattern() {
        let blink = BlinkPattern::forever(0, 250);
        assert!(!blink.is_finished(u32::MAX / 2));
        assert!(blink.is_on(10_000));
        assert!(!blink.is_on(10_250));
    }

    #[test]
    fn test_timestamp_wraparound() {
        let blink = BlinkPattern::cycles(u32::MAX - 100, 250, 1);
        assert!(blink.is_on(u32::MAX));
        assert!(!blink.is_on(200));
        assert!(blink.is_finished(400));
    }
}
