//! Single-slot direction latch
//!
//! Shared between the encoder edge handler (producer) and the controller
//! tick (consumer). Holds only the most recent step: a second step before
//! the controller reads overwrites the first, and a read clears the slot.
//! The diagnostic counters only ever increase.

use core::fmt;

use portable_atomic::{AtomicU32, AtomicU8, Ordering};

use super::decoder::Direction;

/// Snapshot of the monotonic step counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RotationCounts {
    /// Clockwise detents seen since boot
    pub clockwise: u32,
    /// Counterclockwise detents seen since boot
    pub counterclockwise: u32,
}

impl fmt::Display for RotationCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CW:{} CCW:{}", self.clockwise, self.counterclockwise)
    }
}

/// Lock-free latch, usable from a `static`
pub struct DirectionLatch {
    direction: AtomicU8,
    clockwise: AtomicU32,
    counterclockwise: AtomicU32,
}

impl Default for DirectionLatch {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectionLatch {
    /// Create an empty latch
    pub const fn new() -> Self {
        Self {
            direction: AtomicU8::new(Direction::Stationary as u8),
            clockwise: AtomicU32::new(0),
            counterclockwise: AtomicU32::new(0),
        }
    }

    /// Record a step (producer side)
    pub fn publish(&self, direction: Direction) {
        match direction {
            Direction::Clockwise => {
                self.clockwise.fetch_add(1, Ordering::Relaxed);
            }
            Direction::Counterclockwise => {
                self.counterclockwise.fetch_add(1, Ordering::Relaxed);
            }
            Direction::Stationary => return,
        }
        self.direction.store(direction as u8, Ordering::Release);
    }

    /// Read and clear the latch (consumer side)
    pub fn take(&self) -> Direction {
        Direction::from_u8(
            self.direction
                .swap(Direction::Stationary as u8, Ordering::AcqRel),
        )
    }

    /// Read without clearing
    pub fn peek(&self) -> Direction {
        Direction::from_u8(self.direction.load(Ordering::Acquire))
    }

    /// Current counter values
    pub fn counts(&self) -> RotationCounts {
        RotationCounts {
            clockwise: self.clockwise.load(Ordering::Relaxed),
            counterclockwise: self.counterclockwise.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn test_empty_latch_is_stationary() {
        let latch = DirectionLatch::new();
        assert_eq!(latch.take(), Direction::Stationary);
        assert_eq!(latch.counts(), RotationCounts::default());
    }

    #[test]
    fn test_take_clears() {
        let latch = DirectionLatch::new();
        latch.publish(Direction::Counterclockwise);

        assert_eq!(latch.take(), Direction::Counterclockwise);
        for _ in 0..5 {
            assert_eq!(latch.take(), Direction::Stationary);
        }
    }

    #[test]
    fn test_latest_step_wins() {
        let latch = DirectionLatch::new();
        latch.publish(Direction::Clockwise);
        latch.publish(Direction::Counterclockwise);

        assert_eq!(latch.take(), Direction::Counterclockwise);
        // Both steps were still counted
        assert_eq!(
            latch.counts(),
            RotationCounts {
                clockwise: 1,
                counterclockwise: 1
            }
        );
    }

    #[test]
    fn test_stationary_publish_is_ignored() {
        let latch = DirectionLatch::new();
        latch.publish(Direction::Clockwise);
        latch.publish(Direction::Stationary);
        assert_eq!(latch.peek(), Direction::Clockwise);
    }

    #[test]
    fn test_counts_format() {
        let latch = DirectionLatch::new();
        latch.publish(Direction::Clockwise);
        latch.publish(Direction::Clockwise);
        latch.publish(Direction::Counterclockwise);
        assert_eq!(latch.counts().to_string(), "CW:2 CCW:1");
    }
}
