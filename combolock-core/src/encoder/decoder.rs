//! Quadrature decoder
//!
//! Decodes the two encoder wipers into detent steps. A step is only
//! recognised when the dial lands on the LOW_LOW detent, and only when the
//! two samples before it came from HIGH_HIGH through one of the
//! intermediate states:
//!
//! ```text
//! CW:  HIGH_HIGH -> HIGH_LOW -> LOW_LOW
//! CCW: HIGH_HIGH -> LOW_HIGH -> LOW_LOW
//! ```
//!
//! Every other sequence (bounce, partial turns, invalid reads) just
//! shifts the history.

use super::latch::DirectionLatch;

/// Dial movement reported to the lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Direction {
    /// No step since the last read
    #[default]
    Stationary = 0,
    /// One detent clockwise
    Clockwise = 1,
    /// One detent counterclockwise
    Counterclockwise = 2,
}

impl Direction {
    /// Decode from the latch representation
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Direction::Clockwise,
            2 => Direction::Counterclockwise,
            _ => Direction::Stationary,
        }
    }
}

/// Classified wiper state, named `<B>_<A>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RotationState {
    HighHigh,
    HighLow,
    LowLow,
    LowHigh,
    /// Transient invalid read
    Unknown,
}

impl RotationState {
    /// Classify a raw `(b << 1) | a` sample
    pub fn from_quadrature(bits: u8) -> Self {
        match bits {
            0b00 => RotationState::LowLow,
            0b01 => RotationState::LowHigh,
            0b10 => RotationState::HighLow,
            0b11 => RotationState::HighHigh,
            _ => RotationState::Unknown,
        }
    }

    /// Classify the two wiper levels
    pub fn from_pins(a: bool, b: bool) -> Self {
        Self::from_quadrature(((b as u8) << 1) | a as u8)
    }
}

/// Three-sample quadrature decoder
#[derive(Debug, Clone)]
pub struct QuadratureDecoder {
    last: RotationState,
    before_last: RotationState,
}

impl Default for QuadratureDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadratureDecoder {
    /// Create a decoder resting at the HIGH_HIGH detent
    pub const fn new() -> Self {
        Self {
            last: RotationState::HighHigh,
            before_last: RotationState::HighHigh,
        }
    }

    /// Feed one sample taken after an edge on either wiper
    ///
    /// Returns the step completed by this sample, if any.
    pub fn update(&mut self, a: bool, b: bool) -> Option<Direction> {
        self.update_state(RotationState::from_pins(a, b))
    }

    /// Feed an already-classified sample
    pub fn update_state(&mut self, current: RotationState) -> Option<Direction> {
        let step = match (self.before_last, self.last, current) {
            (RotationState::HighHigh, RotationState::HighLow, RotationState::LowLow) => {
                Some(Direction::Clockwise)
            }
            (RotationState::HighHigh, RotationState::LowHigh, RotationState::LowLow) => {
                Some(Direction::Counterclockwise)
            }
            _ => None,
        };

        self.before_last = self.last;
        self.last = current;

        step
    }

    /// Feed a sample and publish any completed step to the latch
    ///
    /// This is the whole body of the encoder edge handler.
    pub fn feed(&mut self, a: bool, b: bool, latch: &DirectionLatch) -> Option<Direction> {
        let step = self.update(a, b);
        if let Some(direction) = step {
            latch.publish(direction);
        }
        step
    }

    /// The two most recent classified samples, oldest first
    pub fn history(&self) -> (RotationState, RotationState) {
        (self.before_last, self.last)
    }
}
