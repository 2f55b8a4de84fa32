//! Servo driver trait
//!
//! The bolt servo only ever sits at one of three positions. The lock
//! never reads the position back from hardware.

/// Commanded servo position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServoPosition {
    /// Neutral, 1.5 ms pulse
    #[default]
    Center,
    /// Full clockwise, 0.5 ms pulse (bolt closed)
    FullClockwise,
    /// Full counterclockwise, 2.5 ms pulse (bolt open)
    FullCounterclockwise,
}

impl ServoPosition {
    /// Position that holds the bolt closed
    pub const CLOSED: ServoPosition = ServoPosition::FullClockwise;

    /// Position that retracts the bolt
    pub const OPEN: ServoPosition = ServoPosition::FullCounterclockwise;

    /// Pulse width for this position in microseconds
    pub fn pulse_width_us(self) -> u32 {
        match self {
            ServoPosition::Center => 1500,
            ServoPosition::FullClockwise => 500,
            ServoPosition::FullCounterclockwise => 2500,
        }
    }
}

/// Trait for hobby servo outputs
pub trait ServoDriver {
    /// Apply a position; takes effect on the next pulse period
    fn command(&mut self, position: ServoPosition);

    /// Last commanded position
    fn position(&self) -> ServoPosition;
}
