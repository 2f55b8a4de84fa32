//! Hobby servo driven by a software pulse train
//!
//! The servo signal is a plain GPIO toggled from a fixed-rate timer tick.
//! Each 20 ms period starts with a rising edge; the line falls once the
//! commanded pulse width has elapsed.
//!
//! # Usage
//!
//! ```ignore
//! static SERVO: PulseWidthRegister = PulseWidthRegister::new(ServoPosition::CLOSED);
//!
//! // Controller side:
//! ServoOutput::new(&SERVO).command(ServoPosition::OPEN);
//!
//! // Every 500 us:
//! if let Some(level) = generator.tick(SERVO.width_us()) {
//!     pin.set_state(level);
//! }
//! ```

use combolock_core::traits::{ServoDriver, ServoPosition};
use portable_atomic::{AtomicU8, Ordering};

/// Timer tick driving the pulse generator
pub const TICK_US: u32 = 500;

/// Servo frame period
pub const PERIOD_US: u32 = 20_000;

/// Commanded position shared between the controller and the pulse task
///
/// Read once at the start of every period, so a change never produces a
/// truncated pulse.
pub struct PulseWidthRegister {
    position: AtomicU8,
}

impl PulseWidthRegister {
    /// Create a register holding `position`
    pub const fn new(position: ServoPosition) -> Self {
        Self {
            position: AtomicU8::new(encode(position)),
        }
    }

    /// Store a new position
    pub fn set(&self, position: ServoPosition) {
        self.position.store(encode(position), Ordering::Release);
    }

    /// Currently commanded position
    pub fn get(&self) -> ServoPosition {
        decode(self.position.load(Ordering::Acquire))
    }

    /// Pulse width for the commanded position
    pub fn width_us(&self) -> u32 {
        self.get().pulse_width_us()
    }
}

const fn encode(position: ServoPosition) -> u8 {
    match position {
        ServoPosition::Center => 0,
        ServoPosition::FullClockwise => 1,
        ServoPosition::FullCounterclockwise => 2,
    }
}

fn decode(raw: u8) -> ServoPosition {
    match raw {
        1 => ServoPosition::FullClockwise,
        2 => ServoPosition::FullCounterclockwise,
        _ => ServoPosition::Center,
    }
}

/// [`ServoDriver`] writing into a shared [`PulseWidthRegister`]
pub struct ServoOutput<'a> {
    register: &'a PulseWidthRegister,
}

impl<'a> ServoOutput<'a> {
    /// Create an output bound to a register
    pub fn new(register: &'a PulseWidthRegister) -> Self {
        Self { register }
    }
}

impl ServoDriver for ServoOutput<'_> {
    fn command(&mut self, position: ServoPosition) {
        self.register.set(position);
    }

    fn position(&self) -> ServoPosition {
        self.register.get()
    }
}

/// Countdown pulse generator
///
/// `tick()` is called every [`TICK_US`] and reports level changes.
#[derive(Debug, Clone)]
pub struct PulseGenerator {
    /// Ticks until the next rising edge
    until_rise: u32,
    /// Ticks until the falling edge, 0 when low
    until_fall: u32,
}

impl Default for PulseGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PulseGenerator {
    const PERIOD_TICKS: u32 = PERIOD_US / TICK_US;

    /// Create a generator that rises on the first tick
    pub const fn new() -> Self {
        Self {
            until_rise: 0,
            until_fall: 0,
        }
    }

    /// Advance one tick
    ///
    /// `width_us` is only sampled when a new period starts. Returns the new
    /// line level if it changed.
    pub fn tick(&mut self, width_us: u32) -> Option<bool> {
        let mut edge = None;

        if self.until_fall > 0 {
            self.until_fall -= 1;
            if self.until_fall == 0 {
                edge = Some(false);
            }
        }

        if self.until_rise == 0 {
            self.until_rise = Self::PERIOD_TICKS;
            self.until_fall = (width_us / TICK_US).clamp(1, Self::PERIOD_TICKS - 1);
            edge = Some(true);
        }
        self.until_rise -= 1;

        edge
    }

    /// Check if the line is currently high
    pub fn is_high(&self) -> bool {
        self.until_fall > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec::Vec;

    /// Tick numbers of every edge over `ticks` ticks
    fn edges(generator: &mut PulseGenerator, width_us: u32, ticks: u32) -> Vec<(u32, bool)> {
        (0..ticks)
            .filter_map(|tick| generator.tick(width_us).map(|level| (tick, level)))
            .collect()
    }

    #[test]
    fn test_center_pulse() {
        let mut generator = PulseGenerator::new();
        let edges = edges(&mut generator, 1500, 81);
        assert_eq!(
            edges,
            [(0, true), (3, false), (40, true), (43, false), (80, true)]
        );
    }

    #[test]
    fn test_high_time_matches_width() {
        for position in [
            ServoPosition::Center,
            ServoPosition::FullClockwise,
            ServoPosition::FullCounterclockwise,
        ] {
            let mut generator = PulseGenerator::new();
            let width = position.pulse_width_us();
            let high_ticks = (0..40)
                .filter(|_| {
                    generator.tick(width);
                    generator.is_high()
                })
                .count() as u32;
            assert_eq!(high_ticks * TICK_US, width);
        }
    }

    #[test]
    fn test_width_sampled_per_period() {
        let mut generator = PulseGenerator::new();
        generator.tick(500);
        // Changing mid-pulse does not stretch the current pulse
        assert_eq!(generator.tick(2500), Some(false));

        for tick in 2..40 {
            assert_eq!(generator.tick(2500), None, "tick {}", tick);
        }
        assert_eq!(generator.tick(2500), Some(true));
        let edges = edges(&mut generator, 2500, 10);
        assert_eq!(edges, [(4, false)]);
    }

    #[test]
    fn test_register_and_output() {
        let register = PulseWidthRegister::new(ServoPosition::CLOSED);
        assert_eq!(register.width_us(), 500);

        let mut output = ServoOutput::new(&register);
        output.command(ServoPosition::OPEN);
        assert_eq!(output.position(), ServoPosition::OPEN);
        assert_eq!(register.width_us(), 2500);

        output.command(ServoPosition::Center);
        assert_eq!(register.get(), ServoPosition::Center);
    }
}
