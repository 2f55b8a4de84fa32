//! Dial entry protocol
//!
//! Each of the first two digits must be passed over a number of times in
//! its dialing direction, then locked in by reversing the dial:
//!
//! - First digit: clockwise passes, locked in by a counterclockwise step
//! - Second digit: counterclockwise passes, locked in by a clockwise step
//! - Third digit: clockwise passes, confirmed with the button at the value
//!
//! The value locked in is the one shown before the reversing step.
//! Reversing on the third digit throws the whole entry away.

use core::fmt::Write;

use heapless::String;

use crate::combination::{Combination, COMBINATION_LENGTH, DIAL_POSITIONS};
use crate::config::LockConfig;
use crate::encoder::Direction;
use crate::traits::DISPLAY_COLUMNS;

/// Which digit is being dialed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryPhase {
    First,
    Second,
    Third,
}

impl EntryPhase {
    /// Digit position for this phase
    pub fn index(self) -> usize {
        match self {
            EntryPhase::First => 0,
            EntryPhase::Second => 1,
            EntryPhase::Third => 2,
        }
    }
}

/// Outcome of a single dial step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EntryStep {
    /// Nothing notable happened
    Idle,
    /// A digit was locked in and the phase advanced
    DigitAccepted {
        /// Digit position
        position: u8,
        /// Locked-in value
        value: u8,
    },
    /// Entry was abandoned and reset
    Aborted,
}

/// Progress of the combination currently being dialed
///
/// `entered[i]` is only set once the phase has moved past position `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryState {
    phase: EntryPhase,
    current: u8,
    entered: [Option<u8>; COMBINATION_LENGTH],
    seen: [u8; COMBINATION_LENGTH],
    interacted: bool,
}

impl Default for EntryState {
    fn default() -> Self {
        Self::new()
    }
}

impl EntryState {
    /// Create a cleared entry
    pub const fn new() -> Self {
        Self {
            phase: EntryPhase::First,
            current: 0,
            entered: [None; COMBINATION_LENGTH],
            seen: [0; COMBINATION_LENGTH],
            interacted: false,
        }
    }

    /// Clear everything back to the first digit
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Current phase
    pub fn phase(&self) -> EntryPhase {
        self.phase
    }

    /// Value currently shown on the dial
    pub fn current_value(&self) -> u8 {
        self.current
    }

    /// Locked-in value at a position
    pub fn entered(&self, index: usize) -> Option<u8> {
        self.entered.get(index).copied().flatten()
    }

    /// Number of passes over the target digit at a position
    pub fn seen_count(&self, index: usize) -> u8 {
        self.seen.get(index).copied().unwrap_or(0)
    }

    /// Whether the dial has moved since the last reset
    pub fn has_interacted(&self) -> bool {
        self.interacted
    }

    /// Apply one dial step
    pub fn step(
        &mut self,
        direction: Direction,
        combination: &Combination,
        config: &LockConfig,
    ) -> EntryStep {
        match direction {
            Direction::Clockwise => self.current = (self.current + 1) % DIAL_POSITIONS,
            Direction::Counterclockwise => {
                self.current = (self.current + DIAL_POSITIONS - 1) % DIAL_POSITIONS
            }
            Direction::Stationary => return EntryStep::Idle,
        }
        self.interacted = true;

        match self.phase {
            EntryPhase::First => {
                if direction == Direction::Clockwise && self.current == combination.digit(0) {
                    self.seen[0] = self.seen[0].saturating_add(1);
                }
                if direction == Direction::Counterclockwise
                    && self.seen[0] >= config.first_digit_passes
                {
                    // Undo the reversing step
                    let value = (self.current + 1) % DIAL_POSITIONS;
                    return self.lock_in(EntryPhase::Second, value);
                }
            }
            EntryPhase::Second => {
                if direction == Direction::Counterclockwise && self.current == combination.digit(1)
                {
                    self.seen[1] = self.seen[1].saturating_add(1);
                }
                if direction == Direction::Clockwise && self.seen[1] >= config.second_digit_passes
                {
                    let value = (self.current + DIAL_POSITIONS - 1) % DIAL_POSITIONS;
                    return self.lock_in(EntryPhase::Third, value);
                }
            }
            EntryPhase::Third => {
                if direction == Direction::Counterclockwise {
                    self.reset();
                    return EntryStep::Aborted;
                }
                if self.current == combination.digit(2) {
                    self.seen[2] = self.seen[2].saturating_add(1);
                }
            }
        }

        EntryStep::Idle
    }

    fn lock_in(&mut self, next: EntryPhase, value: u8) -> EntryStep {
        let position = self.phase.index();
        self.entered[position] = Some(value);
        self.phase = next;
        self.current = 0;
        EntryStep::DigitAccepted {
            position: position as u8,
            value,
        }
    }

    /// Check the entry against a combination
    ///
    /// Only meaningful in the third phase; the third digit is the value
    /// currently on the dial.
    pub fn verify(&self, combination: &Combination, config: &LockConfig) -> bool {
        self.phase == EntryPhase::Third
            && self.entered[0] == Some(combination.digit(0))
            && self.seen[0] >= config.first_digit_passes
            && self.entered[1] == Some(combination.digit(1))
            && self.seen[1] >= config.second_digit_passes
            && self.current == combination.digit(2)
            && self.seen[2] >= config.third_digit_passes
    }

    /// Feedback line for the display
    pub fn render(&self) -> String<DISPLAY_COLUMNS> {
        let mut line = String::new();

        let first = self.entered[0].unwrap_or(0);
        let second = self.entered[1].unwrap_or(0);

        // Every variant fits in the line width
        let _ = match (self.interacted, self.phase) {
            (false, _) => write!(line, "- - -"),
            (true, EntryPhase::First) => write!(line, "{:02}-  -  ", self.current),
            (true, EntryPhase::Second) => write!(line, "{:02}-{:02}-  ", first, self.current),
            (true, EntryPhase::Third) => {
                write!(line, "{:02}-{:02}-{:02}", first, second, self.current)
            }
        };

        line
    }
}
