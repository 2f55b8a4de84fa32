//! Combination value type
//!
//! A combination is three dial positions. The dial has [`DIAL_POSITIONS`]
//! detents, so every digit lies in `0..DIAL_POSITIONS`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of digits in a combination
pub const COMBINATION_LENGTH: usize = 3;

/// Number of detent positions on the dial (values 0-15)
pub const DIAL_POSITIONS: u8 = 16;

/// Errors when constructing a combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CombinationError {
    /// A digit is outside the dial range
    DigitOutOfRange {
        /// Position of the offending digit
        index: u8,
        /// The rejected value
        value: u8,
    },
}

/// A validated three-digit combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Combination([u8; COMBINATION_LENGTH]);

impl Combination {
    /// Factory reset value
    pub const DEFAULT: Combination = Combination([5, 10, 15]);

    /// Create a combination, rejecting digits outside the dial range
    pub fn new(digits: [u8; COMBINATION_LENGTH]) -> Result<Self, CombinationError> {
        for (index, &value) in digits.iter().enumerate() {
            if value >= DIAL_POSITIONS {
                return Err(CombinationError::DigitOutOfRange {
                    index: index as u8,
                    value,
                });
            }
        }
        Ok(Self(digits))
    }

    /// Get the digit at a position
    ///
    /// Panics if `index >= COMBINATION_LENGTH`.
    pub fn digit(&self, index: usize) -> u8 {
        self.0[index]
    }

    /// Get all digits
    pub fn digits(&self) -> [u8; COMBINATION_LENGTH] {
        self.0
    }
}

impl Default for Combination {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<[u8; COMBINATION_LENGTH]> for Combination {
    type Error = CombinationError;

    fn try_from(digits: [u8; COMBINATION_LENGTH]) -> Result<Self, Self::Error> {
        Self::new(digits)
    }
}
