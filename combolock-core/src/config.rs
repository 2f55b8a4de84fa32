//! Lock configuration
//!
//! The firmware builds its [`LockConfig`] from `lock.toml` at compile time.
//! Host tests use [`LockConfig::default`].

use crate::combination::{Combination, COMBINATION_LENGTH, DIAL_POSITIONS};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Default combination contains a digit outside the dial range
    InvalidDefaultCombination,
    /// A digit pass count is zero
    ZeroPassCount,
    /// Attempt threshold is zero
    ZeroAttempts,
    /// Flash half-period is zero
    ZeroFlashPeriod,
}

/// Lock behaviour configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LockConfig {
    /// Combination used after a cold boot
    pub default_combination: [u8; COMBINATION_LENGTH],
    /// Clockwise passes over the first digit before a reversal locks it in
    pub first_digit_passes: u8,
    /// Counterclockwise passes over the second digit before a reversal locks it in
    pub second_digit_passes: u8,
    /// Clockwise passes over the third digit required at confirm time
    pub third_digit_passes: u8,
    /// Consecutive failed attempts that trigger the alarm
    pub max_failed_attempts: u8,
    /// Indicator on/off half-period for failure and alarm flashing (ms)
    pub flash_half_period_ms: u32,
    /// Number of on/off cycles flashed after a failed attempt
    pub failure_flash_cycles: u8,
    /// Ignore a retained combination and start from the default at boot
    pub reset_combination_on_boot: bool,
}

impl LockConfig {
    /// Default configuration as a constant
    pub const DEFAULT: LockConfig = LockConfig {
        default_combination: [5, 10, 15],
        first_digit_passes: 3,
        second_digit_passes: 2,
        third_digit_passes: 1,
        max_failed_attempts: 3,
        flash_half_period_ms: 250,
        failure_flash_cycles: 2,
        reset_combination_on_boot: true,
    };

    /// Check the configuration for values the lock cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self
            .default_combination
            .iter()
            .any(|&digit| digit >= DIAL_POSITIONS)
        {
            return Err(ConfigError::InvalidDefaultCombination);
        }
        if self.first_digit_passes == 0
            || self.second_digit_passes == 0
            || self.third_digit_passes == 0
        {
            return Err(ConfigError::ZeroPassCount);
        }
        if self.max_failed_attempts == 0 {
            return Err(ConfigError::ZeroAttempts);
        }
        if self.flash_half_period_ms == 0 {
            return Err(ConfigError::ZeroFlashPeriod);
        }
        Ok(())
    }

    /// The default combination as a validated value
    ///
    /// Falls back to [`Combination::DEFAULT`] if the configured digits are
    /// out of range.
    pub fn default_combination(&self) -> Combination {
        Combination::new(self.default_combination).unwrap_or(Combination::DEFAULT)
    }
}

impl Default for LockConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(LockConfig::default().validate(), Ok(()));
        assert_eq!(
            LockConfig::default().default_combination(),
            Combination::DEFAULT
        );
    }

    #[test]
    fn test_rejects_bad_default_combination() {
        let config = LockConfig {
            default_combination: [5, 10, 16],
            ..LockConfig::DEFAULT
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidDefaultCombination)
        );
        assert_eq!(config.default_combination(), Combination::DEFAULT);
    }

    #[test]
    fn test_rejects_zero_counts() {
        let config = LockConfig {
            second_digit_passes: 0,
            ..LockConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroPassCount));

        let config = LockConfig {
            max_failed_attempts: 0,
            ..LockConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroAttempts));

        let config = LockConfig {
            flash_half_period_ms: 0,
            ..LockConfig::DEFAULT
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroFlashPeriod));
    }
}
