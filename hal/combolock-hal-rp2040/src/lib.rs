//! RP2040-specific HAL for the lock firmware
//!
//! This crate provides RP2040 implementations of the shared
//! `combolock-hal` traits:
//!
//! - GPIO wrappers over embassy-rp pins
//! - Retained RAM region that survives a soft reset

#![no_std]

pub mod gpio;
pub mod retained;

pub use gpio::{RpInput, RpOutput};
pub use retained::{RetainedRam, RETAINED_SIZE};

// Re-export shared traits from combolock-hal for convenience
pub use combolock_hal::{InputPin, OutputPin, RetainedStorage};
