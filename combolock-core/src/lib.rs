//! Board-agnostic core logic for the combination lock firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Quadrature decoding and the single-slot direction latch
//! - Lock state machine (entry, verification, alarm, combination change)
//! - Combination value type
//! - Configuration type definitions
//! - Collaborator traits (display, servo, keypad, panel, storage)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod combination;
pub mod config;
pub mod encoder;
pub mod lock;
pub mod traits;

pub use combination::{Combination, CombinationError, COMBINATION_LENGTH, DIAL_POSITIONS};
pub use config::{ConfigError, LockConfig};
