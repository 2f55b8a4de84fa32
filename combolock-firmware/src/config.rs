//! Compile-time lock configuration
//!
//! `build.rs` validates `lock.toml` and generates [`LOCK_CONFIG`].

use combolock_core::LockConfig;

include!(concat!(env!("OUT_DIR"), "/lock_config.rs"));

/// Controller tick interval in milliseconds
pub const CONTROLLER_TICK_MS: u64 = 10;

/// Servo pulse generator tick in microseconds
pub const SERVO_TICK_US: u64 = combolock_drivers::servo::TICK_US as u64;
