//! Peripheral drivers
//!
//! This crate provides concrete implementations of the traits defined
//! in combolock-core for the lock's peripherals:
//!
//! - Servo pulse generation (software PWM on a plain GPIO)
//! - HD44780 character LCD behind a PCF8574 I2C expander
//! - 4x4 matrix keypad
//! - Button and switch panel
//! - Combination store in retained RAM

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod keypad;
pub mod lcd;
pub mod panel;
pub mod servo;
pub mod storage;

pub use keypad::MatrixKeypad;
pub use lcd::Lcd1602;
pub use panel::ButtonPanel;
pub use servo::{PulseGenerator, PulseWidthRegister, ServoOutput};
pub use storage::RetainedCombination;
