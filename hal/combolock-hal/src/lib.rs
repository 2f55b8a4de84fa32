//! Combolock Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The lock logic and peripheral drivers are written
//! against these traits so they run unchanged on the board and on the host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  combolock-firmware / combolock-drivers │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  combolock-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ combolock-hal-rp2040│
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`retained::RetainedStorage`] - Memory that survives a soft reset

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod retained;

// Re-export key traits at crate root for convenience
pub use gpio::{ActiveLow, InputPin, OutputPin};
pub use retained::{RetainedError, RetainedStorage};
