//! Embassy async tasks
//!
//! Each task runs independently and communicates via the statics in
//! `channels`.

pub mod controller;
pub mod display;
pub mod encoder;
pub mod servo;

pub use controller::{controller_task, LockPeripherals};
pub use display::{display_task, Display};
pub use encoder::encoder_task;
pub use servo::servo_task;
