//! Rotary encoder decoding
//!
//! The edge handler owns a [`QuadratureDecoder`] and publishes detected
//! steps into a shared [`DirectionLatch`]. The controller drains the latch
//! once per tick.

pub mod decoder;
pub mod latch;

pub use decoder::{Direction, QuadratureDecoder, RotationState};
pub use latch::{DirectionLatch, RotationCounts};
