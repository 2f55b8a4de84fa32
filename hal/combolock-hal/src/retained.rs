//! Retained memory abstraction
//!
//! A small byte region that keeps its contents across a soft reset but
//! holds garbage after power loss. Implementations only move bytes; it is
//! up to the caller to frame the data so that a cold-boot region can be
//! told apart from a valid one.

/// Errors from retained memory operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RetainedError {
    /// Access extends past the end of the retained region
    OutOfBounds,
}

/// Retained storage trait
pub trait RetainedStorage {
    /// Size of the retained region in bytes
    fn capacity(&self) -> usize;

    /// Fill `buffer` from the start of the retained region
    fn read(&self, buffer: &mut [u8]) -> Result<(), RetainedError>;

    /// Overwrite the start of the retained region with `data`
    fn write(&mut self, data: &[u8]) -> Result<(), RetainedError>;

    /// Fill the region with zeros
    fn invalidate(&mut self);
}
