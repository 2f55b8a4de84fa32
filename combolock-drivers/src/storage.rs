//! Combination store in retained RAM
//!
//! Record layout: `[MAGIC, d0, d1, d2, checksum]`. After power loss the
//! region holds noise, so a record is only accepted when the magic byte,
//! the checksum and the digit range all agree.

use combolock_core::traits::CombinationStore;
use combolock_core::{Combination, COMBINATION_LENGTH};
use combolock_hal::{RetainedError, RetainedStorage};

/// Record marker
const MAGIC: u8 = 0xC5;

/// Bytes per record
pub const RECORD_LEN: usize = COMBINATION_LENGTH + 2;

fn checksum(bytes: &[u8]) -> u8 {
    bytes
        .iter()
        .fold(0xA5u8, |acc, &byte| acc.rotate_left(3).wrapping_add(byte))
}

fn encode(combination: &Combination) -> [u8; RECORD_LEN] {
    let mut record = [0u8; RECORD_LEN];
    record[0] = MAGIC;
    record[1..=COMBINATION_LENGTH].copy_from_slice(&combination.digits());
    record[RECORD_LEN - 1] = checksum(&record[..RECORD_LEN - 1]);
    record
}

fn decode(record: &[u8; RECORD_LEN]) -> Option<Combination> {
    if record[0] != MAGIC || record[RECORD_LEN - 1] != checksum(&record[..RECORD_LEN - 1]) {
        return None;
    }

    let mut digits = [0u8; COMBINATION_LENGTH];
    digits.copy_from_slice(&record[1..=COMBINATION_LENGTH]);
    Combination::new(digits).ok()
}

/// [`CombinationStore`] over any [`RetainedStorage`]
pub struct RetainedCombination<S> {
    storage: S,
}

impl<S: RetainedStorage> RetainedCombination<S> {
    /// Wrap a retained region
    ///
    /// Fails if the region cannot hold a record.
    pub fn new(storage: S) -> Result<Self, RetainedError> {
        if storage.capacity() < RECORD_LEN {
            return Err(RetainedError::OutOfBounds);
        }
        Ok(Self { storage })
    }

    /// Discard the stored record
    pub fn clear(&mut self) {
        self.storage.invalidate();
    }

    /// Release the underlying region
    pub fn into_inner(self) -> S {
        self.storage
    }
}

impl<S: RetainedStorage> CombinationStore for RetainedCombination<S> {
    fn load(&self) -> Option<Combination> {
        let mut record = [0u8; RECORD_LEN];
        self.storage.read(&mut record).ok()?;
        decode(&record)
    }

    fn save(&mut self, combination: &Combination) {
        // Capacity checked in `new`
        let _ = self.storage.write(&encode(combination));
    }
}
