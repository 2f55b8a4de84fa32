//! Combination persistence trait

use crate::combination::Combination;

/// Storage for the current combination
///
/// Backed by memory that survives a soft reset only. `load` returns
/// `None` when nothing valid has been stored since power-up.
pub trait CombinationStore {
    /// Load the stored combination, if valid
    fn load(&self) -> Option<Combination>;

    /// Store a new combination
    fn save(&mut self, combination: &Combination);
}
