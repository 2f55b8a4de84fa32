//! Events produced by the lock controller

use super::change::ChangeRejection;
use crate::combination::Combination;

/// Events that can trigger mode transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockEvent {
    // Entry progress (no mode change)
    /// A digit was locked in by reversing the dial
    DigitAccepted {
        /// Digit position (0 or 1)
        position: u8,
        /// Value locked in
        value: u8,
    },
    /// Reversing on the third digit discarded the entry
    EntryAborted,

    // Verification
    /// Entered combination matched
    Verified,
    /// Entered combination did not match
    VerificationFailed {
        /// Consecutive failures so far
        attempts: u8,
    },
    /// Failure threshold reached
    AttemptsExhausted,
    /// Failure flash finished
    FlashComplete,

    // Unlocked panel actions
    /// Switch + button chord to change the combination
    BeginChange,
    /// Two-button chord to close the bolt
    Relock,

    // Change flow
    /// New combination confirmed and stored
    ChangeApplied(Combination),
    /// New combination discarded
    ChangeRejected(ChangeRejection),
}

impl LockEvent {
    /// Check if this event is caused by a wrong or abandoned entry
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            LockEvent::VerificationFailed { .. }
                | LockEvent::AttemptsExhausted
                | LockEvent::EntryAborted
                | LockEvent::ChangeRejected(_)
        )
    }

    /// Check if this event comes from the change-combination flow
    pub fn is_change_event(&self) -> bool {
        matches!(
            self,
            LockEvent::BeginChange | LockEvent::ChangeApplied(_) | LockEvent::ChangeRejected(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_events() {
        assert!(LockEvent::VerificationFailed { attempts: 1 }.is_failure());
        assert!(LockEvent::AttemptsExhausted.is_failure());
        assert!(LockEvent::ChangeRejected(ChangeRejection::Mismatch).is_failure());
        assert!(!LockEvent::Verified.is_failure());
        assert!(!LockEvent::DigitAccepted { position: 0, value: 5 }.is_failure());
    }

    #[test]
    fn test_change_events() {
        assert!(LockEvent::BeginChange.is_change_event());
        assert!(LockEvent::ChangeApplied(Combination::DEFAULT).is_change_event());
        assert!(!LockEvent::Relock.is_change_event());
    }
}
