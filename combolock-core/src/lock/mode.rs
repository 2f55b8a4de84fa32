//! Lock mode definition

use super::events::LockEvent;
use crate::traits::ServoPosition;

/// Lock modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockMode {
    /// Bolt closed, dial entry active
    Locked,
    /// Sub-state of `Locked`: flashing after a wrong entry
    Failed,
    /// Bolt open
    Unlocked,
    /// Bolt open, typing a new combination
    Changing,
    /// Tamper lockout, cleared only by reset
    Alarmed,
}

impl LockMode {
    /// Check if the bolt is closed in this mode
    pub fn is_locked(&self) -> bool {
        matches!(self, LockMode::Locked | LockMode::Failed | LockMode::Alarmed)
    }

    /// Check if this mode can only be left by a reset
    pub fn is_terminal(&self) -> bool {
        matches!(self, LockMode::Alarmed)
    }

    /// Servo position held in this mode
    pub fn bolt_position(&self) -> ServoPosition {
        if self.is_locked() {
            ServoPosition::CLOSED
        } else {
            ServoPosition::OPEN
        }
    }

    /// Short label shown on the status line
    pub fn label(&self) -> &'static str {
        match self {
            LockMode::Locked | LockMode::Failed => "LOCKED",
            LockMode::Unlocked => "UNLOCKED",
            LockMode::Changing => "enter",
            LockMode::Alarmed => "ALARM",
        }
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: &LockEvent) -> Self {
        use LockMode::*;

        match (self, event) {
            // Locked transitions
            (Locked, LockEvent::Verified) => Unlocked,
            (Locked, LockEvent::VerificationFailed { .. }) => Failed,
            (Locked, LockEvent::AttemptsExhausted) => Alarmed,

            // Failed transitions
            (Failed, LockEvent::FlashComplete) => Locked,

            // Unlocked transitions
            (Unlocked, LockEvent::BeginChange) => Changing,
            (Unlocked, LockEvent::Relock) => Locked,

            // Changing transitions
            (Changing, LockEvent::ChangeApplied(_)) => Unlocked,
            (Changing, LockEvent::ChangeRejected(_)) => Unlocked,

            // Alarmed has no exits; everything else stays put
            _ => self,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::Combination;
    use crate::lock::change::ChangeRejection;

    #[test]
    fn test_unlock_flow() {
        let mode = LockMode::Locked;
        let unlocked = mode.transition(&LockEvent::Verified);
        assert_eq!(unlocked, LockMode::Unlocked);

        let locked = unlocked.transition(&LockEvent::Relock);
        assert_eq!(locked, LockMode::Locked);
    }

    #[test]
    fn test_failure_flow() {
        let failed = LockMode::Locked.transition(&LockEvent::VerificationFailed { attempts: 1 });
        assert_eq!(failed, LockMode::Failed);
        assert_eq!(failed.transition(&LockEvent::FlashComplete), LockMode::Locked);

        let alarmed = LockMode::Locked.transition(&LockEvent::AttemptsExhausted);
        assert_eq!(alarmed, LockMode::Alarmed);
    }

    #[test]
    fn test_change_flow() {
        let changing = LockMode::Unlocked.transition(&LockEvent::BeginChange);
        assert_eq!(changing, LockMode::Changing);

        let applied = changing.transition(&LockEvent::ChangeApplied(Combination::DEFAULT));
        assert_eq!(applied, LockMode::Unlocked);

        let rejected = changing.transition(&LockEvent::ChangeRejected(ChangeRejection::Incomplete));
        assert_eq!(rejected, LockMode::Unlocked);
    }

    #[test]
    fn test_alarm_has_no_exit() {
        let events = [
            LockEvent::Verified,
            LockEvent::Relock,
            LockEvent::FlashComplete,
            LockEvent::BeginChange,
            LockEvent::ChangeApplied(Combination::DEFAULT),
        ];

        for event in events {
            assert_eq!(LockMode::Alarmed.transition(&event), LockMode::Alarmed);
        }
        assert!(LockMode::Alarmed.is_terminal());
    }

    #[test]
    fn test_entry_progress_keeps_mode() {
        let event = LockEvent::DigitAccepted { position: 0, value: 5 };
        assert_eq!(LockMode::Locked.transition(&event), LockMode::Locked);
        assert_eq!(
            LockMode::Locked.transition(&LockEvent::EntryAborted),
            LockMode::Locked
        );
    }

    #[test]
    fn test_bolt_position() {
        assert_eq!(LockMode::Locked.bolt_position(), ServoPosition::CLOSED);
        assert_eq!(LockMode::Failed.bolt_position(), ServoPosition::CLOSED);
        assert_eq!(LockMode::Alarmed.bolt_position(), ServoPosition::CLOSED);
        assert_eq!(LockMode::Unlocked.bolt_position(), ServoPosition::OPEN);
        assert_eq!(LockMode::Changing.bolt_position(), ServoPosition::OPEN);
    }
}
