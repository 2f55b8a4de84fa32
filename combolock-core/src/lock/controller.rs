//! Lock controller
//!
//! The controller is polled once per tick with a snapshot of the inputs
//! (latched dial direction, keypad sample, panel sample) and a timestamp.
//! It owns every piece of lock state and exposes its outputs as values:
//!
//! - [`LockController::screen`] - two display lines with a dirty flag
//! - [`LockController::servo_command`] - bolt servo position
//! - [`LockController::indicators_on`] - alert LED level
//!
//! Nothing here blocks; timed behavior (failure flash, alarm) is driven by
//! the tick timestamps.

use super::blink::BlinkPattern;
use super::change::ChangeSession;
use super::entry::{EntryPhase, EntryState, EntryStep};
use super::events::LockEvent;
use super::mode::LockMode;
use super::screen::Screen;
use crate::combination::Combination;
use crate::config::LockConfig;
use crate::encoder::Direction;
use crate::traits::{PanelState, ServoPosition, SwitchPosition, DISPLAY_COLUMNS};

use core::fmt::Write;
use heapless::String;

/// Status line index
const STATUS_LINE: usize = 0;

/// Feedback line index
const FEEDBACK_LINE: usize = 1;

/// Inputs sampled for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInput {
    /// Direction taken from the latch
    pub direction: Direction,
    /// Key currently held
    pub key: Option<u8>,
    /// Buttons and switch
    pub panel: PanelState,
}

/// Combination lock controller
pub struct LockController {
    config: LockConfig,
    mode: LockMode,
    combination: Combination,
    entry: EntryState,
    change: Option<ChangeSession>,
    failed_attempts: u8,
    blink: Option<BlinkPattern>,
    indicators: bool,
    servo: ServoPosition,
    screen: Screen,
}

impl LockController {
    /// Create a locked controller
    ///
    /// `retained` is the combination recovered from retained memory, used
    /// only when the config does not force a reset to the default.
    pub fn new(config: LockConfig, retained: Option<Combination>) -> Self {
        let combination = match retained {
            Some(combo) if !config.reset_combination_on_boot => combo,
            _ => config.default_combination(),
        };

        let mut controller = Self {
            config,
            mode: LockMode::Locked,
            combination,
            entry: EntryState::new(),
            change: None,
            failed_attempts: 0,
            blink: None,
            indicators: false,
            servo: ServoPosition::CLOSED,
            screen: Screen::new(),
        };
        controller.enter_mode(0);
        controller
    }

    /// Current mode
    pub fn mode(&self) -> LockMode {
        self.mode
    }

    /// Stored combination
    pub fn combination(&self) -> &Combination {
        &self.combination
    }

    /// Dial entry progress
    pub fn entry(&self) -> &EntryState {
        &self.entry
    }

    /// Pending change, while in [`LockMode::Changing`]
    pub fn change_session(&self) -> Option<&ChangeSession> {
        self.change.as_ref()
    }

    /// Consecutive failed attempts
    pub fn failed_attempts(&self) -> u8 {
        self.failed_attempts
    }

    /// Servo position to apply
    pub fn servo_command(&self) -> ServoPosition {
        self.servo
    }

    /// Alert LED level as of the last tick
    pub fn indicators_on(&self) -> bool {
        self.indicators
    }

    /// Display contents
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Mark the display contents as drawn
    pub fn screen_drawn(&mut self) {
        self.screen.mark_clean();
    }

    /// Run one tick
    ///
    /// Returns the event this tick produced, if any.
    pub fn tick(&mut self, now_ms: u32, input: &TickInput) -> Option<LockEvent> {
        let event = match self.mode {
            LockMode::Locked => self.tick_locked(input),
            // Dial movement during the flash is dropped
            LockMode::Failed => self.tick_failed(now_ms),
            LockMode::Unlocked => self.tick_unlocked(&input.panel),
            LockMode::Changing => self.tick_changing(input),
            LockMode::Alarmed => None,
        };

        if let Some(event) = &event {
            let next = self.mode.transition(event);
            if next != self.mode {
                self.mode = next;
                self.enter_mode(now_ms);
            }
            self.after_event(event);
        }

        self.indicators = self.blink.is_some_and(|blink| blink.is_on(now_ms));

        event
    }

    fn tick_locked(&mut self, input: &TickInput) -> Option<LockEvent> {
        let mut event = match self
            .entry
            .step(input.direction, &self.combination, &self.config)
        {
            EntryStep::Idle => None,
            EntryStep::DigitAccepted { position, value } => {
                Some(LockEvent::DigitAccepted { position, value })
            }
            EntryStep::Aborted => Some(LockEvent::EntryAborted),
        };

        self.screen.set_line(FEEDBACK_LINE, &self.entry.render());

        if self.entry.phase() == EntryPhase::Third && input.panel.left_button {
            event = Some(self.verify());
        }

        event
    }

    fn verify(&mut self) -> LockEvent {
        if self.entry.verify(&self.combination, &self.config) {
            return LockEvent::Verified;
        }

        self.failed_attempts = self.failed_attempts.saturating_add(1);
        if self.failed_attempts >= self.config.max_failed_attempts {
            LockEvent::AttemptsExhausted
        } else {
            LockEvent::VerificationFailed {
                attempts: self.failed_attempts,
            }
        }
    }

    fn tick_failed(&mut self, now_ms: u32) -> Option<LockEvent> {
        match self.blink {
            Some(blink) if !blink.is_finished(now_ms) => None,
            _ => Some(LockEvent::FlashComplete),
        }
    }

    fn tick_unlocked(&mut self, panel: &PanelState) -> Option<LockEvent> {
        if panel.left_switch == SwitchPosition::Right && panel.right_button {
            Some(LockEvent::BeginChange)
        } else if panel.left_button && panel.right_button {
            Some(LockEvent::Relock)
        } else {
            None
        }
    }

    fn tick_changing(&mut self, input: &TickInput) -> Option<LockEvent> {
        let session = self.change.get_or_insert_with(ChangeSession::new);

        session.handle_key(input.key);
        self.screen.set_line(STATUS_LINE, session.prompt());
        self.screen.set_line(FEEDBACK_LINE, &session.render());

        if input.panel.left_switch != SwitchPosition::Left {
            return None;
        }

        Some(match session.finish() {
            Ok(combination) => LockEvent::ChangeApplied(combination),
            Err(rejection) => LockEvent::ChangeRejected(rejection),
        })
    }

    /// Entry actions for the mode just entered
    fn enter_mode(&mut self, now_ms: u32) {
        self.servo = self.mode.bolt_position();
        self.screen.set_line(STATUS_LINE, self.mode.label());

        match self.mode {
            LockMode::Locked => {
                self.entry.reset();
                self.change = None;
                self.blink = None;
                self.screen.set_line(FEEDBACK_LINE, &self.entry.render());
            }
            LockMode::Failed => {
                self.entry.reset();
                self.blink = Some(BlinkPattern::cycles(
                    now_ms,
                    self.config.flash_half_period_ms,
                    u32::from(self.config.failure_flash_cycles),
                ));
            }
            LockMode::Unlocked => {
                self.failed_attempts = 0;
                self.change = None;
                self.blink = None;
            }
            LockMode::Changing => {
                let session = ChangeSession::new();
                self.screen.set_line(STATUS_LINE, session.prompt());
                self.screen.set_line(FEEDBACK_LINE, &session.render());
                self.change = Some(session);
            }
            LockMode::Alarmed => {
                self.entry.reset();
                self.blink = Some(BlinkPattern::forever(
                    now_ms,
                    self.config.flash_half_period_ms,
                ));
                self.screen.set_line(FEEDBACK_LINE, "alert!");
            }
        }
    }

    /// Event-specific effects after the mode change
    fn after_event(&mut self, event: &LockEvent) {
        match event {
            LockEvent::Verified => self.screen.set_line(FEEDBACK_LINE, "OPEN"),
            LockEvent::VerificationFailed { attempts } => {
                let mut line: String<DISPLAY_COLUMNS> = String::new();
                let _ = write!(line, "bad try {}", attempts);
                self.screen.set_line(FEEDBACK_LINE, &line);
            }
            LockEvent::ChangeApplied(combination) => {
                self.combination = *combination;
                self.screen.set_line(FEEDBACK_LINE, "changed");
            }
            LockEvent::ChangeRejected(_) => self.screen.set_line(FEEDBACK_LINE, "no change"),
            _ => {}
        }
    }
}
