//! Main controller task
//!
//! Runs the lock state machine on a fixed tick. Each tick takes the latched
//! dial direction, samples the keypad and panel, and pushes the controller's
//! outputs to the servo register, the alert LEDs and the display task.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use combolock_core::lock::{LockController, LockEvent, TickInput};
use combolock_core::traits::{CombinationStore, Keypad, PanelInput, ServoDriver};
use combolock_drivers::{ButtonPanel, MatrixKeypad, RetainedCombination, ServoOutput};
use combolock_hal::OutputPin;
use combolock_hal_rp2040::{RetainedRam, RpInput, RpOutput};

use crate::channels::{DIRECTION_LATCH, SCREEN_BUFFER, SCREEN_UPDATE, SERVO_POSITION};
use crate::config::{CONTROLLER_TICK_MS, LOCK_CONFIG};

/// Number of alert LEDs
pub const LED_COUNT: usize = 2;

/// Inputs and outputs owned by the controller task
pub struct LockPeripherals {
    pub keypad: MatrixKeypad<RpOutput<'static>, RpInput<'static>>,
    pub panel: ButtonPanel<RpInput<'static>, RpInput<'static>, RpInput<'static>>,
    pub leds: [RpOutput<'static>; LED_COUNT],
    pub store: RetainedCombination<RetainedRam>,
}

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut io: LockPeripherals) {
    info!("Controller task started");

    let retained = io.store.load();
    if let Some(combination) = &retained {
        info!("Retained combination found: {:?}", combination.digits());
    }

    let mut controller = LockController::new(LOCK_CONFIG, retained);
    let mut servo = ServoOutput::new(&SERVO_POSITION);

    let start = Instant::now();
    let mut ticker = Ticker::every(Duration::from_millis(CONTROLLER_TICK_MS));

    loop {
        let now_ms = start.elapsed().as_millis() as u32;

        let input = TickInput {
            direction: DIRECTION_LATCH.take(),
            key: io.keypad.poll(),
            panel: io.panel.sample(),
        };

        if let Some(event) = controller.tick(now_ms, &input) {
            log_event(&event);
            if let LockEvent::ChangeApplied(combination) = event {
                io.store.save(&combination);
            }
        }

        servo.command(controller.servo_command());

        let indicators = controller.indicators_on();
        for led in io.leds.iter_mut() {
            led.set_state(indicators);
        }

        if controller.screen().is_dirty() {
            *SCREEN_BUFFER.lock().await = controller.screen().clone();
            controller.screen_drawn();
            SCREEN_UPDATE.signal(());
        }

        ticker.next().await;
    }
}

fn log_event(event: &LockEvent) {
    match event {
        LockEvent::DigitAccepted { position, value } => {
            debug!("Digit {} locked in at {}", position, value)
        }
        LockEvent::EntryAborted => debug!("Entry aborted by reversal"),
        LockEvent::Verified => info!("Combination accepted, unlocking"),
        LockEvent::VerificationFailed { attempts } => {
            warn!("Wrong combination (attempt {})", attempts)
        }
        LockEvent::AttemptsExhausted => error!("Too many failed attempts, alarm raised"),
        LockEvent::FlashComplete => debug!("Failure flash complete"),
        LockEvent::BeginChange => info!("Combination change started"),
        LockEvent::Relock => info!("Relocked"),
        LockEvent::ChangeApplied(combination) => {
            info!("Combination changed to {:?}", combination.digits())
        }
        LockEvent::ChangeRejected(reason) => warn!("Combination change rejected: {:?}", reason),
    }
}
