//! Servo pulse task
//!
//! Software PWM: a 500 us ticker drives the pulse generator, which reads
//! the commanded width from the shared register once per 20 ms frame.

use defmt::*;
use embassy_time::{Duration, Ticker};

use combolock_drivers::PulseGenerator;
use combolock_hal::OutputPin;
use combolock_hal_rp2040::RpOutput;

use crate::channels::SERVO_POSITION;
use crate::config::SERVO_TICK_US;

/// Servo task - toggles the signal pin
#[embassy_executor::task]
pub async fn servo_task(mut pin: RpOutput<'static>) {
    info!("Servo task started");

    let mut generator = PulseGenerator::new();
    let mut ticker = Ticker::every(Duration::from_micros(SERVO_TICK_US));

    loop {
        if let Some(level) = generator.tick(SERVO_POSITION.width_us()) {
            pin.set_state(level);
        }
        ticker.next().await;
    }
}
