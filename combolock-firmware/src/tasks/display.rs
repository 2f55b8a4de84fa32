//! Display task
//!
//! Waits for screen updates from the controller and redraws the LCD.
//! Bus errors are logged and otherwise ignored; the next update retries.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;

use combolock_core::traits::DisplayDriver;
use combolock_drivers::Lcd1602;

use crate::channels::{SCREEN_BUFFER, SCREEN_UPDATE};

/// Concrete LCD type on this board
pub type Display = Lcd1602<I2c<'static, I2C0, Async>, Delay>;

/// Display task - draws the screen buffer on every update
#[embassy_executor::task]
pub async fn display_task(mut lcd: Display) {
    info!("Display task started");

    if let Err(e) = lcd.init().await {
        warn!("LCD init failed: {:?}", e);
    }

    loop {
        SCREEN_UPDATE.wait().await;

        let screen = SCREEN_BUFFER.lock().await.clone();
        for (line, text) in screen.lines() {
            if let Err(e) = lcd.write_line(line, text).await {
                warn!("LCD write to line {} failed: {:?}", line, e);
                break;
            }
        }
    }
}
