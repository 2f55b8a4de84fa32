//! Dial encoder task
//!
//! Wakes on any edge of either channel and feeds the pin levels to the
//! quadrature decoder. Recognized steps land in the direction latch;
//! a step the controller has not taken yet is overwritten.

use defmt::*;
use embassy_futures::select::select;
use embassy_rp::gpio::Input;

use combolock_core::encoder::QuadratureDecoder;

use crate::channels::DIRECTION_LATCH;

/// Encoder task - runs for the lifetime of the firmware
#[embassy_executor::task]
pub async fn encoder_task(mut a: Input<'static>, mut b: Input<'static>) {
    info!("Encoder task started");

    let mut decoder = QuadratureDecoder::new();

    loop {
        select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;

        if let Some(direction) = decoder.feed(a.is_high(), b.is_high(), &DIRECTION_LATCH) {
            let counts = DIRECTION_LATCH.counts();
            trace!("Dial {:?} ({})", direction, Display2Format(&counts));
        }
    }
}
