//! Combolock - Dial Combination Lock Firmware
//!
//! Main firmware binary for an RP2040 board with a rotary-encoder dial,
//! a servo-driven bolt, a 16x2 I2C character LCD, a 4x4 keypad, two push
//! buttons, a slide switch and two alert LEDs.
//!
//! # Pin map
//!
//! | Function          | GPIO        |
//! |-------------------|-------------|
//! | Keypad columns    | 2-5         |
//! | Keypad rows       | 6-9         |
//! | Left switch       | 13          |
//! | Left button       | 14          |
//! | Right button      | 15          |
//! | Encoder A / B     | 16 / 17     |
//! | Alert LEDs        | 18, 19      |
//! | LCD SDA / SCL     | 20 / 21     |
//! | Servo signal      | 22          |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use {defmt_rtt as _, panic_probe as _};

use combolock_drivers::lcd::DEFAULT_ADDRESS;
use combolock_drivers::{ButtonPanel, Lcd1602, MatrixKeypad, RetainedCombination};
use combolock_hal_rp2040::{RetainedRam, RpInput, RpOutput};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Combolock firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Dial encoder, both channels pulled up
    let encoder_a = Input::new(p.PIN_16, Pull::Up);
    let encoder_b = Input::new(p.PIN_17, Pull::Up);

    // Servo signal idles low between pulses
    let servo_pin = RpOutput::new(Output::new(p.PIN_22, Level::Low));

    // Keypad rows idle high, columns pulled up
    let keypad = MatrixKeypad::new(
        [
            RpOutput::new(Output::new(p.PIN_6, Level::High)),
            RpOutput::new(Output::new(p.PIN_7, Level::High)),
            RpOutput::new(Output::new(p.PIN_8, Level::High)),
            RpOutput::new(Output::new(p.PIN_9, Level::High)),
        ],
        [
            RpInput::new(Input::new(p.PIN_2, Pull::Up)),
            RpInput::new(Input::new(p.PIN_3, Pull::Up)),
            RpInput::new(Input::new(p.PIN_4, Pull::Up)),
            RpInput::new(Input::new(p.PIN_5, Pull::Up)),
        ],
    );

    // Buttons switch to ground; the slide switch pulls high in its right position
    let panel = ButtonPanel::new(
        RpInput::new(Input::new(p.PIN_14, Pull::Up)),
        RpInput::new(Input::new(p.PIN_15, Pull::Up)),
        RpInput::new(Input::new(p.PIN_13, Pull::Down)),
    );

    let leds = [
        RpOutput::new(Output::new(p.PIN_18, Level::Low)),
        RpOutput::new(Output::new(p.PIN_19, Level::Low)),
    ];

    let retained = unwrap!(RetainedRam::take());
    let store = unwrap!(RetainedCombination::new(retained));

    info!("Lock I/O initialized");

    // LCD on I2C0 at 100 kHz
    let i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c::Config::default());
    let lcd = Lcd1602::new(i2c, Delay, DEFAULT_ADDRESS);

    info!("I2C initialized for LCD");

    // Spawn tasks
    unwrap!(spawner.spawn(tasks::encoder_task(encoder_a, encoder_b)));
    unwrap!(spawner.spawn(tasks::servo_task(servo_pin)));
    unwrap!(spawner.spawn(tasks::display_task(lcd)));
    unwrap!(spawner.spawn(tasks::controller_task(tasks::LockPeripherals {
        keypad,
        panel,
        leds,
        store,
    })));

    info!("All tasks spawned, firmware running");
}
