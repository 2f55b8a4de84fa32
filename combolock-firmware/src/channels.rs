//! State shared between tasks
//!
//! The encoder task and the controller meet at a single-slot atomic latch,
//! and the controller drives the servo task through an atomic register.
//! Screen contents go to the display task through a mutex-guarded buffer
//! plus a wake-up signal.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::signal::Signal;

use combolock_core::encoder::DirectionLatch;
use combolock_core::lock::Screen;
use combolock_core::traits::ServoPosition;
use combolock_drivers::PulseWidthRegister;

/// Latest decoded dial direction (written by encoder task, taken by controller)
pub static DIRECTION_LATCH: DirectionLatch = DirectionLatch::new();

/// Commanded servo position (written by controller, read by servo task)
pub static SERVO_POSITION: PulseWidthRegister = PulseWidthRegister::new(ServoPosition::CLOSED);

/// Screen contents to draw
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// Signal that the screen buffer changed
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
