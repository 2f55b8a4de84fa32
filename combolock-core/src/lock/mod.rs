//! Lock state machine
//!
//! Defines the authoritative runtime behavior of the lock. Mode changes are
//! a pure function of the current mode and an event ([`LockMode::transition`]);
//! the [`LockController`] decides which event a tick produces and carries
//! out the entry actions of each mode.

pub mod blink;
pub mod change;
pub mod controller;
pub mod entry;
pub mod events;
pub mod mode;
pub mod screen;

pub use blink::BlinkPattern;
pub use change::{ChangeRejection, ChangeSession};
pub use controller::{LockController, TickInput};
pub use entry::{EntryPhase, EntryState, EntryStep};
pub use events::LockEvent;
pub use mode::LockMode;
pub use screen::Screen;
