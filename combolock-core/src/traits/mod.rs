//! Collaborator traits
//!
//! These traits define the interface between the lock logic and the
//! peripheral drivers. The controller itself only produces values
//! (screen lines, servo positions, indicator levels); firmware tasks hand
//! them to implementations of these traits.

pub mod display;
pub mod input;
pub mod servo;
pub mod storage;

pub use display::{DisplayDriver, DisplayError, DISPLAY_COLUMNS, DISPLAY_LINES};
pub use input::{Keypad, PanelInput, PanelState, SwitchPosition, NO_KEY};
pub use servo::{ServoDriver, ServoPosition};
pub use storage::CombinationStore;
