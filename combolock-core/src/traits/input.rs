//! Keypad and front-panel input traits

/// Raw keypad sentinel for "nothing pressed"
pub const NO_KEY: u8 = 0xFF;

/// Keypad polled once per controller tick
pub trait Keypad {
    /// ASCII code of the key currently held, if any
    fn poll(&mut self) -> Option<u8>;

    /// Poll using the raw sentinel encoding
    fn poll_raw(&mut self) -> u8 {
        self.poll().unwrap_or(NO_KEY)
    }
}

/// Position of a two-way slide switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SwitchPosition {
    #[default]
    Left,
    Right,
}

/// One sample of the buttons and switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelState {
    /// Left push button held (confirm)
    pub left_button: bool,
    /// Right push button held
    pub right_button: bool,
    /// Left slide switch
    pub left_switch: SwitchPosition,
}

/// Source of [`PanelState`] samples
pub trait PanelInput {
    /// Sample all buttons and switches
    fn sample(&mut self) -> PanelState;
}
