//! Front panel buttons and slide switch

use combolock_core::traits::{PanelInput, PanelState, SwitchPosition};
use combolock_hal::{ActiveLow, InputPin};

/// Two push buttons and one slide switch
///
/// Buttons are active-low (pull-up, switch to ground). The switch reads
/// high in its right-hand position.
pub struct ButtonPanel<L, R, S> {
    left_button: ActiveLow<L>,
    right_button: ActiveLow<R>,
    left_switch: S,
}

impl<L, R, S> ButtonPanel<L, R, S>
where
    L: InputPin,
    R: InputPin,
    S: InputPin,
{
    /// Create a panel from its pins
    pub fn new(left_button: L, right_button: R, left_switch: S) -> Self {
        Self {
            left_button: ActiveLow(left_button),
            right_button: ActiveLow(right_button),
            left_switch,
        }
    }
}

impl<L, R, S> PanelInput for ButtonPanel<L, R, S>
where
    L: InputPin,
    R: InputPin,
    S: InputPin,
{
    fn sample(&mut self) -> PanelState {
        PanelState {
            left_button: self.left_button.is_high(),
            right_button: self.right_button.is_high(),
            left_switch: if self.left_switch.is_high() {
                SwitchPosition::Right
            } else {
                SwitchPosition::Left
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_idle_panel() {
        let mut panel = ButtonPanel::new(Level(true), Level(true), Level(false));
        assert_eq!(panel.sample(), PanelState::default());
    }

    #[test]
    fn test_pressed_buttons_read_low() {
        let mut panel = ButtonPanel::new(Level(false), Level(true), Level(true));
        assert_eq!(
            panel.sample(),
            PanelState {
                left_button: true,
                right_button: false,
                left_switch: SwitchPosition::Right,
            }
        );
    }
}
