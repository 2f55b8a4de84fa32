//! Combination change session
//!
//! While the lock is open, a new combination is typed on the keypad twice:
//! once to enter it and once to confirm it. Each digit is two decimal keys
//! (tens, ones), so a full combination is six keys. Keys are edge-detected:
//! holding a key, or a repeated sample of the same key without a release in
//! between, counts once.

use heapless::String;

use crate::combination::{Combination, COMBINATION_LENGTH};
use crate::traits::DISPLAY_COLUMNS;

/// Keys per typed combination
pub const KEYS_PER_COMBINATION: usize = COMBINATION_LENGTH * 2;

/// Why a typed combination was not stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChangeRejection {
    /// Entry or confirmation has missing keys
    Incomplete,
    /// Entry and confirmation differ
    Mismatch,
    /// A digit is larger than the dial allows
    OutOfRange,
}

/// Pending new combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeSession {
    entry: [Option<u8>; KEYS_PER_COMBINATION],
    confirmation: [Option<u8>; KEYS_PER_COMBINATION],
    index: usize,
    confirming: bool,
    last_key: Option<u8>,
}

impl Default for ChangeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeSession {
    /// Start with both buffers empty
    pub const fn new() -> Self {
        Self {
            entry: [None; KEYS_PER_COMBINATION],
            confirmation: [None; KEYS_PER_COMBINATION],
            index: 0,
            confirming: false,
            last_key: None,
        }
    }

    /// Whether the confirmation buffer is being filled
    pub fn is_confirming(&self) -> bool {
        self.confirming
    }

    /// Keys typed into the active buffer
    pub fn keys_typed(&self) -> usize {
        self.index
    }

    /// Prompt for the status line
    pub fn prompt(&self) -> &'static str {
        if self.confirming {
            "confirm"
        } else {
            "enter"
        }
    }

    /// Feed one keypad sample
    ///
    /// Returns `true` if the sample was taken as a new digit.
    pub fn handle_key(&mut self, key: Option<u8>) -> bool {
        let accepted = match key {
            Some(code) if key != self.last_key && self.index < KEYS_PER_COMBINATION => {
                match decimal_digit(code) {
                    Some(digit) => {
                        let index = self.index;
                        self.active_mut()[index] = Some(digit);
                        self.index += 1;
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        };
        self.last_key = key;

        if self.index >= KEYS_PER_COMBINATION && !self.confirming {
            self.confirming = true;
            self.index = 0;
        }

        accepted
    }

    fn active(&self) -> &[Option<u8>; KEYS_PER_COMBINATION] {
        if self.confirming {
            &self.confirmation
        } else {
            &self.entry
        }
    }

    fn active_mut(&mut self) -> &mut [Option<u8>; KEYS_PER_COMBINATION] {
        if self.confirming {
            &mut self.confirmation
        } else {
            &mut self.entry
        }
    }

    /// Active buffer as `ab-cd-ef`, with untyped keys as spaces
    pub fn render(&self) -> String<DISPLAY_COLUMNS> {
        let mut line = String::new();
        for (slot, key) in self.active().iter().enumerate() {
            if slot == 2 || slot == 4 {
                let _ = line.push('-');
            }
            let ch = key.map(|digit| (b'0' + digit) as char).unwrap_or(' ');
            let _ = line.push(ch);
        }
        line
    }

    /// Validate the typed combination
    pub fn finish(&self) -> Result<Combination, ChangeRejection> {
        let mut digits = [0u8; COMBINATION_LENGTH];

        for (pair, digit) in digits.iter_mut().enumerate() {
            let keys = [
                self.entry[pair * 2],
                self.entry[pair * 2 + 1],
                self.confirmation[pair * 2],
                self.confirmation[pair * 2 + 1],
            ];
            let [Some(tens), Some(ones), Some(confirm_tens), Some(confirm_ones)] = keys else {
                return Err(ChangeRejection::Incomplete);
            };
            if tens != confirm_tens || ones != confirm_ones {
                return Err(ChangeRejection::Mismatch);
            }
            *digit = tens * 10 + ones;
        }

        Combination::new(digits).map_err(|_| ChangeRejection::OutOfRange)
    }
}

fn decimal_digit(code: u8) -> Option<u8> {
    code.is_ascii_digit().then(|| code - b'0')
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Type a string of keys, releasing between each
    fn type_keys(session: &mut ChangeSession, keys: &str) {
        for key in keys.bytes() {
            session.handle_key(Some(key));
            session.handle_key(None);
        }
    }

    #[test]
    fn test_matching_entries_apply() {
        let mut session = ChangeSession::new();
        type_keys(&mut session, "011213");
        assert!(session.is_confirming());
        type_keys(&mut session, "011213");

        assert_eq!(
            session.finish(),
            Ok(Combination::new([1, 12, 13]).unwrap())
        );
    }

    #[test]
    fn test_mismatch_rejected() {
        let mut session = ChangeSession::new();
        type_keys(&mut session, "011213");
        type_keys(&mut session, "011214");
        assert_eq!(session.finish(), Err(ChangeRejection::Mismatch));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let mut session = ChangeSession::new();
        type_keys(&mut session, "051699");
        type_keys(&mut session, "051699");
        assert_eq!(session.finish(), Err(ChangeRejection::OutOfRange));
    }

    #[test]
    fn test_incomplete_rejected() {
        let mut session = ChangeSession::new();
        type_keys(&mut session, "011213");
        type_keys(&mut session, "0112");
        assert_eq!(session.finish(), Err(ChangeRejection::Incomplete));
        assert_eq!(ChangeSession::new().finish(), Err(ChangeRejection::Incomplete));
    }

    #[test]
    fn test_held_key_counts_once() {
        let mut session = ChangeSession::new();
        assert!(session.handle_key(Some(b'4')));
        assert!(!session.handle_key(Some(b'4')));
        assert!(!session.handle_key(Some(b'4')));
        assert_eq!(session.keys_typed(), 1);

        // Release then press again counts
        session.handle_key(None);
        assert!(session.handle_key(Some(b'4')));
        // A different key without release counts too
        assert!(session.handle_key(Some(b'5')));
        assert_eq!(session.keys_typed(), 3);
    }

    #[test]
    fn test_non_digit_keys_ignored() {
        let mut session = ChangeSession::new();
        for key in [b'A', b'#', b'*', b'D'] {
            assert!(!session.handle_key(Some(key)));
            session.handle_key(None);
        }
        assert_eq!(session.keys_typed(), 0);
    }

    #[test]
    fn test_render_progress() {
        let mut session = ChangeSession::new();
        assert_eq!(session.render().as_str(), "  -  -  ");

        type_keys(&mut session, "1");
        assert_eq!(session.render().as_str(), "1 -  -  ");

        type_keys(&mut session, "23");
        assert_eq!(session.render().as_str(), "12-3 -  ");

        type_keys(&mut session, "456");
        // Switched to the confirmation buffer
        assert_eq!(session.prompt(), "confirm");
        assert_eq!(session.render().as_str(), "  -  -  ");

        type_keys(&mut session, "123456");
        assert_eq!(session.render().as_str(), "12-34-56");
    }

    #[test]
    fn test_extra_keys_ignored_when_full() {
        let mut session = ChangeSession::new();
        type_keys(&mut session, "000102");
        type_keys(&mut session, "000102");
        assert!(!session.handle_key(Some(b'9')));
        assert_eq!(session.finish(), Ok(Combination::new([0, 1, 2]).unwrap()));
    }

    #[test]
    fn test_keys_fill_active_buffer_in_order() {
        let mut session = ChangeSession::new();
        assert!(session.handle_key(Some(b'0')));
        assert!(session.handle_key(Some(b'7')));
        assert_eq!(session.entry[..2], [Some(0), Some(7)]);
        assert_eq!(session.keys_typed(), 2);

        type_keys(&mut session, "0809");
        assert!(session.is_confirming());
        type_keys(&mut session, "07");
        assert_eq!(session.confirmation[..2], [Some(0), Some(7)]);
        assert_eq!(session.confirmation[2], None);
    }
}
