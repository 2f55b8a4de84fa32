//! 4x4 matrix keypad
//!
//! Rows are outputs idling high; columns are inputs with pull-ups. A scan
//! drives one row low at a time and reads the columns: a pressed key pulls
//! its column low while its row is driven.

use combolock_core::traits::Keypad;
use combolock_hal::{InputPin, OutputPin};

/// Number of rows and columns
pub const KEYPAD_SIZE: usize = 4;

/// Key legends, indexed `[row][column]`
pub const KEYMAP: [[u8; KEYPAD_SIZE]; KEYPAD_SIZE] = [
    *b"123A",
    *b"456B",
    *b"789C",
    *b"*0#D",
];

/// Scanned matrix keypad
pub struct MatrixKeypad<R, C> {
    rows: [R; KEYPAD_SIZE],
    cols: [C; KEYPAD_SIZE],
}

impl<R: OutputPin, C: InputPin> MatrixKeypad<R, C> {
    /// Create a keypad and release all rows
    pub fn new(mut rows: [R; KEYPAD_SIZE], cols: [C; KEYPAD_SIZE]) -> Self {
        for row in rows.iter_mut() {
            row.set_high();
        }
        Self { rows, cols }
    }

    /// Scan the matrix once
    ///
    /// Returns the first pressed key in row-major order.
    pub fn scan(&mut self) -> Option<u8> {
        for (r, keys) in KEYMAP.iter().enumerate() {
            self.rows[r].set_low();
            let pressed = self.cols.iter().position(|col| col.is_low());
            self.rows[r].set_high();

            if let Some(c) = pressed {
                return Some(keys[c]);
            }
        }
        None
    }
}

impl<R: OutputPin, C: InputPin> Keypad for MatrixKeypad<R, C> {
    fn poll(&mut self) -> Option<u8> {
        self.scan()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combolock_core::traits::NO_KEY;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Shared wiring: which rows are driven low, and which key is held
    #[derive(Default)]
    struct Matrix {
        driven_low: Cell<[bool; KEYPAD_SIZE]>,
        held: Cell<Option<(usize, usize)>>,
    }

    struct Row {
        index: usize,
        matrix: Rc<Matrix>,
    }

    impl OutputPin for Row {
        fn set_high(&mut self) {
            let mut driven = self.matrix.driven_low.get();
            driven[self.index] = false;
            self.matrix.driven_low.set(driven);
        }

        fn set_low(&mut self) {
            let mut driven = self.matrix.driven_low.get();
            driven[self.index] = true;
            self.matrix.driven_low.set(driven);
        }

        fn is_set_high(&self) -> bool {
            !self.matrix.driven_low.get()[self.index]
        }
    }

    struct Col {
        index: usize,
        matrix: Rc<Matrix>,
    }

    impl InputPin for Col {
        fn is_high(&self) -> bool {
            match self.matrix.held.get() {
                Some((row, col)) if col == self.index => !self.matrix.driven_low.get()[row],
                _ => true,
            }
        }
    }

    fn keypad() -> (MatrixKeypad<Row, Col>, Rc<Matrix>) {
        let matrix = Rc::new(Matrix::default());
        let rows = core::array::from_fn(|index| Row {
            index,
            matrix: matrix.clone(),
        });
        let cols = core::array::from_fn(|index| Col {
            index,
            matrix: matrix.clone(),
        });
        (MatrixKeypad::new(rows, cols), matrix)
    }

    #[test]
    fn test_no_key() {
        let (mut keypad, _) = keypad();
        assert_eq!(keypad.poll(), None);
        assert_eq!(keypad.poll_raw(), NO_KEY);
    }

    #[test]
    fn test_every_key() {
        let (mut keypad, matrix) = keypad();
        for row in 0..KEYPAD_SIZE {
            for col in 0..KEYPAD_SIZE {
                matrix.held.set(Some((row, col)));
                assert_eq!(keypad.poll(), Some(KEYMAP[row][col]));
            }
        }
    }

    #[test]
    fn test_rows_released_after_scan() {
        let (mut keypad, matrix) = keypad();
        matrix.held.set(Some((2, 1)));
        assert_eq!(keypad.poll(), Some(b'8'));
        assert_eq!(matrix.driven_low.get(), [false; KEYPAD_SIZE]);
    }
}
