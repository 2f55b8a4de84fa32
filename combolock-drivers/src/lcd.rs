//! HD44780 character LCD behind a PCF8574 I2C expander
//!
//! Driver for the common 16x2 "I2C backpack" modules. The expander drives
//! the controller in 4-bit mode; each byte is sent as two nibbles, each
//! latched by pulsing the enable line.
//!
//! Expander bit layout:
//!
//! | Bit | Signal    |
//! |-----|-----------|
//! | 0   | RS        |
//! | 1   | RW        |
//! | 2   | EN        |
//! | 3   | Backlight |
//! | 4-7 | D4-D7     |

use combolock_core::traits::{DisplayDriver, DisplayError, DISPLAY_COLUMNS, DISPLAY_LINES};
use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Default PCF8574 address
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// HD44780 commands
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    pub const FUNCTION_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first column of each line
const LINE_ADDRESS: [u8; DISPLAY_LINES] = [0x00, 0x40];

/// Expander writes for one nibble: data with EN high, then EN low
fn nibble_frames(nibble: u8, flags: u8) -> [u8; 2] {
    let data = (nibble & 0xF0) | flags;
    [data | EN, data]
}

/// Expander writes for a full byte, high nibble first
fn byte_frames(byte: u8, flags: u8) -> [u8; 4] {
    let [high_en, high] = nibble_frames(byte, flags);
    let [low_en, low] = nibble_frames(byte << 4, flags);
    [high_en, high, low_en, low]
}

/// Line contents padded or truncated to the display width
fn fit_line(text: &str) -> [u8; DISPLAY_COLUMNS] {
    let mut cells = [b' '; DISPLAY_COLUMNS];
    for (cell, byte) in cells.iter_mut().zip(text.bytes()) {
        *cell = if byte.is_ascii() { byte } else { b'?' };
    }
    cells
}

/// 16x2 character LCD
pub struct Lcd1602<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a driver; call [`Lcd1602::init`] before use
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    fn flags(rs: bool) -> u8 {
        if rs {
            BACKLIGHT | RS
        } else {
            BACKLIGHT
        }
    }

    async fn write_frames(&mut self, frames: &[u8]) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, frames)
            .await
            .map_err(|_| DisplayError::Bus)?;
        // Execution time of most instructions
        self.delay.delay_us(50).await;
        Ok(())
    }

    async fn send(&mut self, byte: u8, rs: bool) -> Result<(), DisplayError> {
        let frames = byte_frames(byte, Self::flags(rs));
        self.write_frames(&frames).await
    }

    async fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.send(command, false).await
    }

    /// Run the 4-bit initialization sequence
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on settle
        self.delay.delay_ms(50).await;

        // Three 8-bit function sets, then switch to 4-bit
        let flags = Self::flags(false);
        for _ in 0..3 {
            self.write_frames(&nibble_frames(0x30, flags)).await?;
            self.delay.delay_ms(5).await;
        }
        self.write_frames(&nibble_frames(0x20, flags)).await?;

        self.command(cmd::FUNCTION_4BIT_2LINE).await?;
        self.command(cmd::DISPLAY_ON).await?;
        self.command(cmd::ENTRY_MODE_INCREMENT).await?;
        self.clear().await
    }
}

impl<I2C, D> DisplayDriver for Lcd1602<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    async fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR).await?;
        // Clear takes ~1.5 ms
        self.delay.delay_ms(2).await;
        Ok(())
    }

    async fn write_line(&mut self, line: u8, text: &str) -> Result<(), DisplayError> {
        let address = *LINE_ADDRESS
            .get(line as usize)
            .ok_or(DisplayError::InvalidLine)?;

        self.command(cmd::SET_DDRAM | address).await?;
        for cell in fit_line(text) {
            self.send(cell, true).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_frames() {
        // 'A' = 0x41 as data with backlight
        let frames = byte_frames(0x41, BACKLIGHT | RS);
        assert_eq!(frames, [0x4D, 0x49, 0x1D, 0x19]);
    }

    #[test]
    fn test_command_frames_without_backlight() {
        let frames = byte_frames(cmd::CLEAR, 0);
        assert_eq!(frames, [0x04, 0x00, 0x14, 0x10]);
    }

    #[test]
    fn test_fit_line_pads() {
        assert_eq!(&fit_line("OPEN"), b"OPEN            ");
    }

    #[test]
    fn test_fit_line_truncates() {
        assert_eq!(&fit_line("0123456789abcdefXYZ"), b"0123456789abcdef");
    }

    #[test]
    fn test_fit_line_replaces_non_ascii() {
        assert_eq!(&fit_line("a\u{00e9}b")[..4], b"a??b");
    }

    #[test]
    fn test_line_addresses() {
        assert_eq!(cmd::SET_DDRAM | LINE_ADDRESS[0], 0x80);
        assert_eq!(cmd::SET_DDRAM | LINE_ADDRESS[1], 0xC0);
    }
}
