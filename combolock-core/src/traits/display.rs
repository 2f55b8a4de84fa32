//! Display driver trait for the character display

/// Visible columns per line
pub const DISPLAY_COLUMNS: usize = 16;

/// Number of lines
pub const DISPLAY_LINES: usize = 2;

/// Errors that can occur with display communication
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus transfer failed
    Bus,
    /// Line index outside the display
    InvalidLine,
}

/// Trait for line-oriented text displays
///
/// Writes are fire-and-forget from the lock's point of view: the firmware
/// logs failures and carries on.
pub trait DisplayDriver {
    /// Clear the whole display
    fn clear(&mut self) -> impl core::future::Future<Output = Result<(), DisplayError>>;

    /// Replace the contents of one line
    ///
    /// - `line`: Line index (0-1)
    /// - `text`: ASCII text, truncated to [`DISPLAY_COLUMNS`]
    fn write_line(
        &mut self,
        line: u8,
        text: &str,
    ) -> impl core::future::Future<Output = Result<(), DisplayError>>;
}
