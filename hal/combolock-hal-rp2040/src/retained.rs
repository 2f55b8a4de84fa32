//! Retained RAM region
//!
//! A small buffer placed in the `.uninit` output section, which the
//! cortex-m-rt startup code neither zeroes nor initializes. Its contents
//! survive a watchdog or SYSRESETREQ reset but are arbitrary after power-on,
//! so callers must validate what they read.

use core::mem::MaybeUninit;
use core::ptr::{addr_of_mut, read_volatile, write_volatile};

use combolock_hal::{RetainedError, RetainedStorage};
use portable_atomic::{AtomicBool, Ordering};

/// Size of the retained region in bytes
pub const RETAINED_SIZE: usize = 16;

#[link_section = ".uninit.combolock"]
static mut RETAINED: MaybeUninit<[u8; RETAINED_SIZE]> = MaybeUninit::uninit();

static TAKEN: AtomicBool = AtomicBool::new(false);

/// Exclusive handle to the retained region
pub struct RetainedRam {
    base: *mut u8,
}

impl RetainedRam {
    /// Take the region; returns `None` after the first call
    pub fn take() -> Option<Self> {
        if TAKEN.swap(true, Ordering::AcqRel) {
            return None;
        }
        Some(Self {
            // SAFETY: only the address is taken; exclusivity is guarded by TAKEN
            base: unsafe { addr_of_mut!(RETAINED) }.cast::<u8>(),
        })
    }
}

impl RetainedStorage for RetainedRam {
    fn capacity(&self) -> usize {
        RETAINED_SIZE
    }

    fn read(&self, buffer: &mut [u8]) -> Result<(), RetainedError> {
        if buffer.len() > RETAINED_SIZE {
            return Err(RetainedError::OutOfBounds);
        }
        for (offset, byte) in buffer.iter_mut().enumerate() {
            // SAFETY: offset < RETAINED_SIZE and this handle is the only accessor
            *byte = unsafe { read_volatile(self.base.add(offset)) };
        }
        Ok(())
    }

    fn write(&mut self, data: &[u8]) -> Result<(), RetainedError> {
        if data.len() > RETAINED_SIZE {
            return Err(RetainedError::OutOfBounds);
        }
        for (offset, &byte) in data.iter().enumerate() {
            // SAFETY: offset < RETAINED_SIZE and this handle is the only accessor
            unsafe { write_volatile(self.base.add(offset), byte) };
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        for offset in 0..RETAINED_SIZE {
            // SAFETY: offset < RETAINED_SIZE and this handle is the only accessor
            unsafe { write_volatile(self.base.add(offset), 0) };
        }
    }
}
