// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Preset page in internal FLASH.
//!
//! Sector 11 (the last 256 KiB of the 2 MiB single-bank layout) is reserved for presets by
//! `memory.x`. Programming is word-wide and the sector is always erased as a whole.

use core::ops::Deref;

use deskctl::storage::NvPage;
use stm32f7xx_hal::pac;

const SECTOR: u8 = 11;
const SECTOR_BASE: u32 = 0x081C_0000;
const SECTOR_LEN: u32 = 256 * 1024;

const KEY1: u32 = 0x4567_0123;
const KEY2: u32 = 0xCDEF_89AB;

// SR error flags: OPERR | WRPERR | PGAERR | PGPERR | ERSERR
const SR_ERRORS: u32 = (1 << 1) | (1 << 4) | (1 << 5) | (1 << 6) | (1 << 7);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlashError {
    OutOfRange,
    /// Program address not word aligned
    Alignment,
    /// Controller reported an error; raw SR bits
    Status(u32),
}

#[inline(always)]
fn flash() -> &'static <pac::FLASH as Deref>::Target {
    unsafe { &*pac::FLASH::ptr() }
}

#[inline(always)]
fn wait_not_busy() {
    let f = flash();
    while f.sr.read().bsy().bit_is_set() {}
}

fn unlock() {
    let f = flash();
    if f.cr.read().lock().bit_is_set() {
        f.keyr.write(|w| unsafe { w.bits(KEY1) });
        f.keyr.write(|w| unsafe { w.bits(KEY2) });
    }
}

fn lock() {
    flash().cr.modify(|_, w| w.lock().set_bit());
}

/// Read and clear the error flags.
fn take_errors() -> Result<(), FlashError> {
    let f = flash();
    let sr = f.sr.read().bits() & SR_ERRORS;
    if sr == 0 {
        return Ok(());
    }
    f.sr.write(|w| unsafe { w.bits(sr) });
    Err(FlashError::Status(sr))
}

/// Run `op` with the controller unlocked and interrupts masked.
fn unlocked<T>(op: impl FnOnce() -> Result<T, FlashError>) -> Result<T, FlashError> {
    cortex_m::interrupt::free(|_| {
        wait_not_busy();
        // Stale flags from an earlier operation would fail this one
        let _ = take_errors();
        unlock();
        let res = op();
        lock();
        res
    })
}

fn check_range(offset: u32, len: usize) -> Result<u32, FlashError> {
    let end = offset
        .checked_add(len as u32)
        .ok_or(FlashError::OutOfRange)?;
    if end > SECTOR_LEN {
        return Err(FlashError::OutOfRange);
    }
    Ok(SECTOR_BASE + offset)
}

/// Owns the FLASH peripheral and the preset sector.
pub struct FlashPage {
    _flash: pac::FLASH,
}

impl FlashPage {
    pub fn new(flash: pac::FLASH) -> Self {
        Self { _flash: flash }
    }
}

impl NvPage for FlashPage {
    type Error = FlashError;

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), FlashError> {
        let addr = check_range(offset, buf.len())?;
        for (i, b) in buf.iter_mut().enumerate() {
            *b = unsafe { core::ptr::read_volatile((addr + i as u32) as *const u8) };
        }
        Ok(())
    }

    fn erase(&mut self) -> Result<(), FlashError> {
        unlocked(|| {
            let f = flash();
            // SER = 1, SNB = 11, PSIZE = x32, then STRT
            f.cr.modify(|_, w| unsafe {
                w.ser()
                    .set_bit()
                    .snb()
                    .bits(SECTOR)
                    .psize()
                    .bits(0b10)
            });
            f.cr.modify(|_, w| w.strt().set_bit());
            wait_not_busy();
            f.cr.modify(|_, w| w.ser().clear_bit());
            take_errors()
        })
    }

    fn program(&mut self, offset: u32, data: &[u8]) -> Result<(), FlashError> {
        if offset & 3 != 0 {
            return Err(FlashError::Alignment);
        }
        let base = check_range(offset, data.len())?;

        unlocked(|| {
            let f = flash();
            for (i, chunk) in data.chunks(4).enumerate() {
                // Pad a short tail with the erased value
                let mut word = [0xFF; 4];
                word[..chunk.len()].copy_from_slice(chunk);
                let word = u32::from_le_bytes(word);

                wait_not_busy();
                f.cr.modify(|_, w| unsafe { w.psize().bits(0b10).pg().set_bit() });
                unsafe {
                    core::ptr::write_volatile((base + 4 * i as u32) as *mut u32, word);
                }
                cortex_m::asm::dsb();
                wait_not_busy();
                f.cr.modify(|_, w| w.pg().clear_bit());
                take_errors()?;
            }
            Ok(())
        })
    }
}
