// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! # Preset Storage
//!
//! Two byte-sized height presets kept in a single erasable non-volatile page.
//!
//! ## Modules
//!
//! - [`record`] - On-page record layout (magic, version, presets, CRC-32).
//! - [`preset_bank`] - RAM-staged [`PresetStore`] over any [`NvPage`].

pub mod preset_bank;
pub mod record;

pub use preset_bank::PresetBank;
pub use record::PresetRecord;

use crate::error::StoreError;

/// Which of the two presets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PresetSlot {
    /// Slot 0, bound to button 1.
    First,
    /// Slot 1, bound to button 2.
    Second,
}

impl PresetSlot {
    pub const ALL: [PresetSlot; 2] = [PresetSlot::First, PresetSlot::Second];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            PresetSlot::First => 0,
            PresetSlot::Second => 1,
        }
    }
}

/// Preset storage as the control loop sees it.
///
/// Writes are staged; nothing is durable until [`commit`](Self::commit) returns `Ok`.
pub trait PresetStore {
    fn read_preset(&self, slot: PresetSlot) -> u8;
    fn write_preset(&mut self, slot: PresetSlot, value: u8);
    fn commit(&mut self) -> Result<(), StoreError>;

    fn presets(&self) -> [u8; 2] {
        [
            self.read_preset(PresetSlot::First),
            self.read_preset(PresetSlot::Second),
        ]
    }
}

/// A single erasable page of non-volatile memory (e.g. one flash sector).
///
/// Erased bytes read as `0xFF`. `program` may only be called on erased bytes.
pub trait NvPage {
    type Error;

    fn read(&mut self, offset: u32, buf: &mut [u8]) -> Result<(), Self::Error>;
    fn erase(&mut self) -> Result<(), Self::Error>;
    fn program(&mut self, offset: u32, data: &[u8]) -> Result<(), Self::Error>;
}
