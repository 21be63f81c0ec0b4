// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! RAM-staged preset store over a single non-volatile page.
//!
//! Reads are served from RAM. `write_preset` only touches the staged copy; `commit` erases the
//! page, programs the new record, and reads it back to confirm. A commit with nothing staged is a
//! no-op, so the control loop may call it unconditionally after a save.

use crate::error::StoreError;
use crate::storage::record::{PresetRecord, RECORD_LEN};
use crate::storage::{NvPage, PresetSlot, PresetStore};

/// Where the presets came from at boot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadSource {
    /// A valid record was found on the page.
    Stored,
    /// The page was blank, corrupt, or unreadable; defaults are in use.
    Defaults,
}

pub struct PresetBank<B> {
    page: B,
    presets: [u8; 2],
    dirty: bool,
    source: LoadSource,
}

impl<B: NvPage> PresetBank<B> {
    /// Load presets from `page`, falling back to `defaults`.
    pub fn load(mut page: B, defaults: [u8; 2]) -> Self {
        let mut buf = [0u8; RECORD_LEN];
        let record = match page.read(0, &mut buf) {
            Ok(()) => PresetRecord::decode(&buf),
            Err(_) => None,
        };

        let (presets, source) = match record {
            Some(rec) => (rec.presets, LoadSource::Stored),
            None => (defaults, LoadSource::Defaults),
        };

        Self {
            page,
            presets,
            dirty: false,
            source,
        }
    }

    #[inline]
    pub fn source(&self) -> LoadSource {
        self.source
    }

    /// Whether there are staged writes not yet committed.
    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn free(self) -> B {
        self.page
    }
}

impl<B: NvPage> PresetStore for PresetBank<B> {
    #[inline]
    fn read_preset(&self, slot: PresetSlot) -> u8 {
        self.presets[slot.index()]
    }

    fn write_preset(&mut self, slot: PresetSlot, value: u8) {
        self.presets[slot.index()] = value;
        self.dirty = true;
    }

    fn commit(&mut self) -> Result<(), StoreError> {
        if !self.dirty {
            return Ok(());
        }

        let bytes = PresetRecord::new(self.presets).encode();
        self.page.erase().map_err(|_| StoreError::Write)?;
        self.page.program(0, &bytes).map_err(|_| StoreError::Write)?;

        let mut readback = [0u8; RECORD_LEN];
        self.page
            .read(0, &mut readback)
            .map_err(|_| StoreError::Read)?;
        if readback != bytes {
            return Err(StoreError::Verify);
        }

        self.dirty = false;
        self.source = LoadSource::Stored;
        Ok(())
    }
}
