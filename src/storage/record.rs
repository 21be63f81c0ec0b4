// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Preset record layout.
//!
//! 12 bytes, little-endian, at offset 0 of the page:
//!
//! | Offset | Size | Field |
//! | ------ | ---- | ----- |
//! | 0 | 4 | magic `"DSK1"` |
//! | 4 | 1 | version |
//! | 5 | 1 | preset slot 0 (cm) |
//! | 6 | 1 | preset slot 1 (cm) |
//! | 7 | 1 | reserved, `0xFF` |
//! | 8 | 4 | CRC-32 of bytes 0..8 |
//!
//! A blank (all `0xFF`) or torn page fails the magic or CRC check and decodes as `None`.

use crc32fast::Hasher;

pub const RECORD_MAGIC: u32 = u32::from_le_bytes(*b"DSK1");
pub const RECORD_VERSION: u8 = 1;
pub const RECORD_LEN: usize = 12;

const BODY_LEN: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PresetRecord {
    pub presets: [u8; 2],
}

fn crc32(data: &[u8]) -> u32 {
    let mut h = Hasher::new();
    h.update(data);
    h.finalize()
}

impl PresetRecord {
    pub fn new(presets: [u8; 2]) -> Self {
        Self { presets }
    }

    pub fn encode(&self) -> [u8; RECORD_LEN] {
        let mut out = [0u8; RECORD_LEN];
        out[0..4].copy_from_slice(&RECORD_MAGIC.to_le_bytes());
        out[4] = RECORD_VERSION;
        out[5] = self.presets[0];
        out[6] = self.presets[1];
        out[7] = 0xFF;
        let crc = crc32(&out[..BODY_LEN]);
        out[BODY_LEN..].copy_from_slice(&crc.to_le_bytes());
        out
    }

    pub fn decode(bytes: &[u8; RECORD_LEN]) -> Option<Self> {
        let magic = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
        if magic != RECORD_MAGIC || bytes[4] != RECORD_VERSION {
            return None;
        }

        let stored_crc = u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]);
        if crc32(&bytes[..BODY_LEN]) != stored_crc {
            return None;
        }

        Some(Self {
            presets: [bytes[5], bytes[6]],
        })
    }
}
