// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Per-cycle diagnostic snapshot.
//!
//! The line is meant for a human on the debug terminal, not for parsing:
//!
//! ```text
//! ping=90cm buttons=1000 presets=80,100
//! ```
//!
//! Button digits are `1` while pressed, in order: preset 1, preset 2, up, down.

use core::fmt;

use crate::drivers::ButtonState;

/// Everything the loop reports once per cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub height_cm: u16,
    pub buttons: ButtonState,
    pub presets: [u8; 2],
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.buttons;
        write!(
            f,
            "ping={}cm buttons={}{}{}{} presets={},{}",
            self.height_cm,
            b.preset1 as u8,
            b.preset2 as u8,
            b.up as u8,
            b.down as u8,
            self.presets[0],
            self.presets[1],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::string::ToString;

    #[test]
    fn snapshot_line_format() {
        let snap = Snapshot {
            height_cm: 90,
            buttons: ButtonState {
                preset1: true,
                down: true,
                ..ButtonState::RELEASED
            },
            presets: [80, 100],
        };
        assert_eq!(snap.to_string(), "ping=90cm buttons=1001 presets=80,100");
    }

    #[test]
    fn snapshot_reports_no_echo_as_zero() {
        let snap = Snapshot {
            height_cm: 0,
            buttons: ButtonState::RELEASED,
            presets: [0, 0],
        };
        assert_eq!(snap.to_string(), "ping=0cm buttons=0000 presets=0,0");
    }
}
