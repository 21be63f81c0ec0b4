// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Operating mode of the desk.
//!
//! ```text
//!            up + down held
//!   Normal ─────────────────▶ SettingPreset
//!     ▲                             │
//!     └──────── preset 1/2 ─────────┘
//!           (saves current height)
//! ```
//!
//! The mode is a plain value handed from one loop cycle to the next; nothing else holds it.

use crate::drivers::ButtonState;
use crate::storage::PresetSlot;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Mode {
    /// Preset buttons recall stored heights.
    #[default]
    Normal,

    /// Preset buttons capture the current height. Shown by the display colon.
    SettingPreset,
}

impl Mode {
    /// Apply the mode-entry chord. Entering is the only thing the chord does; it never leaves
    /// `SettingPreset`.
    #[inline]
    pub fn after_chord(self, buttons: &ButtonState) -> Mode {
        if buttons.chord() {
            Mode::SettingPreset
        } else {
            self
        }
    }

    #[inline]
    pub fn is_setting_preset(self) -> bool {
        self == Mode::SettingPreset
    }
}

/// Preset slots whose buttons are pressed, in slot order.
pub fn pressed_slots(buttons: &ButtonState) -> impl Iterator<Item = PresetSlot> {
    let pressed = [buttons.preset1, buttons.preset2];
    PresetSlot::ALL
        .into_iter()
        .zip(pressed)
        .filter_map(|(slot, down)| down.then_some(slot))
}
