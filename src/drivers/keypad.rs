// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Four-button keypad with pull-up wiring (active-low).
//!
//! No debounce: the control loop only samples once per poll period, which is slow enough for the
//! mechanical switches used here.

use embedded_hal::digital::InputPin;

use crate::drivers::Keypad;

/// One sample of all four buttons. `true` means pressed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Button 1, recalls/saves preset slot 0.
    pub preset1: bool,
    /// Button 2, recalls/saves preset slot 1.
    pub preset2: bool,
    /// Button 3, jog up.
    pub up: bool,
    /// Button 4, jog down.
    pub down: bool,
}

impl ButtonState {
    pub const RELEASED: Self = Self {
        preset1: false,
        preset2: false,
        up: false,
        down: false,
    };

    /// Up and down held together: the "set preset" chord.
    #[inline]
    pub fn chord(&self) -> bool {
        self.up && self.down
    }
}

/// Keypad built from four GPIO inputs that read low while pressed.
pub struct ActiveLowKeypad<B1, B2, B3, B4> {
    preset1: B1,
    preset2: B2,
    up: B3,
    down: B4,
}

impl<B1, B2, B3, B4> ActiveLowKeypad<B1, B2, B3, B4>
where
    B1: InputPin,
    B2: InputPin,
    B3: InputPin,
    B4: InputPin,
{
    /// Caller must configure the pins as pull-up inputs before calling this.
    pub fn new(preset1: B1, preset2: B2, up: B3, down: B4) -> Self {
        Self {
            preset1,
            preset2,
            up,
            down,
        }
    }

    pub fn free(self) -> (B1, B2, B3, B4) {
        (self.preset1, self.preset2, self.up, self.down)
    }
}

/// A pin that cannot be read counts as released.
#[inline]
fn pressed<P: InputPin>(pin: &mut P) -> bool {
    pin.is_low().unwrap_or(false)
}

impl<B1, B2, B3, B4> Keypad for ActiveLowKeypad<B1, B2, B3, B4>
where
    B1: InputPin,
    B2: InputPin,
    B3: InputPin,
    B4: InputPin,
{
    fn read(&mut self) -> ButtonState {
        ButtonState {
            preset1: pressed(&mut self.preset1),
            preset2: pressed(&mut self.preset2),
            up: pressed(&mut self.up),
            down: pressed(&mut self.down),
        }
    }
}
