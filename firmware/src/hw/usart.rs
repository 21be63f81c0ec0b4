// SPDX-License-Identifier: MIT
// © 2025–2026 Christopher Liu

//! Diagnostic console on USART1.
//!
//! TX only; the receive half is dropped. The controller logs through `core::fmt::Write`, and every
//! line it writes already ends in `\r\n`.
//!
//! To watch the console on the host machine, connect to the debug USB port and use
//! ```text
//! $ screen /dev/tty.usbmodem* 115200
//! ```
//!
//! To close the debug terminal, press `Ctrl+A` then `Ctrl+\` then `y`.

use core::fmt;
use nb::block;

use stm32f7xx_hal::{
    prelude::*,
    serial::{Instance, Pins, Serial, Tx},
};

pub struct Usart<U: Instance> {
    tx: Tx<U>,
}

impl<U: Instance> Usart<U> {
    pub fn new<PINS: Pins<U>>(serial: Serial<U, PINS>) -> Self {
        let (tx, _rx) = serial.split();
        Self { tx }
    }

    #[inline]
    pub fn write_byte(&mut self, b: u8) {
        let _ = block!(self.tx.write(b));
    }

    /// Block until the last byte has left the shift register.
    #[inline]
    pub fn flush(&mut self) {
        let _ = block!(self.tx.flush());
    }
}

impl<U: Instance> fmt::Write for Usart<U> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            self.write_byte(b);
        }
        Ok(())
    }
}
